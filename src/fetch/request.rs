use crate::fetch::error::FetchError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::str::FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            other => Err(format!("unsupported method '{}'", other)),
        }
    }
}

/// A user-managed query string entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameter {
    pub id: Uuid,
    pub key: String,
    pub value: String,
    pub enabled: bool,
}

impl QueryParameter {
    /// New enabled parameter with a fresh id
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        QueryParameter {
            id: Uuid::new_v4(),
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Whether this parameter ends up in the query string
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Everything needed to issue one API call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<Header>,
    /// Only sent with POST
    pub body: Option<String>,
    pub params: Vec<QueryParameter>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        FetchRequest {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Parse the URL and append active query parameters in list order
    pub fn build_url(&self) -> Result<Url, FetchError> {
        let mut url = Url::parse(self.url.trim()).map_err(|e| FetchError::InvalidUrl {
            url: self.url.clone(),
            reason: e.to_string(),
        })?;

        let active: Vec<&QueryParameter> = self.params.iter().filter(|p| p.is_active()).collect();
        if !active.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in active {
                pairs.append_pair(&param.key, &param.value);
            }
        }

        Ok(url)
    }
}
