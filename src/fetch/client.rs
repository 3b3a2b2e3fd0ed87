use crate::config::ExplorerConfig;
use crate::fetch::error::FetchError;
use crate::fetch::request::{FetchRequest, HttpMethod};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

/// Issues API calls and decodes their JSON bodies
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &ExplorerConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(HttpFetcher { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        HttpFetcher { client }
    }

    /// Send the request and decode the response body as JSON
    pub async fn fetch(&self, request: &FetchRequest) -> Result<Value, FetchError> {
        let url = request.build_url()?;
        let headers = build_headers(request)?;

        info!(method = request.method.as_str(), url = %url, "Fetching API response");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url.clone()),
            HttpMethod::Post => self.client.post(url.clone()),
        }
        .headers(headers);

        if request.method == HttpMethod::Post {
            if let Some(body) = request.body.as_deref() {
                builder = match serde_json::from_str::<Value>(body) {
                    Ok(json) => {
                        debug!("Sending JSON request body");
                        builder.json(&json)
                    }
                    Err(_) => {
                        debug!("Sending raw text request body");
                        builder.body(body.to_string())
                    }
                };
            }
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = bytes.len(), "Received API response");

        decode_body(bytes.to_vec())
    }
}

fn build_headers(request: &FetchRequest) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    for header in &request.headers {
        let name = HeaderName::from_bytes(header.name.trim().as_bytes())
            .map_err(|_| FetchError::InvalidHeader(header.name.clone()))?;
        let value = HeaderValue::from_str(&header.value)
            .map_err(|_| FetchError::InvalidHeader(header.name.clone()))?;
        headers.append(name, value);
    }
    Ok(headers)
}

/// Decode a response body.
///
/// Uses SIMD parsing first; on failure the body is re-parsed with serde_json
/// so the error message points at the offending position.
pub fn decode_body(mut bytes: Vec<u8>) -> Result<Value, FetchError> {
    // simd-json parses in place, so keep an untouched copy for the fallback
    let original = bytes.clone();

    match simd_json::serde::from_slice::<Value>(&mut bytes) {
        Ok(value) => Ok(value),
        Err(_) => serde_json::from_slice(&original).map_err(|e| FetchError::Decode(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::request::Header;
    use serde_json::json;

    #[test]
    fn test_decode_body() {
        let value = decode_body(br#"{"b": 1, "a": [true, null]}"#.to_vec()).unwrap();
        assert_eq!(value, json!({"b": 1, "a": [true, null]}));

        // key order follows the document
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_decode_body_rejects_invalid_json() {
        let err = decode_body(b"<html>oops</html>".to_vec()).unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_invalid_header() {
        let request = FetchRequest {
            headers: vec![Header {
                name: "bad header".to_string(),
                value: "x".to_string(),
            }],
            ..FetchRequest::get("http://localhost")
        };
        assert!(matches!(build_headers(&request), Err(FetchError::InvalidHeader(_))));
    }
}
