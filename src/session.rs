//! Explorer session state
//!
//! An `ExplorerSession` owns one analysis: the request being built, the last
//! successful response and everything derived from it. It changes only
//! through named actions.
//!
//! ## Fetching
//!
//! A fetch is split in three so the session is never borrowed across the
//! network call:
//!
//! 1. `begin_fetch` snapshots the request into a `FetchTicket`
//! 2. `FetchTicket::send` performs the call
//! 3. `complete_fetch` applies the outcome
//!
//! Each ticket carries a generation number. Starting another fetch or calling
//! `reset` advances the generation, and outcomes from older tickets are
//! dropped without touching the session.

use crate::analysis::analyze;
use crate::config::ExplorerConfig;
use crate::fetch::{FetchError, FetchRequest, Header, HttpFetcher, HttpMethod, QueryParameter};
use crate::fields::DetectedField;
use crate::mapping::{self, FieldMapping, MappingError, MappingSet, StandardizedRecord};
use crate::structure::{PaginationInfo, StructureType};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

/// Errors from session actions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("No query parameter with id {0}")]
    UnknownParam(Uuid),
}

/// Discrete, synchronous session actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetUrl(String),
    SetMethod(HttpMethod),
    SetBody(Option<String>),
    /// Replace any header with the same (case-insensitive) name
    SetHeader { name: String, value: String },
    RemoveHeader(String),
    ToggleField(String),
    RenameField { path: String, name: String },
    AddParam { key: String, value: String },
    UpdateParam { id: Uuid, key: String, value: String },
    RemoveParam(Uuid),
    ToggleParam(Uuid),
    Reset,
}

/// A fetch in flight
#[derive(Debug, Clone)]
pub struct FetchTicket {
    generation: u64,
    request: FetchRequest,
}

impl FetchTicket {
    pub fn request(&self) -> &FetchRequest {
        &self.request
    }

    /// Perform the call
    pub async fn send(self, fetcher: &HttpFetcher) -> FetchOutcome {
        let result = fetcher.fetch(&self.request).await;
        self.resolve(result)
    }

    /// Pair a result obtained some other way with this ticket
    pub fn resolve(self, result: Result<Value, FetchError>) -> FetchOutcome {
        FetchOutcome {
            generation: self.generation,
            result,
        }
    }
}

/// Result of a ticket, to be handed back to `complete_fetch`
#[derive(Debug)]
pub struct FetchOutcome {
    generation: u64,
    result: Result<Value, FetchError>,
}

#[derive(Debug, Clone)]
pub struct ExplorerSession {
    url: String,
    method: HttpMethod,
    headers: Vec<Header>,
    body: Option<String>,
    query_params: Vec<QueryParameter>,

    raw_data: Option<Value>,
    structure_type: StructureType,
    pagination: PaginationInfo,
    records: Vec<Value>,
    detected_fields: Vec<DetectedField>,
    mappings: MappingSet,
    standardized_data: Vec<StandardizedRecord>,

    is_loading: bool,
    error: Option<String>,
    warning: Option<String>,

    generation: u64,
    preview_rows: usize,
}

impl Default for ExplorerSession {
    fn default() -> Self {
        ExplorerSession::new(&ExplorerConfig::default())
    }
}

impl ExplorerSession {
    pub fn new(config: &ExplorerConfig) -> Self {
        ExplorerSession {
            url: String::new(),
            method: HttpMethod::default(),
            headers: Vec::new(),
            body: None,
            query_params: Vec::new(),
            raw_data: None,
            structure_type: StructureType::Unknown,
            pagination: PaginationInfo::default(),
            records: Vec::new(),
            detected_fields: Vec::new(),
            mappings: MappingSet::default(),
            standardized_data: Vec::new(),
            is_loading: false,
            error: None,
            warning: None,
            generation: 0,
            preview_rows: config.preview_rows,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn query_params(&self) -> &[QueryParameter] {
        &self.query_params
    }

    /// Last successfully decoded response
    pub fn raw_data(&self) -> Option<&Value> {
        self.raw_data.as_ref()
    }

    pub fn structure_type(&self) -> StructureType {
        self.structure_type
    }

    pub fn pagination(&self) -> &PaginationInfo {
        &self.pagination
    }

    /// Records extracted from the last response
    pub fn records(&self) -> &[Value] {
        &self.records
    }

    pub fn detected_fields(&self) -> &[DetectedField] {
        &self.detected_fields
    }

    pub fn field_mappings(&self) -> &[FieldMapping] {
        self.mappings.as_slice()
    }

    pub fn standardized_data(&self) -> &[StandardizedRecord] {
        &self.standardized_data
    }

    /// The first `preview_rows` standardized records
    pub fn preview(&self) -> &[StandardizedRecord] {
        let end = self.standardized_data.len().min(self.preview_rows);
        &self.standardized_data[..end]
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Non-blocking notice, e.g. a response with no records
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_deref()
    }

    /// Apply one action
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::SetUrl(url) => self.set_url(url),
            Action::SetMethod(method) => self.method = method,
            Action::SetBody(body) => self.body = body,
            Action::SetHeader { name, value } => self.set_header(name, value),
            Action::RemoveHeader(name) => self.remove_header(&name),
            Action::ToggleField(path) => {
                self.toggle_field(&path)?;
            }
            Action::RenameField { path, name } => self.rename_field(&path, &name)?,
            Action::AddParam { key, value } => {
                self.add_param(key, value);
            }
            Action::UpdateParam { id, key, value } => self.update_param(id, key, value)?,
            Action::RemoveParam(id) => self.remove_param(id)?,
            Action::ToggleParam(id) => {
                self.toggle_param(id)?;
            }
            Action::Reset => self.reset(),
        }
        Ok(())
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove_header(&name);
        self.headers.push(Header {
            name,
            value: value.into(),
        });
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|h| !h.name.eq_ignore_ascii_case(name));
    }

    /// Flip selection of a field and regenerate the dataset; returns the new state
    pub fn toggle_field(&mut self, path: &str) -> Result<bool, SessionError> {
        let selected = self.mappings.toggle(path)?;
        self.retransform();
        Ok(selected)
    }

    /// Select or deselect a field and regenerate the dataset
    pub fn set_field_selected(&mut self, path: &str, selected: bool) -> Result<(), SessionError> {
        self.mappings.set_selected(path, selected)?;
        self.retransform();
        Ok(())
    }

    /// Rename a field's standard name and regenerate the dataset
    pub fn rename_field(&mut self, path: &str, name: &str) -> Result<(), SessionError> {
        self.mappings.rename(path, name)?;
        self.retransform();
        Ok(())
    }

    /// Append an enabled query parameter; returns its id
    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) -> Uuid {
        let param = QueryParameter::new(key, value);
        let id = param.id;
        self.query_params.push(param);
        id
    }

    pub fn update_param(
        &mut self,
        id: Uuid,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let param = self.param_mut(id)?;
        param.key = key.into();
        param.value = value.into();
        Ok(())
    }

    pub fn remove_param(&mut self, id: Uuid) -> Result<(), SessionError> {
        let before = self.query_params.len();
        self.query_params.retain(|p| p.id != id);
        if self.query_params.len() == before {
            return Err(SessionError::UnknownParam(id));
        }
        Ok(())
    }

    /// Flip a parameter's enabled flag; returns the new state
    pub fn toggle_param(&mut self, id: Uuid) -> Result<bool, SessionError> {
        let param = self.param_mut(id)?;
        param.enabled = !param.enabled;
        Ok(param.enabled)
    }

    /// Drop all state, including query parameters. Outcomes of fetches
    /// started before the reset are ignored.
    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = ExplorerSession {
            generation,
            preview_rows: self.preview_rows,
            ..ExplorerSession::default()
        };
    }

    /// The request the next fetch would send
    pub fn request(&self) -> FetchRequest {
        FetchRequest {
            url: self.url.clone(),
            method: self.method,
            headers: self.headers.clone(),
            body: self.body.clone(),
            params: self.query_params.clone(),
        }
    }

    /// Start a fetch, superseding any fetch still in flight
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.is_loading = true;
        FetchTicket {
            generation: self.generation,
            request: self.request(),
        }
    }

    /// Apply a fetch outcome.
    ///
    /// Returns `false` when the outcome is stale and was discarded. A failure
    /// sets `error` and keeps the previous analysis; a success rebuilds every
    /// derived value from scratch, discarding earlier renames and selections.
    pub fn complete_fetch(&mut self, outcome: FetchOutcome) -> bool {
        if outcome.generation != self.generation {
            warn!(
                outcome = outcome.generation,
                current = self.generation,
                "Discarding stale fetch outcome"
            );
            return false;
        }

        self.is_loading = false;

        match outcome.result {
            Ok(raw) => self.load(raw),
            Err(e) => {
                warn!(error = %e, "Fetch failed");
                self.error = Some(e.to_string());
            }
        }

        true
    }

    /// Begin, send and complete a fetch in one go
    pub async fn fetch(&mut self, fetcher: &HttpFetcher) -> bool {
        let ticket = self.begin_fetch();
        let outcome = ticket.send(fetcher).await;
        self.complete_fetch(outcome)
    }

    /// Export the full dataset as pretty JSON
    pub fn export_json(&self) -> anyhow::Result<String> {
        mapping::to_json_pretty(&self.standardized_data)
    }

    /// Export the full dataset as CSV
    pub fn export_csv(&self) -> anyhow::Result<String> {
        mapping::to_csv(&self.standardized_data, self.mappings.as_slice())
    }

    fn load(&mut self, raw: Value) {
        let analysis = analyze(&raw);

        self.mappings = MappingSet::from_fields(&analysis.detected_fields);
        self.structure_type = analysis.structure_type;
        self.pagination = analysis.pagination;
        self.records = analysis.records;
        self.detected_fields = analysis.detected_fields;
        self.raw_data = Some(raw);
        self.error = None;
        self.warning = if self.records.is_empty() {
            warn!(structure = %self.structure_type, "Response contains no records");
            Some("The response contains no records".to_string())
        } else {
            None
        };

        self.retransform();

        info!(
            structure = %self.structure_type,
            records = self.records.len(),
            fields = self.detected_fields.len(),
            "Loaded API response"
        );
    }

    fn retransform(&mut self) {
        self.standardized_data = mapping::transform_data(&self.records, self.mappings.as_slice());
    }

    fn param_mut(&mut self, id: Uuid) -> Result<&mut QueryParameter, SessionError> {
        self.query_params
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(SessionError::UnknownParam(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loaded(raw: Value) -> ExplorerSession {
        let mut session = ExplorerSession::default();
        session.set_url("https://api.example.com/users");
        let ticket = session.begin_fetch();
        assert!(session.is_loading());
        assert!(session.complete_fetch(ticket.resolve(Ok(raw))));
        session
    }

    fn users() -> Value {
        json!({
            "data": [
                {"full_name": "Ana Gómez", "email": "ana@x.com"},
                {"full_name": "Luis Díaz", "email": "luis@x.com"}
            ],
            "total": 2
        })
    }

    #[test]
    fn test_successful_fetch() {
        let session = loaded(users());

        assert!(!session.is_loading());
        assert_eq!(session.structure_type(), StructureType::Paginated);
        assert_eq!(session.pagination().data_key.as_deref(), Some("data"));
        assert_eq!(session.pagination().count_key.as_deref(), Some("total"));
        assert_eq!(session.detected_fields().len(), 2);
        assert_eq!(
            session.standardized_data()[1],
            serde_json::from_value::<StandardizedRecord>(
                json!({"nombre_completo": "Luis Díaz", "correo": "luis@x.com"})
            )
            .unwrap()
        );
        assert!(session.error().is_none());
        assert!(session.warning().is_none());
    }

    #[test]
    fn test_rename_and_toggle_do_not_touch_fields() {
        let mut session = loaded(users());
        let fields_before = session.detected_fields().to_vec();

        session
            .apply(Action::RenameField {
                path: "email".to_string(),
                name: "mail".to_string(),
            })
            .unwrap();
        assert_eq!(session.standardized_data()[0]["mail"], json!("ana@x.com"));

        assert_eq!(session.toggle_field("full_name"), Ok(false));
        session.set_field_selected("full_name", false).unwrap();
        let keys: Vec<&String> = session.standardized_data()[0].keys().collect();
        assert_eq!(keys, vec!["mail"]);

        assert_eq!(session.detected_fields(), fields_before.as_slice());
    }

    #[test]
    fn test_rename_errors_leave_state() {
        let mut session = loaded(users());
        let err = session.rename_field("email", "").unwrap_err();
        assert_eq!(err, SessionError::Mapping(MappingError::EmptyName));
        assert_eq!(session.field_mappings()[1].standard_name, "correo");

        let err = session.apply(Action::ToggleField("missing".to_string())).unwrap_err();
        assert_eq!(
            err,
            SessionError::Mapping(MappingError::UnknownField("missing".to_string()))
        );
    }

    #[test]
    fn test_failure_keeps_previous_analysis() {
        let mut session = loaded(users());
        let ticket = session.begin_fetch();
        let outcome = ticket.resolve(Err(FetchError::Decode("bad".to_string())));
        assert!(session.complete_fetch(outcome));

        assert!(!session.is_loading());
        assert_eq!(session.error(), Some("Response is not valid JSON: bad"));
        assert_eq!(session.standardized_data().len(), 2);
        assert_eq!(session.structure_type(), StructureType::Paginated);
    }

    #[test]
    fn test_refetch_discards_renames() {
        let mut session = loaded(users());
        session.rename_field("email", "x").unwrap();
        session.toggle_field("full_name").unwrap();

        let ticket = session.begin_fetch();
        session.complete_fetch(ticket.resolve(Ok(users())));

        assert_eq!(session.field_mappings()[1].standard_name, "correo");
        assert!(session.field_mappings().iter().all(|m| m.is_selected));
    }

    #[test]
    fn test_newer_fetch_replaces_older() {
        let mut session = ExplorerSession::default();
        let first = session.begin_fetch();
        let second = session.begin_fetch();

        assert!(!session.complete_fetch(first.resolve(Ok(json!([{"a": 1}])))));
        assert!(session.is_loading());
        assert!(session.records().is_empty());

        assert!(session.complete_fetch(second.resolve(Ok(json!([{"b": 2}])))));
        assert_eq!(session.records(), &[json!({"b": 2})]);
    }

    #[test]
    fn test_reset_discards_in_flight() {
        let mut session = loaded(users());
        session.add_param("page", "2");
        let ticket = session.begin_fetch();
        session.apply(Action::Reset).unwrap();

        assert!(!session.complete_fetch(ticket.resolve(Ok(users()))));
        assert!(!session.is_loading());
        assert!(session.raw_data().is_none());
        assert!(session.query_params().is_empty());
        assert!(session.standardized_data().is_empty());
        assert_eq!(session.url(), "");
    }

    #[test]
    fn test_empty_dataset_warning() {
        let session = loaded(json!({"data": [], "total": 0}));
        assert_eq!(session.structure_type(), StructureType::Paginated);
        assert!(session.error().is_none());
        assert!(session.warning().is_some());
        assert!(session.detected_fields().is_empty());
        assert!(session.standardized_data().is_empty());
    }

    #[test]
    fn test_query_params() {
        let mut session = ExplorerSession::default();
        let id = session.add_param("page", "1");
        session.update_param(id, "page", "3").unwrap();
        assert_eq!(session.toggle_param(id), Ok(false));
        assert_eq!(session.query_params()[0].value, "3");

        let missing = Uuid::new_v4();
        assert_eq!(session.remove_param(missing), Err(SessionError::UnknownParam(missing)));

        session.apply(Action::RemoveParam(id)).unwrap();
        assert!(session.query_params().is_empty());
    }

    #[test]
    fn test_headers_replace_by_name() {
        let mut session = ExplorerSession::default();
        session.set_header("Authorization", "Bearer a");
        session
            .apply(Action::SetHeader {
                name: "authorization".to_string(),
                value: "Bearer b".to_string(),
            })
            .unwrap();
        assert_eq!(session.headers().len(), 1);
        assert_eq!(session.request().headers[0].value, "Bearer b");
    }

    #[test]
    fn test_preview_limit() {
        let rows: Vec<Value> = (0..150).map(|i| json!({"id": i})).collect();
        let session = loaded(Value::Array(rows));
        assert_eq!(session.standardized_data().len(), 150);
        assert_eq!(session.preview().len(), 100);
        assert_eq!(session.preview()[99]["id"], json!(99));
    }
}
