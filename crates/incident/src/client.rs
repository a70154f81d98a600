use derive_more::Debug;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{
    Client as HttpClient, RequestBuilder, Response,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    error::{ClientError, Result},
    models::{Incident, IncidentFilter, IncidentPatch, NewIncident, RecordId},
};

/// Default backend address when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const INCIDENTS: &str = "chamados";

const LIST_FAILED: &str = "Erro ao carregar os chamados";
const FETCH_FAILED: &str = "Failed to fetch incident";
const CREATE_FAILED: &str = "Failed to create incident";
const UPDATE_FAILED: &str = "Failed to update the incident";
const DELETE_FAILED: &str = "Failed to delete the incident";
const SEARCH_FAILED: &str = "Failed to search incidents";
const FILTER_FAILED: &str = "Failed to filter incidents";

/// Characters left unescaped in the search text: ASCII alphanumerics and `-_.!~*()`.
/// `'` is escaped as well.
const SEARCH_TEXT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

/// Client for the chamados REST backend.
///
/// Every call is a single request with no retries. Timeouts come from the
/// injected [`reqwest::Client`], if it was built with one.
#[derive(Debug, Clone)]
pub struct Client {
    #[debug(skip)]
    http: HttpClient,
    base_url: Url,
}

impl Client {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: Url) -> Result<Self> {
        Self::with_http_client(base_url, HttpClient::new())
    }

    /// Create a client that sends requests through an existing HTTP client.
    pub fn with_http_client(base_url: Url, http: HttpClient) -> Result<Self> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// Backend base URL.
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch every incident.
    pub async fn list(&self) -> Result<Vec<Incident>> {
        let url = self.endpoint(&[INCIDENTS]);
        let resp = self.send(self.http.get(url).header(CONTENT_TYPE, json_content_type())).await?;
        decode(ensure_success(resp, LIST_FAILED)?).await
    }

    /// Fetch one incident.
    pub async fn get_by_id(&self, id: impl Into<RecordId>) -> Result<Incident> {
        let url = self.incident_url(&id.into());
        let resp = self.send(self.http.get(url).header(CONTENT_TYPE, json_content_type())).await?;
        decode(ensure_success(resp, FETCH_FAILED)?).await
    }

    /// Open a new incident. The priority is sent as its backend code.
    pub async fn create(&self, incident: &NewIncident) -> Result<Incident> {
        let url = self.endpoint(&[INCIDENTS]);
        let resp = self.send(self.http.post(url).json(&incident.to_body())).await?;
        decode(ensure_success(resp, CREATE_FAILED)?).await
    }

    /// Apply a partial update. The patch is forwarded as-is.
    ///
    /// On failure the error carries the backend's `message` field when the error
    /// body has one.
    pub async fn update(&self, id: impl Into<RecordId>, patch: &IncidentPatch) -> Result<Incident> {
        let url = self.incident_url(&id.into());
        let resp = self.send(self.http.put(url).json(patch)).await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|mut body| body.get_mut("message").map(Value::take))
                .and_then(message_text)
                .unwrap_or_else(|| UPDATE_FAILED.to_owned());
            return Err(ClientError::RequestFailed { status, message });
        }
        decode(resp).await
    }

    /// Delete an incident. Resolves to `true` on any success status; the body is ignored.
    pub async fn delete(&self, id: impl Into<RecordId>) -> Result<bool> {
        let url = self.incident_url(&id.into());
        let resp = self.send(self.http.delete(url)).await?;
        ensure_success(resp, DELETE_FAILED)?;
        Ok(true)
    }

    /// Free-text search. Spaces in `query` are sent as `%20`, not `+`.
    pub async fn search(&self, query: &str) -> Result<Vec<Incident>> {
        let mut url = self.endpoint(&[INCIDENTS, "buscar"]);
        url.set_query(Some(&format!("q={}", utf8_percent_encode(query, SEARCH_TEXT))));
        let resp = self.send(self.http.get(url)).await?;
        decode(ensure_success(resp, SEARCH_FAILED)?).await
    }

    /// Filter by status, priority and department. Unset criteria are not sent.
    pub async fn filter(&self, filter: &IncidentFilter) -> Result<Vec<Incident>> {
        let mut url = self.endpoint(&[INCIDENTS, "filtrar"]);
        url.set_query(Some(&filter.to_query_string()));
        let resp = self.send(self.http.get(url)).await?;
        decode(ensure_success(resp, FILTER_FAILED)?).await
    }

    fn incident_url(&self, id: &RecordId) -> Url {
        self.endpoint(&[INCIDENTS, &id.to_string()])
    }

    /// Append `segments` to the base URL path.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        // Cannot fail: base URLs that can't carry a path are rejected in the constructor.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let request = request.build()?;
        debug!(method = %request.method(), url = %request.url(), "Sending chamados request");
        let resp = self.http.execute(request).await?;
        debug!(status = %resp.status(), url = %resp.url(), "Received chamados response");
        Ok(resp)
    }
}

/// Text of a backend `message` field. Empty strings, `0`, `false` and `null`
/// count as absent.
fn message_text(message: Value) -> Option<String> {
    match message {
        Value::String(text) if !text.is_empty() => Some(text),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        Value::Array(_) | Value::Object(_) => Some(message.to_string()),
        _ => None,
    }
}

fn json_content_type() -> HeaderValue {
    HeaderValue::from_static("application/json")
}

fn ensure_success(resp: Response, message: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ClientError::RequestFailed { status, message: message.to_owned() })
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    Ok(resp.json::<T>().await?)
}
