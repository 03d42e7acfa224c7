//! Thin JSON-over-HTTP wrapper around `reqwest` shared by the auth gate and
//! the resource adapter.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, Url};
use serde_json::Value;
use za_core::session_store::SessionStore;
use za_telemetry::tracing_setup::REQUEST_ID_HEADER;

use crate::error::ClientError;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`). The
    /// base may carry a path prefix; endpoint segments are appended to it.
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url.trim()).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "not a hierarchical url".into(),
            });
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url: parsed,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Build an endpoint URL from path segments. Segments are
    /// percent-encoded, so ids cannot escape their path position.
    pub fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: "not a hierarchical url".into(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Start a request with the common headers and no credentials.
    pub(crate) fn anonymous_request(&self, method: Method, url: Url, trace_id: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, trace_id)
    }

    /// Start a request with the common headers. The bearer token is attached
    /// when one is held; its absence is left for the backend to judge.
    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        trace_id: &str,
    ) -> Result<RequestBuilder, ClientError> {
        let mut builder = self.anonymous_request(method, url, trace_id);
        if let Some(token) = self.session.token()? {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        Ok(builder)
    }

    pub async fn get_json(&self, segments: &[&str], trace_id: &str) -> Result<Value, ClientError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "GET");
        let resp = self.request(Method::GET, url, trace_id)?.send().await?;
        read_json(resp).await
    }

    pub async fn post_json(
        &self,
        segments: &[&str],
        body: &Value,
        trace_id: &str,
    ) -> Result<Value, ClientError> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "POST");
        let resp = self
            .request(Method::POST, url, trace_id)?
            .json(body)
            .send()
            .await?;
        read_json(resp).await
    }
}

/// Decode a response body, turning non-2xx statuses into
/// [`ClientError::Http`]. An empty success body reads as `null`.
pub(crate) async fn read_json(resp: Response) -> Result<Value, ClientError> {
    let status = resp.status();
    let text = resp.text().await?;

    if !status.is_success() {
        return Err(ClientError::Http {
            status: status.as_u16(),
            message: error_message(&text, status.canonical_reason()),
        });
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Pull a readable message out of an error body: FastAPI's `detail`, an
/// `error` field, the raw text, or the status reason as a last resort.
pub(crate) fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            match json.get(key) {
                Some(Value::String(s)) => return s.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("unknown error").to_string()
    } else {
        trimmed.to_string()
    }
}
