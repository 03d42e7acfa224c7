//! Generic CRUD interface mapped onto the backend's fixed endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::Instrument;
use za_api_types::JobsEnvelope;
use za_telemetry::tracing_setup::create_operation_span;

use crate::error::ClientError;
use crate::http::ApiClient;
use crate::resources::{descriptor, ListShape};

/// A normalized record: a JSON object that always has an `id` key.
pub type Record = Map<String, Value>;

// ---------------------------------------------------------------------------
// Params / results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<(String, SortOrder)>,
    pub filter: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListResult {
    pub data: Vec<Record>,
    pub total: usize,
}

impl ListResult {
    fn from_records(data: Vec<Record>) -> Self {
        let total = data.len();
        Self { data, total }
    }
}

// ---------------------------------------------------------------------------
// DataProvider
// ---------------------------------------------------------------------------

#[async_trait]
pub trait DataProvider: Send + Sync {
    async fn get_list(&self, resource: &str, params: &ListParams) -> Result<ListResult, ClientError>;

    async fn get_one(&self, resource: &str, id: &str) -> Result<Record, ClientError>;

    async fn get_many(&self, resource: &str, ids: &[String]) -> Result<Vec<Record>, ClientError>;

    async fn get_many_reference(
        &self,
        resource: &str,
        target: &str,
        id: &str,
        params: &ListParams,
    ) -> Result<ListResult, ClientError>;

    async fn create(&self, resource: &str, data: Value) -> Result<Record, ClientError>;

    async fn update(&self, resource: &str, id: &str, data: Value) -> Result<Record, ClientError>;

    /// Returns the ids that were updated.
    async fn update_many(
        &self,
        resource: &str,
        ids: &[String],
        data: Value,
    ) -> Result<Vec<String>, ClientError>;

    async fn delete(&self, resource: &str, id: &str) -> Result<Record, ClientError>;

    /// Returns the ids that were deleted.
    async fn delete_many(&self, resource: &str, ids: &[String]) -> Result<Vec<String>, ClientError>;
}

/// [`DataProvider`] backed by the content-generation API.
///
/// Only list, get, and create reach the backend, and only for the resources
/// in [`crate::resources::RESOURCES`]. The backend has no bulk or mutation
/// endpoints, so those operations are answered locally.
pub struct ResourceAdapter {
    api: Arc<ApiClient>,
}

impl ResourceAdapter {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl DataProvider for ResourceAdapter {
    async fn get_list(&self, resource: &str, params: &ListParams) -> Result<ListResult, ClientError> {
        let Some(endpoint) = descriptor(resource).and_then(|d| d.list) else {
            tracing::debug!(resource, "no list endpoint, returning empty result");
            return Ok(ListResult::default());
        };
        // The backend has no paging, sorting or filtering.
        tracing::trace!(?params, "list params ignored");

        let (span, trace_id) = create_operation_span("getList", resource);
        async move {
            let body = self.api.get_json(endpoint.path, &trace_id).await?;
            let records = match endpoint.shape {
                ListShape::Envelope => {
                    let envelope: JobsEnvelope = serde_json::from_value(body)
                        .map_err(|e| ClientError::Decode(e.to_string()))?;
                    normalize_all(envelope.data)?
                }
                ListShape::OneOrMany => match body {
                    Value::Array(items) => normalize_all(items)?,
                    other => vec![normalize(other)?],
                },
            };
            tracing::debug!(count = records.len(), "listed");
            Ok(ListResult::from_records(records))
        }
        .instrument(span)
        .await
    }

    async fn get_one(&self, resource: &str, id: &str) -> Result<Record, ClientError> {
        let prefix = descriptor(resource)
            .and_then(|d| d.get)
            .ok_or_else(|| ClientError::unsupported("getOne", resource))?;

        let (span, trace_id) = create_operation_span("getOne", resource);
        async move {
            let mut segments: Vec<&str> = prefix.to_vec();
            segments.push(id);
            normalize(self.api.get_json(&segments, &trace_id).await?)
        }
        .instrument(span)
        .await
    }

    async fn get_many(&self, _resource: &str, _ids: &[String]) -> Result<Vec<Record>, ClientError> {
        Ok(Vec::new())
    }

    async fn get_many_reference(
        &self,
        _resource: &str,
        _target: &str,
        _id: &str,
        _params: &ListParams,
    ) -> Result<ListResult, ClientError> {
        Ok(ListResult::default())
    }

    async fn create(&self, resource: &str, data: Value) -> Result<Record, ClientError> {
        let path = descriptor(resource)
            .and_then(|d| d.create)
            .ok_or_else(|| ClientError::unsupported("create", resource))?;

        let (span, trace_id) = create_operation_span("create", resource);
        async move {
            let record = normalize(self.api.post_json(path, &data, &trace_id).await?)?;
            tracing::info!(id = %record["id"], "created");
            Ok(record)
        }
        .instrument(span)
        .await
    }

    async fn update(&self, _resource: &str, _id: &str, _data: Value) -> Result<Record, ClientError> {
        Err(ClientError::NotImplemented { operation: "update" })
    }

    async fn update_many(
        &self,
        _resource: &str,
        _ids: &[String],
        _data: Value,
    ) -> Result<Vec<String>, ClientError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _resource: &str, _id: &str) -> Result<Record, ClientError> {
        Err(ClientError::NotImplemented { operation: "delete" })
    }

    async fn delete_many(&self, _resource: &str, _ids: &[String]) -> Result<Vec<String>, ClientError> {
        Ok(Vec::new())
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Turn a backend value into a [`Record`]. Objects pass through with every
/// field intact; a missing `id` becomes `null`. Non-objects are rejected.
pub fn normalize(value: Value) -> Result<Record, ClientError> {
    match value {
        Value::Object(mut map) => {
            map.entry("id").or_insert(Value::Null);
            Ok(map)
        }
        other => Err(ClientError::Decode(format!(
            "expected a JSON object, got {}",
            kind(&other)
        ))),
    }
}

fn normalize_all(items: Vec<Value>) -> Result<Vec<Record>, ClientError> {
    items.into_iter().map(normalize).collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use axum::{extract::Path as AxPath, http::StatusCode, routing::get, Json, Router};
    use serde_json::json;
    use za_core::session_store::SessionStore;

    use super::*;

    async fn adapter_for(app: Router) -> ResourceAdapter {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let api = ApiClient::new(&format!("http://{addr}"), SessionStore::in_memory()).unwrap();
        ResourceAdapter::new(Arc::new(api))
    }

    #[test]
    fn normalize_inserts_missing_id() {
        let record = normalize(json!({"role": "admin"})).unwrap();
        assert_eq!(record["id"], Value::Null);
        assert_eq!(record["role"], "admin");
    }

    #[test]
    fn normalize_rejects_scalars() {
        let err = normalize(json!("nope")).unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[tokio::test]
    async fn jobs_list_unwraps_envelope() {
        let app = Router::new().route(
            "/tiktok/jobs",
            get(|| async {
                Json(json!({"data": [
                    {"id": "job_2", "type": "tiktok_video", "status": "rendering", "created_at": "2026-01-02T00:00:00+00:00"},
                    {"id": "job_1", "type": "tiktok_feed_form", "status": "generated", "created_at": "2026-01-01T00:00:00+00:00"}
                ]}))
            }),
        );
        let adapter = adapter_for(app).await;

        let result = adapter.get_list("tiktok_jobs", &ListParams::default()).await.unwrap();
        assert_eq!(result.total, 2);
        assert_eq!(result.data[0]["id"], "job_2");
        assert_eq!(result.data[1]["status"], "generated");
    }

    #[tokio::test]
    async fn jobs_list_without_data_key_is_empty() {
        let app = Router::new().route("/tiktok/jobs", get(|| async { Json(json!({})) }));
        let adapter = adapter_for(app).await;

        let result = adapter.get_list("tiktok_jobs", &ListParams::default()).await.unwrap();
        assert_eq!(result, ListResult::default());
    }

    #[tokio::test]
    async fn jobs_list_with_null_data_is_empty() {
        let app = Router::new().route("/tiktok/jobs", get(|| async { Json(json!({"data": null})) }));
        let adapter = adapter_for(app).await;

        let result = adapter.get_list("tiktok_jobs", &ListParams::default()).await.unwrap();
        assert_eq!(result, ListResult::default());
    }

    #[tokio::test]
    async fn control_panel_object_becomes_single_row() {
        let app = Router::new().route(
            "/admin/control-panel",
            get(|| async {
                Json(json!({"id": "admin", "role": "admin", "status": "ok", "job_count": 4}))
            }),
        );
        let adapter = adapter_for(app).await;

        let result = adapter.get_list("admin_panel", &ListParams::default()).await.unwrap();
        assert_eq!(result.total, 1);
        assert_eq!(result.data[0]["job_count"], 4);
    }

    #[tokio::test]
    async fn control_panel_array_passes_through() {
        let app = Router::new().route(
            "/user/control-panel",
            get(|| async { Json(json!([{"id": "a"}, {"id": "b"}, {"id": "c"}])) }),
        );
        let adapter = adapter_for(app).await;

        let result = adapter.get_list("user_panel", &ListParams::default()).await.unwrap();
        assert_eq!(result.total, 3);
    }

    #[tokio::test]
    async fn get_one_fetches_job_by_id() {
        let app = Router::new().route(
            "/tiktok/jobs/{id}",
            get(|AxPath(id): AxPath<String>| async move {
                Json(json!({"id": id, "type": "tiktok_upload", "status": "uploaded"}))
            }),
        );
        let adapter = adapter_for(app).await;

        let job = adapter.get_one("tiktok_jobs", "job_9").await.unwrap();
        assert_eq!(job["id"], "job_9");
        assert_eq!(job["type"], "tiktok_upload");
    }

    #[tokio::test]
    async fn get_one_surfaces_not_found() {
        let app = Router::new().route(
            "/tiktok/jobs/{id}",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "job_not_found"}))) }),
        );
        let adapter = adapter_for(app).await;

        let err = adapter.get_one("tiktok_jobs", "job_404").await.unwrap_err();
        match err {
            ClientError::Http { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "job_not_found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn create_on_list_only_resource_is_unsupported() {
        let adapter = adapter_for(Router::new()).await;
        let err = adapter.create("tiktok_jobs", json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Unsupported resource create: tiktok_jobs");
    }

    #[tokio::test]
    async fn stubbed_operations() {
        let adapter = adapter_for(Router::new()).await;
        let ids = vec!["job_1".to_string()];

        assert!(adapter.get_many("tiktok_jobs", &ids).await.unwrap().is_empty());
        assert_eq!(
            adapter
                .get_many_reference("tiktok_jobs", "product_id", "p-1", &ListParams::default())
                .await
                .unwrap(),
            ListResult::default()
        );
        assert!(adapter.update_many("tiktok_jobs", &ids, json!({})).await.unwrap().is_empty());
        assert!(adapter.delete_many("tiktok_jobs", &ids).await.unwrap().is_empty());
        assert!(matches!(
            adapter.update("tiktok_jobs", "job_1", json!({})).await,
            Err(ClientError::NotImplemented { operation: "update" })
        ));
        assert!(matches!(
            adapter.delete("tiktok_jobs", "job_1").await,
            Err(ClientError::NotImplemented { operation: "delete" })
        ));
    }
}
