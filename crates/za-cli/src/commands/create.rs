use za_api_types::forms::CreateForm;
use za_client::resources::descriptor;
use za_client::{AdminClient, DataProvider, Record};

use super::{cell, guarded, warn_if_not_permitted};

pub fn render(resource: &str, record: &Record) -> String {
    let label = descriptor(resource).map(|d| d.label).unwrap_or(resource);
    let mut out = format!("{label}: created {}\n", cell(record.get("id")));
    for key in ["type", "status"] {
        if let Some(value) = record.get(key) {
            out.push_str(&format!("  {key}: {}\n", cell(Some(value))));
        }
    }
    out
}

/// Validate `form` locally, then submit it to its resource's endpoint.
pub async fn run<F: CreateForm>(client: &AdminClient, form: &F, json_output: bool) -> anyhow::Result<()> {
    let payload = form.to_payload()?;
    warn_if_not_permitted(client, F::RESOURCE).await;
    let record = guarded(client, client.data.create(F::RESOURCE, payload)).await?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        print!("{}", render(F::RESOURCE, &record));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{routing::post, Json, Router};
    use serde_json::json;
    use za_api_types::forms::{FeedProductForm, ProductVideoForm};
    use za_core::session_store::SessionStore;
    use za_core::types::{Role, Session};

    use super::*;

    fn logged_in() -> SessionStore {
        let store = SessionStore::in_memory();
        store.save(&Session::new("tok", Role::Finance)).unwrap();
        store
    }

    #[tokio::test]
    async fn submits_video_form() {
        let app = Router::new().route(
            "/tiktok/video/generate",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body, json!({"product_id": "p-1", "script_style": "conversion", "duration_seconds": 20}));
                Json(json!({"id": "job_8", "type": "tiktok_video", "status": "rendering"}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let client = AdminClient::new(&format!("http://{addr}"), logged_in()).unwrap();

        assert!(run(&client, &ProductVideoForm::new("p-1"), false).await.is_ok());
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_backend() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = Router::new().route(
            "/tiktok/feed-product-form/generate",
            post(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Json(json!({"id": "job_1"})) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        let client = AdminClient::new(&format!("http://{addr}"), logged_in()).unwrap();

        let form = FeedProductForm::new("p-1", "Lamp", -1.0);
        let err = run(&client, &form, false).await.unwrap_err();
        assert!(err.to_string().contains("price"));
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn render_uses_label() {
        let record = json!({"id": "job_3", "type": "tiktok_upload", "status": "uploaded"})
            .as_object()
            .unwrap()
            .clone();
        let out = render("tiktok_uploads", &record);
        assert_eq!(
            out,
            "Upload TikTok Shop Aff: created job_3\n  type: tiktok_upload\n  status: uploaded\n"
        );
    }
}
