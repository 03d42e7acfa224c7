//! In-process stand-in for the backend that records every request it sees.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::StatusCode,
    middleware::{from_fn_with_state, Next},
    response::Response,
    Router,
};
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Call>>>);

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

async fn record(State(recorder): State<Recorder>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();
    let header = |name: &str| {
        parts
            .headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };

    recorder.0.lock().unwrap().push(Call {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: header("authorization"),
        request_id: header("x-request-id"),
        body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
    });

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

/// Serve `app` on an ephemeral port, recording every request (including
/// ones no route matches). Returns the base URL and the recorder.
pub async fn spawn_backend(app: Router) -> (String, Recorder) {
    let recorder = Recorder::default();
    let app = app
        .fallback(|| async { StatusCode::NOT_FOUND })
        .layer(from_fn_with_state(recorder.clone(), record));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), recorder)
}
