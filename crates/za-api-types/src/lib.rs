//! Wire types for the content-generation backend.
//!
//! Request/response shapes for the token exchange and job endpoints, plus
//! the typed create forms in [`forms`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use za_core::types::Role;

pub mod forms;

// ── Auth ──

/// Body of `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenRequest {
    pub user_id: String,
    pub role: Role,
}

/// Response of `POST /auth/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

// ── Jobs ──

/// Envelope returned by `GET /tiktok/jobs`. A missing or null `data` is an
/// empty listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct JobsEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<serde_json::Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Vec<serde_json::Value>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// A generation/upload job as reported by the backend.
///
/// Only the fields every job carries are typed; the rest (`payload`,
/// `updated_at`, ...) stay in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobRecord {
    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.extra.get("payload")
    }
}
