//! Client for the content-generation backend's admin surface.
//!
//! - [`auth::AuthGate`] exchanges a username for a bearer token and keeps
//!   the session on disk.
//! - [`data_provider::ResourceAdapter`] maps generic list/get/create calls
//!   onto the backend's fixed endpoints, described in [`resources`].
//!
//! Both share one [`http::ApiClient`], so every data call carries the
//! token the auth gate persisted.

use std::sync::Arc;

use za_core::session_store::SessionStore;

pub mod auth;
pub mod data_provider;
pub mod error;
pub mod http;
pub mod resources;

pub use auth::{AuthGate, AuthProvider};
pub use data_provider::{DataProvider, ListParams, ListResult, Record, ResourceAdapter};
pub use error::ClientError;

/// Auth gate and resource adapter wired to the same backend and session.
pub struct AdminClient {
    pub auth: AuthGate,
    pub data: ResourceAdapter,
    api: Arc<http::ApiClient>,
}

impl AdminClient {
    pub fn new(base_url: &str, session: SessionStore) -> Result<Self, ClientError> {
        let api = Arc::new(http::ApiClient::new(base_url, session)?);
        Ok(Self {
            auth: AuthGate::new(api.clone()),
            data: ResourceAdapter::new(api.clone()),
            api,
        })
    }

    pub fn base_url(&self) -> &reqwest::Url {
        self.api.base_url()
    }
}
