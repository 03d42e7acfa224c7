//! Auth gate: token exchange, session persistence, and guard checks.
//!
//! Trust model: the backend issues a bearer token for the requested role and
//! enforces that role per endpoint. The client only persists what the backend
//! issued; it never mints credentials itself and does not validate token
//! expiry locally.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use tracing::Instrument;
use za_api_types::{TokenRequest, TokenResponse};
use za_core::types::{Role, Session};
use za_telemetry::tracing_setup::create_operation_span;

use crate::error::ClientError;
use crate::http::{error_message, ApiClient};

const TOKEN_PATH: &[&str] = &["auth", "token"];

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Exchange a username for a token and persist the resulting session.
    async fn login(&self, username: &str) -> Result<Session, ClientError>;

    /// Forget the persisted session. Never fails.
    async fn logout(&self);

    /// Fail with [`ClientError::NotAuthenticated`] when no token is held.
    async fn check_auth(&self) -> Result<(), ClientError>;

    /// Decide whether an error from a data call should end the session.
    async fn check_error(&self, error: &ClientError) -> Result<(), ClientError>;

    /// The persisted role, or [`Role::User`] when none is held.
    async fn get_permissions(&self) -> Role;
}

pub struct AuthGate {
    api: Arc<ApiClient>,
}

impl AuthGate {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// The session currently held, if any.
    pub fn identity(&self) -> Result<Option<Session>, ClientError> {
        Ok(self.api.session().load()?)
    }

    async fn exchange(&self, request: &TokenRequest, trace_id: &str) -> Result<String, ClientError> {
        let url = self.api.url(TOKEN_PATH)?;
        let resp = self
            .api
            .anonymous_request(Method::POST, url, trace_id)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let reason = error_message(&body, status.canonical_reason());
            return Err(ClientError::AuthenticationFailed(format!(
                "{reason} (HTTP {})",
                status.as_u16()
            )));
        }

        let body: TokenResponse = resp.json().await.map_err(|e| {
            ClientError::AuthenticationFailed(format!("token endpoint returned no access_token: {e}"))
        })?;
        if body.access_token.is_empty() {
            return Err(ClientError::AuthenticationFailed(
                "token endpoint returned an empty access_token".into(),
            ));
        }
        Ok(body.access_token)
    }
}

#[async_trait]
impl AuthProvider for AuthGate {
    async fn login(&self, username: &str) -> Result<Session, ClientError> {
        let role = Role::from_username(username);
        let (span, trace_id) = create_operation_span("login", "auth");

        async move {
            let request = TokenRequest {
                user_id: username.to_string(),
                role,
            };
            match self.exchange(&request, &trace_id).await {
                Ok(token) => {
                    let session = Session::new(token, role);
                    self.api.session().save(&session)?;
                    tracing::info!(%role, "logged in");
                    Ok(session)
                }
                Err(err) => {
                    // A failed login must not leave an older token usable.
                    if let Err(clear_err) = self.api.session().clear() {
                        tracing::warn!(%clear_err, "failed to clear previous session");
                    }
                    tracing::warn!(%err, "login rejected");
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn logout(&self) {
        if let Err(err) = self.api.session().clear() {
            tracing::warn!(%err, "failed to clear persisted session");
        } else {
            tracing::info!("logged out");
        }
    }

    async fn check_auth(&self) -> Result<(), ClientError> {
        match self.api.session().token()? {
            Some(_) => Ok(()),
            None => Err(ClientError::NotAuthenticated),
        }
    }

    async fn check_error(&self, error: &ClientError) -> Result<(), ClientError> {
        // Rejections are shown to the user; the session stays as it is.
        tracing::debug!(%error, status = ?error.status(), "data call failed");
        Ok(())
    }

    async fn get_permissions(&self) -> Role {
        match self.api.session().role() {
            Ok(role) => role.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%err, "could not read persisted role");
                Role::default()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
