use thiserror::Error;
use za_core::session_store::SessionStoreError;

/// Errors surfaced by the auth gate and the resource adapter.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The token endpoint refused the login.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// A guarded action was attempted without a persisted token.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The resource does not support this operation.
    #[error("Unsupported resource {operation}: {resource}")]
    UnsupportedOperation {
        operation: &'static str,
        resource: String,
    },

    /// Stubbed mutation.
    #[error("not implemented: {operation}")]
    NotImplemented { operation: &'static str },

    /// The backend answered with a non-success status.
    #[error("backend error (status {status}): {message}")]
    Http { status: u16, message: String },

    /// The backend could not be reached.
    #[error("could not connect to backend: {0}")]
    Connect(String),

    /// Any other transport-level failure.
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body was not the JSON we expected.
    #[error("could not decode backend response: {0}")]
    Decode(String),

    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("session store: {0}")]
    Session(#[from] SessionStoreError),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            ClientError::Connect(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl ClientError {
    pub(crate) fn unsupported(operation: &'static str, resource: &str) -> Self {
        ClientError::UnsupportedOperation {
            operation,
            resource: resource.to_string(),
        }
    }

    /// HTTP status when the backend rejected the call.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_names_operation_and_resource() {
        let err = ClientError::unsupported("getOne", "admin_panel");
        assert_eq!(err.to_string(), "Unsupported resource getOne: admin_panel");
    }

    #[test]
    fn status_only_for_http_errors() {
        let err = ClientError::Http {
            status: 403,
            message: "Forbidden".into(),
        };
        assert_eq!(err.status(), Some(403));
        assert_eq!(ClientError::NotAuthenticated.status(), None);
    }
}
