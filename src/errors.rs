//! Error type shared by the credential store, the request client and the
//! navigator. Backend error bodies are carried verbatim so callers can decide
//! how much of them to show.

use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    #[error("Not authorized ({status}): {message}")]
    AuthRejected { status: u16, message: String },
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    #[error("Navigation error: {0}")]
    Navigation(String),
}

impl AppError {
    /// True for 401/403 answers; callers react to these by logging out.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, AppError::AuthRejected { .. })
    }

    /// HTTP status of a backend error response, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::AuthRejected { status, .. } | AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Extracts the `detail` field the backend puts in JSON error bodies.
    pub fn detail(&self) -> Option<String> {
        let (AppError::AuthRejected { message, .. } | AppError::Http { message, .. }) = self else {
            return None;
        };
        let value: serde_json::Value = serde_json::from_str(message).ok()?;
        match value.get("detail")? {
            serde_json::Value::String(detail) => Some(detail.clone()),
            other => Some(other.to_string()),
        }
    }
}
