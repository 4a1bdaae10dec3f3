use fintrack_api::FintrackApiError;
use fintrack_auth::AuthError;
use thiserror::Error;

/// Shown when a request could not complete at all.
pub const NETWORK_ERROR_MESSAGE: &str = "An error occurred. Please try again.";
/// Shown when the server rejected a request without saying why.
pub const SERVER_FALLBACK_MESSAGE: &str = "Unknown error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally; no request was sent
    Validation,
    /// The request never completed
    Network,
    /// Non-2xx response
    Server,
    /// Durable token storage failed
    Storage,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Validation => "Validation Error",
            Self::Network => "Network Error",
            Self::Server => "Error",
            Self::Storage => "Storage Error",
        }
    }
}

/// Failure handed to the rendering layer: what went wrong and the message
/// to display.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClientError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self {
            kind: ErrorKind::Network,
            message: NETWORK_ERROR_MESSAGE.to_string(),
        }
    }

    pub fn server(message: Option<&str>) -> Self {
        Self {
            kind: ErrorKind::Server,
            message: message.unwrap_or(SERVER_FALLBACK_MESSAGE).to_string(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Storage,
            message: message.into(),
        }
    }

    pub fn not_logged_in() -> Self {
        Self::validation("Please log in to continue.")
    }

    /// Only network failures are worth an immediate retry.
    pub fn is_retryable(&self) -> bool {
        self.kind == ErrorKind::Network
    }
}

impl From<FintrackApiError> for ClientError {
    fn from(err: FintrackApiError) -> Self {
        match err {
            FintrackApiError::Api(status, body) => {
                tracing::debug!("Server rejected request ({})", status);
                ClientError::server(body.message())
            }
            FintrackApiError::Internal(e) => {
                tracing::debug!("Request failed: {}", e);
                ClientError::network()
            }
        }
    }
}

impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        ClientError::storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_prefers_body_message() {
        let err = ClientError::server(Some("Invalid credentials"));
        assert_eq!(err.kind, ErrorKind::Server);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn server_error_without_body_uses_fallback() {
        assert_eq!(ClientError::server(None).message, SERVER_FALLBACK_MESSAGE);
    }

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(ClientError::network().is_retryable());
        assert!(!ClientError::server(None).is_retryable());
        assert!(!ClientError::validation("x").is_retryable());
    }

    #[test]
    fn storage_errors_keep_their_cause() {
        let err: ClientError = AuthError::TokenStorage("disk full".into()).into();
        assert_eq!(err.kind, ErrorKind::Storage);
        assert!(err.message.contains("disk full"));
    }
}
