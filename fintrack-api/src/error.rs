use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum FintrackApiError {
    /// Non-2xx response; the body is whatever JSON the server sent back.
    Api(StatusCode, ErrorBody),
    /// The request never produced a usable response.
    Internal(ApiError),
}

impl FintrackApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FintrackApiError::Api(status, _) => Some(*status),
            FintrackApiError::Internal(_) => None,
        }
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            FintrackApiError::Api(_, body) => body.message(),
            FintrackApiError::Internal(_) => None,
        }
    }
}

impl From<ApiError> for FintrackApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                let body = serde_json::from_str::<ErrorBody>(&detail).unwrap_or_default();
                FintrackApiError::Api(status, body)
            }
            e => FintrackApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for FintrackApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FintrackApiError::Internal(e) => write!(f, "Internal error: {}", e),
            FintrackApiError::Api(status, body) => match body.message() {
                Some(message) => write!(f, "({}) {}", status, message),
                None => write!(f, "({}) no error message", status),
            },
        }
    }
}

impl std::error::Error for FintrackApiError {}

/// Error payload. Depending on the endpoint the server fills `message`,
/// `error`, or both.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_takes_precedence() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"Invalid credentials","error":"auth"}"#).unwrap();
        assert_eq!(body.message(), Some("Invalid credentials"));
    }

    #[test]
    fn falls_back_to_error_field() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"Expense not found"}"#).unwrap();
        assert_eq!(body.message(), Some("Expense not found"));
    }

    #[test]
    fn blank_message_is_ignored() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"  "}"#).unwrap();
        assert_eq!(body.message(), None);
    }
}
