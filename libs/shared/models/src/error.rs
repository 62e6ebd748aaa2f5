use thiserror::Error;

/// Failure taxonomy shared by every cell. `Validation` never reaches the
/// network; the rest carry whatever the backend answered.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authorization error ({status}): {message}")]
    Authorization { status: u16, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Request failed: {message}")]
    Request { status: Option<u16>, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map a non-success HTTP response to the matching variant, pulling the
    /// human-readable message out of the body when the server sent one.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => ApiError::Authorization { status, message },
            409 => ApiError::Conflict(message),
            _ => ApiError::Request {
                status: Some(status),
                message,
            },
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Authorization { status, .. } => Some(*status),
            ApiError::Request { status, .. } => *status,
            ApiError::Conflict(_) => Some(409),
            ApiError::Validation(_) | ApiError::Internal(_) => None,
        }
    }

    pub fn is_authorization(&self) -> bool {
        matches!(self, ApiError::Authorization { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Request {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// The backend answers errors as `{"error": ...}`, DRF validation as
/// `{"detail": ...}` or `{"non_field_errors": [...]}`. Fall back to the raw
/// body text.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error", "detail"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
        if let Some(message) = value
            .get("non_field_errors")
            .and_then(|v| v.get(0))
            .and_then(|v| v.as_str())
        {
            return message.to_string();
        }
    }
    body.trim().to_string()
}
