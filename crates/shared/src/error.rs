use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload the service may attach to a failed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ApiError {
    #[serde(alias = "error")]
    pub message: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Extracts a message from a raw error body, if it carries one.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str::<Self>(body)
            .ok()
            .filter(|err| !err.message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_message_or_error_key() {
        assert_eq!(
            ApiError::from_body(r#"{"message":"insufficient balance"}"#),
            Some(ApiError::new("insufficient balance"))
        );
        assert_eq!(
            ApiError::from_body(r#"{"error":"not found"}"#),
            Some(ApiError::new("not found"))
        );
        assert_eq!(ApiError::from_body("<html>bad gateway</html>"), None);
        assert_eq!(ApiError::from_body(r#"{"message":"  "}"#), None);
    }
}
