//! Error types for backend requests

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the backend
///
/// `Application` is a failure the backend reported itself (`success: false`).
/// Every other variant is a transport or parse failure.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status and no envelope
    #[error("Unexpected HTTP status {status}")]
    Status { status: u16, body: String },

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend reported `success: false`, with its message if it sent one
    #[error("Backend error: {}", .0.as_deref().unwrap_or("no message"))]
    Application(Option<String>),
}

impl Error {
    pub fn is_application(&self) -> bool {
        matches!(self, Error::Application(_))
    }

    /// Message suitable for the UI
    ///
    /// Application failures surface the server message verbatim; transport
    /// and parse failures never leak the raw error and use `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Error::Application(Some(message)) if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_application() {
        let err = Error::Application(Some("Feed not found".to_string()));
        assert!(err.is_application());
        assert_eq!(err.user_message("fallback"), "Feed not found");
    }

    #[test]
    fn test_user_message_application_without_message() {
        assert_eq!(Error::Application(None).user_message("fallback"), "fallback");
        assert_eq!(
            Error::Application(Some(String::new())).user_message("fallback"),
            "fallback"
        );
    }

    #[test]
    fn test_user_message_hides_transport_details() {
        let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = Error::from(json_err);
        assert!(!err.is_application());
        assert_eq!(err.user_message("Failed to load episodes"), "Failed to load episodes");

        let err = Error::Status {
            status: 500,
            body: "Internal Server Error".to_string(),
        };
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
