pub mod openrouter;
pub mod scrapecreators;

use thiserror::Error;

/// Failure talking to a third-party provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{0} API key not configured")]
    NotConfigured(&'static str),

    /// The request never produced a response (connect error, timeout).
    #[error("provider unreachable: {0}")]
    Unavailable(String),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        ProviderError::Unavailable(err.to_string())
    }
}

/// Pull `error.message` (or a plain string `error`) out of a provider error body.
pub(crate) fn error_message(body: &serde_json::Value) -> Option<String> {
    let error = body.get("error")?;
    error
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| error.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::error_message;
    use serde_json::json;

    #[test]
    fn given_nested_error_message_should_extract_it() {
        let body = json!({"error": {"message": "quota exceeded"}});
        assert_eq!(error_message(&body).as_deref(), Some("quota exceeded"));
    }

    #[test]
    fn given_string_error_should_extract_it() {
        let body = json!({"error": "bad url"});
        assert_eq!(error_message(&body).as_deref(), Some("bad url"));
    }

    #[test]
    fn given_body_without_error_should_return_none() {
        assert_eq!(error_message(&json!({"ok": true})), None);
    }
}
