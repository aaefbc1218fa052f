use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Request timed out after {}s", .0.as_secs_f32())]
    Timeout(Duration),

    #[error("Configuration error: {0}")]
    Config(String),
}

// Request URLs can carry credentials, so they never reach the message.
impl From<reqwest::Error> for LLMError {
    fn from(error: reqwest::Error) -> Self {
        LLMError::Http(error.without_url())
    }
}

pub type Result<T> = std::result::Result<T, LLMError>;

/// A single non-streaming generation call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub user_content: String,
}

impl GenerationRequest {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            user_content: content.into(),
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short provider identifier used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether an API key is available. Checked before every chain run so a
    /// service started without keys reports a configuration error instead
    /// of sending unauthenticated requests.
    fn has_credentials(&self) -> bool;

    /// Generate a complete response and return its text.
    ///
    /// Implementations fail with [`LLMError::MalformedResponse`] when the
    /// payload lacks the text field and with [`LLMError::EmptyResponse`]
    /// when the text is blank.
    async fn generate(&self, request: &GenerationRequest) -> Result<String>;
}

/// Rejects blank provider output.
pub(crate) fn non_empty_text(text: String) -> Result<String> {
    if text.trim().is_empty() {
        Err(LLMError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_system_instruction() {
        let request = GenerationRequest::user("Hallo").with_system_instruction("Sei freundlich.");
        assert_eq!(request.user_content, "Hallo");
        assert_eq!(request.system_instruction.as_deref(), Some("Sei freundlich."));
    }

    #[test]
    fn blank_text_is_empty_response() {
        assert!(matches!(
            non_empty_text(" \n ".to_string()),
            Err(LLMError::EmptyResponse)
        ));
        assert_eq!(non_empty_text("Text".to_string()).unwrap(), "Text");
    }

    #[test]
    fn timeout_message_mentions_seconds() {
        let error = LLMError::Timeout(Duration::from_millis(1500));
        assert_eq!(error.to_string(), "Request timed out after 1.5s");
    }
}
