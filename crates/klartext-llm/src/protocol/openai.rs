//! OpenAI chat completions format (non-streaming).

use serde::{Deserialize, Serialize};

use crate::provider::{non_empty_text, GenerationRequest, LLMError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

impl ChatCompletionRequest {
    pub fn new(model: &str, request: &GenerationRequest) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(instruction) = &request.system_instruction {
            messages.push(ChatMessage::system(instruction.clone()));
        }
        messages.push(ChatMessage::user(request.user_content.clone()));

        Self {
            model: model.to_string(),
            messages,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ResponseMessage>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub refusal: Option<String>,
}

impl ChatCompletionResponse {
    pub fn into_text(self) -> Result<String> {
        let choice = self.choices.into_iter().next().ok_or_else(|| {
            LLMError::MalformedResponse("OpenAI response contains no choices".to_string())
        })?;
        let message = choice.message.ok_or_else(|| {
            LLMError::MalformedResponse("OpenAI choice has no message".to_string())
        })?;

        match (message.content, message.refusal) {
            (Some(content), _) => non_empty_text(content),
            (None, Some(refusal)) => Err(LLMError::Api(format!("OpenAI refused: {}", refusal))),
            (None, None) => Err(LLMError::MalformedResponse(format!(
                "OpenAI message has no content (finish reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}
