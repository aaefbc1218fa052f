//! Google Gemini `generateContent` format.
//!
//! # Example request
//! ```json
//! {
//!   "contents": [{ "role": "user", "parts": [{ "text": "Erkläre Diabetes." }] }],
//!   "systemInstruction": { "parts": [{ "text": "..." }] }
//! }
//! ```
//!
//! The generated text lives in `candidates[0].content.parts[*].text`.

use serde::{Deserialize, Serialize};

use crate::provider::{non_empty_text, GenerationRequest, LLMError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<GeminiContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"; omitted for system instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GeminiContent {
    fn text(role: Option<&str>, text: &str) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![GeminiPart {
                text: Some(text.to_string()),
            }],
        }
    }
}

impl From<&GenerationRequest> for GenerateContentRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![GeminiContent::text(Some("user"), &request.user_content)],
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|instruction| GeminiContent::text(None, instruction)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    #[serde(default)]
    pub content: Option<GeminiContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all text parts joined.
    pub fn into_text(self) -> Result<String> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return match self.prompt_feedback.and_then(|feedback| feedback.block_reason) {
                Some(reason) => Err(LLMError::Api(format!("Gemini blocked the prompt: {}", reason))),
                None => Err(LLMError::MalformedResponse(
                    "Gemini response contains no candidates".to_string(),
                )),
            };
        };

        let parts = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default();
        let texts: Vec<String> = parts.into_iter().filter_map(|part| part.text).collect();

        if texts.is_empty() {
            let reason = candidate
                .finish_reason
                .map(|reason| format!(" (finish reason: {})", reason))
                .unwrap_or_default();
            return Err(LLMError::MalformedResponse(format!(
                "Gemini candidate has no text parts{}",
                reason
            )));
        }

        non_empty_text(texts.concat())
    }
}
