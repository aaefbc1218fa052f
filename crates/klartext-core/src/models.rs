//! Request and response bodies shared by the HTTP surface and its tests.

use serde::{Deserialize, Serialize};

/// Body of `POST /chain-models`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl PromptRequest {
    /// The caller prompt, or `None` when it is absent or blank.
    pub fn prompt(&self) -> Option<&str> {
        self.system_prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainResponse {
    pub final_output: String,
    /// Drafter output, only present when the service runs with `include_intermediate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intermediate_output: Option<String>,
}

/// Body of `POST /tokenize-sentences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextPayload {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencesResponse {
    pub sentences: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_prompt_is_treated_as_missing() {
        let request: PromptRequest =
            serde_json::from_str(r#"{"system_prompt": "   "}"#).unwrap();
        assert_eq!(request.prompt(), None);

        let request: PromptRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.prompt(), None);
    }

    #[test]
    fn prompt_is_trimmed() {
        let request: PromptRequest =
            serde_json::from_str(r#"{"system_prompt": "  Erkläre Diabetes. "}"#).unwrap();
        assert_eq!(request.prompt(), Some("Erkläre Diabetes."));
    }

    #[test]
    fn intermediate_output_is_omitted_when_absent() {
        let response = ChainResponse {
            final_output: "Zucker im Blut.".to_string(),
            intermediate_output: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "final_output": "Zucker im Blut." }));
    }
}
