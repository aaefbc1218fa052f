use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::provider::{LLMError, Result};

/// Maps non-success statuses to errors and decodes the body as `T`.
///
/// Decoding failures are reported as [`LLMError::MalformedResponse`]: the
/// provider answered, but not with the shape the chain can read.
pub(crate) async fn read_json<T: DeserializeOwned>(provider: &str, response: Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(LLMError::Auth(format!(
                "{} authentication failed: {}. Please check your API key.",
                provider, text
            )));
        }
        return Err(LLMError::Api(format!("{} API error: HTTP {}: {}", provider, status, text)));
    }

    serde_json::from_str::<T>(&text).map_err(|e| {
        LLMError::MalformedResponse(format!("{} returned an unreadable body: {}", provider, e))
    })
}

pub(crate) fn trim_base_url(url: impl Into<String>) -> String {
    url.into().trim_end_matches('/').to_string()
}
