pub mod protocol;
pub mod provider;
pub mod provider_factory;
pub mod providers;

pub use provider::{GenerationRequest, LLMError, Result, TextProvider};
pub use provider_factory::{build_http_client, create_provider, AVAILABLE_PROVIDERS};
pub use providers::{GeminiProvider, OpenAIProvider};
