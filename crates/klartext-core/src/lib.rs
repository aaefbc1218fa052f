pub mod config;
pub mod error;
pub mod models;

pub use config::{
    ChainConfig, Config, GeminiConfig, OpenAIConfig, ProviderConfigs, SegmenterConfig,
};
pub use error::ConfigurationError;
pub use models::{ChainResponse, PromptRequest, SentencesResponse, TextPayload};
