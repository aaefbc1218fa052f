//! LLM Providers
//!
//! Non-streaming text generation against the supported remote APIs.

pub(crate) mod common;
pub mod gemini;
pub mod openai;

pub use gemini::GeminiProvider;
pub use openai::OpenAIProvider;
