//! Two-stage text chain: a drafter answers the caller prompt, a simplifier
//! rewrites the draft in plain language.

pub mod error;
pub mod pipeline;

pub use error::{PipelineError, ProviderError, Stage};
pub use pipeline::{ChainOutput, ChainPipeline, PipelineOptions, SIMPLIFICATION_INSTRUCTION};
