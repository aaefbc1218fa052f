use std::fmt;

use klartext_core::ConfigurationError;
use klartext_llm::LLMError;
use thiserror::Error;

/// Position of a provider in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Drafter, answers the caller prompt.
    A,
    /// Simplifier, rewrites the draft.
    B,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::A => "A",
            Stage::B => "B",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A provider call that did not produce usable text.
#[derive(Debug, Error)]
#[error("provider {stage} ({provider}) failed: {source}")]
pub struct ProviderError {
    pub stage: Stage,
    pub provider: String,
    #[source]
    pub source: LLMError,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl PipelineError {
    /// Machine-readable error kind for response bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Configuration(_) => "configuration_error",
            PipelineError::Provider(_) => "provider_error",
        }
    }

    /// Stage at which the chain stopped; `None` when no provider was called.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PipelineError::Configuration(_) => None,
            PipelineError::Provider(error) => Some(error.stage),
        }
    }
}
