use std::sync::Arc;
use std::time::{Duration, Instant};

use klartext_core::{Config, ConfigurationError};
use klartext_llm::{GenerationRequest, LLMError, TextProvider};

use crate::error::{PipelineError, ProviderError, Stage};

/// System instruction of stage B. Callers cannot replace it; operators can
/// through `chain.simplification_instruction`.
pub const SIMPLIFICATION_INSTRUCTION: &str = "Du bist ein Assistent, der medizinische Texte \
in einfache Sprache übersetzt. Schreibe den folgenden Text so um, dass ihn ein zehnjähriges \
Kind verstehen kann. Verwende kurze Sätze und alltägliche Wörter, erkläre Fachbegriffe mit \
einfachen Vergleichen, lass keine wichtigen Informationen weg und antworte ausschließlich \
auf Deutsch.";

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub simplification_instruction: String,
    /// Return the drafter output alongside the final text.
    pub include_intermediate: bool,
    /// Deadline per provider call.
    pub stage_timeout: Option<Duration>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            simplification_instruction: SIMPLIFICATION_INSTRUCTION.to_string(),
            include_intermediate: false,
            stage_timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            simplification_instruction: config
                .chain
                .simplification_instruction
                .clone()
                .unwrap_or_else(|| SIMPLIFICATION_INSTRUCTION.to_string()),
            include_intermediate: config.chain.include_intermediate,
            stage_timeout: config.stage_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOutput {
    pub final_output: String,
    /// Drafter text; `Some` only with `include_intermediate`.
    pub intermediate_output: Option<String>,
}

/// Sends a prompt to the drafter, then the draft to the simplifier.
///
/// Built once at start-up and shared read-only between requests. The two
/// calls are strictly sequential and the first failure ends the run; there
/// is no retry and no fallback provider.
pub struct ChainPipeline {
    drafter: Arc<dyn TextProvider>,
    simplifier: Arc<dyn TextProvider>,
    options: PipelineOptions,
}

impl ChainPipeline {
    pub fn new(
        drafter: Arc<dyn TextProvider>,
        simplifier: Arc<dyn TextProvider>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            drafter,
            simplifier,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    pub fn drafter(&self) -> &dyn TextProvider {
        self.drafter.as_ref()
    }

    pub fn simplifier(&self) -> &dyn TextProvider {
        self.simplifier.as_ref()
    }

    /// Fails when either provider lacks an API key.
    pub fn ensure_credentials(&self) -> Result<(), ConfigurationError> {
        let missing: Vec<String> = [(Stage::A, &self.drafter), (Stage::B, &self.simplifier)]
            .into_iter()
            .filter(|(_, provider)| !provider.has_credentials())
            .map(|(stage, provider)| format!("{} ({})", stage, provider.name()))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigurationError::MissingCredentials(missing))
        }
    }

    /// Runs both stages and returns the simplified text.
    pub async fn run(&self, prompt: &str) -> Result<String, PipelineError> {
        Ok(self.run_chain(prompt).await?.final_output)
    }

    /// Runs both stages and keeps the draft when configured to.
    ///
    /// Dropping the returned future drops the in-flight provider request.
    pub async fn run_chain(&self, prompt: &str) -> Result<ChainOutput, PipelineError> {
        self.ensure_credentials()?;

        let draft = self
            .call_stage(Stage::A, self.drafter.as_ref(), &GenerationRequest::user(prompt))
            .await?;

        let intermediate_output = self.options.include_intermediate.then(|| draft.clone());
        let request = GenerationRequest::user(draft)
            .with_system_instruction(self.options.simplification_instruction.as_str());

        let final_output = self
            .call_stage(Stage::B, self.simplifier.as_ref(), &request)
            .await?;

        Ok(ChainOutput {
            final_output,
            intermediate_output,
        })
    }

    async fn call_stage(
        &self,
        stage: Stage,
        provider: &dyn TextProvider,
        request: &GenerationRequest,
    ) -> Result<String, ProviderError> {
        let started = Instant::now();
        log::debug!("Stage {} ({}) started", stage, provider.name());

        let result = match self.options.stage_timeout {
            Some(limit) => tokio::time::timeout(limit, provider.generate(request))
                .await
                .unwrap_or(Err(LLMError::Timeout(limit))),
            None => provider.generate(request).await,
        };

        // Providers outside this workspace may not reject blank text themselves.
        let result = result.and_then(|text| {
            if text.trim().is_empty() {
                Err(LLMError::EmptyResponse)
            } else {
                Ok(text)
            }
        });

        let elapsed = started.elapsed().as_millis();
        match result {
            Ok(text) => {
                log::info!(
                    "Stage {} ({}) completed in {}ms, {} chars",
                    stage,
                    provider.name(),
                    elapsed,
                    text.chars().count()
                );
                Ok(text)
            }
            Err(source) => {
                log::warn!(
                    "Stage {} ({}) failed after {}ms: {}",
                    stage,
                    provider.name(),
                    elapsed,
                    source
                );
                Err(ProviderError {
                    stage,
                    provider: provider.name().to_string(),
                    source,
                })
            }
        }
    }
}
