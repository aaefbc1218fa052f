use std::sync::Arc;

use klartext_core::Config;
use klartext_llm::{build_http_client, create_provider, LLMError};
use klartext_pipeline::{ChainPipeline, PipelineOptions};
use klartext_segment::{GermanSegmenter, SentenceSegmenter};

/// Everything a request needs. Built once at start-up, read-only afterwards.
pub struct AppState {
    pub pipeline: ChainPipeline,
    pub segmenter: Arc<dyn SentenceSegmenter>,
    /// Prompt used when a chain request carries none.
    pub default_system_prompt: Option<String>,
}

impl AppState {
    pub fn new(
        pipeline: ChainPipeline,
        segmenter: Arc<dyn SentenceSegmenter>,
        default_system_prompt: Option<String>,
    ) -> Self {
        Self {
            pipeline,
            segmenter,
            default_system_prompt: default_system_prompt
                .map(|prompt| prompt.trim().to_string())
                .filter(|prompt| !prompt.is_empty()),
        }
    }

    /// Wires providers, pipeline and segmenter from configuration.
    ///
    /// Missing API keys are logged as warnings and do not fail start-up; the
    /// chain endpoint reports them per request instead.
    pub fn from_config(config: &Config) -> Result<Self, LLMError> {
        for var in config.missing_credentials() {
            log::warn!(
                "{} is not set; /chain-models will fail until it is provided",
                var
            );
        }

        let client = build_http_client()?;
        let drafter = create_provider(&config.chain.drafter, &config.providers, &client)?;
        let simplifier = create_provider(&config.chain.simplifier, &config.providers, &client)?;

        log::info!(
            "Chain: stage A = {}, stage B = {}, include_intermediate = {}",
            drafter.name(),
            simplifier.name(),
            config.chain.include_intermediate
        );

        let pipeline = ChainPipeline::new(drafter, simplifier, PipelineOptions::from_config(config));
        let segmenter: Arc<dyn SentenceSegmenter> = Arc::new(
            GermanSegmenter::new().with_abbreviations(&config.segmenter.extra_abbreviations),
        );

        Ok(Self::new(
            pipeline,
            segmenter,
            config.chain.default_system_prompt.clone(),
        ))
    }
}
