//! Provider Factory
//!
//! Creates text providers from configuration.

use std::sync::Arc;
use std::time::Duration;

use klartext_core::ProviderConfigs;
use reqwest::Client;

use crate::provider::{LLMError, TextProvider};
use crate::providers::{GeminiProvider, OpenAIProvider};

/// Available provider types
pub const AVAILABLE_PROVIDERS: &[&str] = &["gemini", "openai"];

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// One client per process; providers clone it and share its pool.
pub fn build_http_client() -> Result<Client, LLMError> {
    Ok(Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?)
}

/// Create the provider of the given kind.
///
/// A missing API key does not fail construction: the provider reports
/// `has_credentials() == false` and the chain refuses to call it.
pub fn create_provider(
    kind: &str,
    configs: &ProviderConfigs,
    client: &Client,
) -> Result<Arc<dyn TextProvider>, LLMError> {
    match kind {
        "gemini" => {
            let gemini_config = &configs.gemini;
            let mut provider =
                GeminiProvider::new(&gemini_config.api_key).with_client(client.clone());

            if let Some(base_url) = &gemini_config.base_url {
                if !base_url.is_empty() {
                    provider = provider.with_base_url(base_url);
                }
            }

            if let Some(model) = &gemini_config.model {
                if !model.is_empty() {
                    provider = provider.with_model(model);
                }
            }

            log::info!("Created gemini provider with model '{}'", provider.model());
            Ok(Arc::new(provider))
        }

        "openai" => {
            let openai_config = &configs.openai;
            let mut provider =
                OpenAIProvider::new(&openai_config.api_key).with_client(client.clone());

            if let Some(base_url) = &openai_config.base_url {
                if !base_url.is_empty() {
                    provider = provider.with_base_url(base_url);
                }
            }

            if let Some(model) = &openai_config.model {
                if !model.is_empty() {
                    provider = provider.with_model(model);
                }
            }

            log::info!("Created openai provider with model '{}'", provider.model());
            Ok(Arc::new(provider))
        }

        _ => Err(LLMError::Config(format!(
            "Unknown provider: {}. Available providers: {}",
            kind,
            AVAILABLE_PROVIDERS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use klartext_core::{GeminiConfig, OpenAIConfig};

    #[test]
    fn test_create_gemini_provider() {
        let configs = ProviderConfigs {
            gemini: GeminiConfig {
                api_key: "AIza-test123".to_string(),
                base_url: None,
                model: Some("gemini-1.5-pro".to_string()),
            },
            openai: OpenAIConfig::default(),
        };

        let provider = create_provider("gemini", &configs, &Client::new()).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert!(provider.has_credentials());
    }

    #[test]
    fn test_create_openai_provider_without_key() {
        let provider =
            create_provider("openai", &ProviderConfigs::default(), &Client::new()).unwrap();
        assert_eq!(provider.name(), "openai");
        assert!(!provider.has_credentials());
    }

    #[test]
    fn test_create_unknown_provider() {
        let result = create_provider("anthropic", &ProviderConfigs::default(), &Client::new());
        match result {
            Err(LLMError::Config(msg)) => {
                assert!(msg.contains("Unknown provider"));
                assert!(msg.contains("gemini, openai"));
            }
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client().is_ok());
    }
}
