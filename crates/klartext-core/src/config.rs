use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

const CONFIG_FILE_PATH: &str = "klartext.toml";

pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

const DEFAULT_STAGE_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub providers: ProviderConfigs,
    pub chain: ChainConfig,
    pub segmenter: SegmenterConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfigs {
    pub gemini: GeminiConfig,
    pub openai: OpenAIConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

/// Settings of the two-stage chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Provider kind serving stage A.
    pub drafter: String,
    /// Provider kind serving stage B.
    pub simplifier: String,
    pub include_intermediate: bool,
    /// Used when a request carries no prompt. `None` makes the prompt mandatory.
    pub default_system_prompt: Option<String>,
    /// Replaces the built-in simplification instruction of stage B.
    pub simplification_instruction: Option<String>,
    /// Per-stage deadline; `0` disables it.
    pub stage_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            drafter: "gemini".to_string(),
            simplifier: "openai".to_string(),
            include_intermediate: false,
            default_system_prompt: None,
            simplification_instruction: None,
            stage_timeout_secs: DEFAULT_STAGE_TIMEOUT_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Additional abbreviations (with trailing dot) that never end a sentence.
    pub extra_abbreviations: Vec<String>,
}

fn parse_bool_env(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl Config {
    /// Builds the configuration from defaults, an optional TOML file and the
    /// process environment, in that order of precedence (environment wins).
    ///
    /// Without an explicit `path`, `klartext.toml` in the working directory is
    /// read when it exists.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(CONFIG_FILE_PATH).exists() => {
                Self::from_file(Path::new(CONFIG_FILE_PATH))?
            }
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::File {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str::<Config>(&content).map_err(|source| {
            ConfigurationError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Overlays environment values. `lookup` is `std::env::var` in production.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(GOOGLE_API_KEY) {
            self.providers.gemini.api_key = key.trim().to_string();
        }
        if let Some(model) = lookup("GEMINI_MODEL").and_then(non_empty) {
            self.providers.gemini.model = Some(model);
        }
        if let Some(base_url) = lookup("GEMINI_BASE_URL").and_then(non_empty) {
            self.providers.gemini.base_url = Some(base_url);
        }
        if let Some(key) = lookup(OPENAI_API_KEY) {
            self.providers.openai.api_key = key.trim().to_string();
        }
        if let Some(model) = lookup("OPENAI_MODEL").and_then(non_empty) {
            self.providers.openai.model = Some(model);
        }
        if let Some(base_url) = lookup("OPENAI_BASE_URL").and_then(non_empty) {
            self.providers.openai.base_url = Some(base_url);
        }
        if let Some(prompt) = lookup("KLARTEXT_DEFAULT_PROMPT").and_then(non_empty) {
            self.chain.default_system_prompt = Some(prompt);
        }
        if let Some(flag) = lookup("KLARTEXT_INCLUDE_INTERMEDIATE") {
            self.chain.include_intermediate = parse_bool_env(&flag);
        }
        if let Some(instruction) = lookup("KLARTEXT_SIMPLIFICATION_INSTRUCTION").and_then(non_empty)
        {
            self.chain.simplification_instruction = Some(instruction);
        }
        if let Some(raw) = lookup("KLARTEXT_STAGE_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => self.chain.stage_timeout_secs = secs,
                Err(_) => log::warn!(
                    "Ignoring KLARTEXT_STAGE_TIMEOUT_SECS={:?}: not a number of seconds",
                    raw
                ),
            }
        }
    }

    pub fn stage_timeout(&self) -> Option<Duration> {
        match self.chain.stage_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Environment variables whose absence leaves a configured stage without
    /// credentials. Empty when both stages can run.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        for kind in [&self.chain.drafter, &self.chain.simplifier] {
            let absent = match kind.as_str() {
                "gemini" if self.providers.gemini.api_key.is_empty() => Some(GOOGLE_API_KEY),
                "openai" if self.providers.openai.api_key.is_empty() => Some(OPENAI_API_KEY),
                _ => None,
            };
            if let Some(var) = absent {
                if !missing.contains(&var) {
                    missing.push(var);
                }
            }
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_bool_env_true_values() {
        for value in ["1", "true", "TRUE", " yes ", "Y", "on"] {
            assert!(parse_bool_env(value), "value {value:?} should be true");
        }
    }

    #[test]
    fn parse_bool_env_false_values() {
        for value in ["0", "false", "no", "off", "", "  "] {
            assert!(!parse_bool_env(value), "value {value:?} should be false");
        }
    }

    #[test]
    fn defaults_chain_gemini_into_openai() {
        let config = Config::default();
        assert_eq!(config.chain.drafter, "gemini");
        assert_eq!(config.chain.simplifier, "openai");
        assert!(!config.chain.include_intermediate);
        assert!(config.chain.default_system_prompt.is_none());
        assert_eq!(config.stage_timeout(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn missing_credentials_lists_both_keys() {
        let config = Config::default();
        assert_eq!(
            config.missing_credentials(),
            vec![GOOGLE_API_KEY, OPENAI_API_KEY]
        );
    }

    #[test]
    fn missing_credentials_empty_when_keys_present() {
        let mut config = Config::default();
        config.apply_env(lookup_from(&[
            (GOOGLE_API_KEY, "AIza-test"),
            (OPENAI_API_KEY, "sk-test"),
        ]));
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn missing_credentials_follows_stage_assignment() {
        let mut config = Config::default();
        config.chain.drafter = "openai".to_string();
        config.providers.openai.api_key = "sk-test".to_string();
        assert!(config.missing_credentials().is_empty());
    }

    #[test]
    fn env_overrides_chain_settings() {
        let mut config = Config::default();
        config.apply_env(lookup_from(&[
            ("KLARTEXT_INCLUDE_INTERMEDIATE", "yes"),
            ("KLARTEXT_DEFAULT_PROMPT", "Du bist ein hilfreicher Assistent."),
            ("KLARTEXT_STAGE_TIMEOUT_SECS", "0"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
        ]));

        assert!(config.chain.include_intermediate);
        assert_eq!(
            config.chain.default_system_prompt.as_deref(),
            Some("Du bist ein hilfreicher Assistent.")
        );
        assert_eq!(config.stage_timeout(), None);
        assert_eq!(config.providers.gemini.model.as_deref(), Some("gemini-1.5-pro"));
    }

    #[test]
    fn invalid_timeout_keeps_previous_value() {
        let mut config = Config::default();
        config.apply_env(lookup_from(&[("KLARTEXT_STAGE_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.chain.stage_timeout_secs, DEFAULT_STAGE_TIMEOUT_SECS);
    }

    #[test]
    fn blank_model_does_not_override() {
        let mut config = Config::default();
        config.providers.openai.model = Some("gpt-4o".to_string());
        config.apply_env(lookup_from(&[("OPENAI_MODEL", "  ")]));
        assert_eq!(config.providers.openai.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn file_values_are_overridden_by_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[providers.gemini]
api_key = "from-file"
model = "gemini-1.5-flash"

[chain]
include_intermediate = true
stage_timeout_secs = 15

[segmenter]
extra_abbreviations = ["Pat."]
"#
        )
        .unwrap();

        let mut config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.providers.gemini.api_key, "from-file");
        assert_eq!(config.chain.stage_timeout_secs, 15);
        assert_eq!(config.segmenter.extra_abbreviations, vec!["Pat.".to_string()]);
        // Sections not present in the file keep their defaults.
        assert_eq!(config.chain.simplifier, "openai");

        config.apply_env(lookup_from(&[(GOOGLE_API_KEY, "from-env")]));
        assert_eq!(config.providers.gemini.api_key, "from-env");
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let result = Config::from_file(Path::new("/nonexistent/klartext.toml"));
        assert!(matches!(result, Err(ConfigurationError::File { .. })));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chain\ninclude_intermediate = ").unwrap();
        let result = Config::from_file(file.path());
        assert!(matches!(result, Err(ConfigurationError::Parse { .. })));
    }
}
