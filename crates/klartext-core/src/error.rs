use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// One entry per provider whose API key is absent, e.g. `"A (gemini)"`.
    #[error("missing credentials for provider {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    #[error("failed to read config file {path}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
