use thiserror::Error;

pub type AppResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// A required request field was absent
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The numeric-suffix search hit its probe cap before collecting
    /// three free candidates
    #[error("no free suffix variants of {base:?} within {probes} probes")]
    SuggestionsExhausted { base: String, probes: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse file: {0}")]
    Parse(toml::de::Error),

    #[error("invalid environment variable {0}: {1}")]
    InvalidEnv(String, String),
}
