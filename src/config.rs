use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Probe cap for the numeric-suffix suggestion search. Past this many
/// probes without three free candidates the search reports exhaustion
/// instead of looping forever.
pub const DEFAULT_MAX_SUFFIX_PROBES: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_max_suffix_probes")]
    pub max_suffix_probes: usize, // e.g. 10000
}

fn default_max_suffix_probes() -> usize {
    DEFAULT_MAX_SUFFIX_PROBES
}

impl Default for Config {
    fn default() -> Self {
        Self { max_suffix_probes: DEFAULT_MAX_SUFFIX_PROBES }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        let cfg: Self = toml::from_str(&data).map_err(ConfigError::Parse)?;
        Ok(cfg)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env");
        let max_suffix_probes = match std::env::var("NAMECLAIM_MAX_SUFFIX_PROBES") {
            Ok(v) => v.parse().map_err(|_| {
                ConfigError::InvalidEnv("NAMECLAIM_MAX_SUFFIX_PROBES".to_string(), v)
            })?,
            Err(_) => DEFAULT_MAX_SUFFIX_PROBES,
        };

        Ok(Self { max_suffix_probes })
    }
}
