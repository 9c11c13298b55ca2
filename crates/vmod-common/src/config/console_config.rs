//! Console process configuration
//!
//! Loaded from `VMOD_*` environment variables (and a `.env` file if present).
//! Everything has a default, so an empty environment is valid.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VMOD";

/// Console configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsoleConfig {
    /// Whole-request timeout for engine HTTP calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
    /// Delay before the live monitor reconnects
    #[serde(default = "default_live_retry_secs")]
    pub live_retry_secs: u64,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Overrides the platform settings file location
    #[serde(default)]
    pub settings_path: Option<PathBuf>,
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            http_timeout_secs: default_http_timeout_secs(),
            live_retry_secs: default_live_retry_secs(),
            log_format: LogFormat::default(),
            settings_path: None,
        }
    }
}

fn default_http_timeout_secs() -> u64 {
    30
}

fn default_live_retry_secs() -> u64 {
    5
}

impl ConsoleConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_environment(::config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from explicit variables, without touching the
    /// process environment
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<::config::Map<String, String>>();
        Self::from_environment(::config::Environment::with_prefix(ENV_PREFIX).source(Some(map)))
    }

    fn from_environment(env: ::config::Environment) -> Result<Self, ConfigError> {
        let config: Self = ::config::Config::builder()
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "VMOD_HTTP_TIMEOUT_SECS",
                "must be at least 1".to_string(),
            ));
        }
        if self.live_retry_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "VMOD_LIVE_RETRY_SECS",
                "must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    #[must_use]
    pub fn live_retry_delay(&self) -> Duration {
        Duration::from_secs(self.live_retry_secs)
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
