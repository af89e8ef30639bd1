//! Runtime configuration
//!
//! Read once from the environment at startup:
//! - `MEOWTRITION_LOG`: tracing filter directive (default `meowtrition=info`)
//! - `MEOWTRITION_PRECISION`: decimals shown in reports, 0 to 6 (default 2)

use thiserror::Error;

use crate::nutrition::DEFAULT_PRECISION;

pub const ENV_LOG: &str = "MEOWTRITION_LOG";
pub const ENV_PRECISION: &str = "MEOWTRITION_PRECISION";

pub const DEFAULT_LOG_DIRECTIVE: &str = "meowtrition=info";
pub const MAX_PRECISION: usize = 6;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("MEOWTRITION_PRECISION must be a whole number between 0 and 6, got '{0}'")]
    InvalidPrecision(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_directive: String,
    pub precision: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_directive: DEFAULT_LOG_DIRECTIVE.to_string(),
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, so tests need not touch the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(directive) = lookup(ENV_LOG).filter(|d| !d.trim().is_empty()) {
            config.log_directive = directive;
        }

        if let Some(raw) = lookup(ENV_PRECISION) {
            config.precision = match raw.trim().parse::<usize>() {
                Ok(p) if p <= MAX_PRECISION => p,
                _ => return Err(ConfigError::InvalidPrecision(raw)),
            };
        }

        Ok(config)
    }
}
