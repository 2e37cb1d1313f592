//! Runtime configuration, read once at startup.
//!
//! [`Config::load`] is a pure function of an environment lookup so it can be
//! exercised without touching the process environment. [`Config::from_env`] is
//! the thin wrapper the binary uses.

use crate::{ConfigurationError, LogFormat, LogLevel, RuntimeApiAddress};

/// `host:port` of the local Runtime API. Required.
pub const RUNTIME_API_VAR: &str = "AWS_LAMBDA_RUNTIME_API";

/// Log verbosity override. Optional, defaults to `INFO`.
pub const LOG_LEVEL_VAR: &str = "LOGS_EXT_LOG_LEVEL";

/// Log output format override (`text` or `json`). Optional, defaults to `text`.
pub const LOG_FORMAT_VAR: &str = "LOGS_EXT_LOG_FORMAT";

/// Immutable configuration injected into the Extensions API client and the
/// logging setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address of the Runtime API the extension talks to.
    pub runtime_api: RuntimeApiAddress,
    /// Verbosity for the log subscriber.
    pub log_level: LogLevel,
    /// Line format for the log subscriber.
    pub log_format: LogFormat,
}

impl Config {
    /// Builds a [`Config`] from an environment lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingVariable`] when
    /// [`RUNTIME_API_VAR`] is absent or empty. Unrecognised logging values
    /// never fail; they fall back to their defaults.
    pub fn load<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let runtime_api = lookup(RUNTIME_API_VAR)
            .and_then(RuntimeApiAddress::new)
            .ok_or(ConfigurationError::MissingVariable {
                variable: RUNTIME_API_VAR,
            })?;

        Ok(Self {
            runtime_api,
            log_level: LogLevel::from_setting(lookup(LOG_LEVEL_VAR).as_deref()),
            log_format: LogFormat::from_setting(lookup(LOG_FORMAT_VAR).as_deref()),
        })
    }

    /// Builds a [`Config`] from the process environment.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::load(|name| std::env::var(name).ok())
    }
}
