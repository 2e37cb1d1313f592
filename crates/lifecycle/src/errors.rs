//! Configuration error type.
//!
//! [`ConfigurationError`] covers conditions that stop the extension before it
//! ever talks to the host. Errors from the Extensions API calls themselves are
//! defined in the `extensions-api` crate.

use thiserror::Error;

/// The runtime configuration read from the environment is unusable.
///
/// Produced at load time; the client is never constructed with an invalid
/// config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A required environment variable is absent or empty.
    #[error("Configuration error: required environment variable {variable} is not set")]
    MissingVariable {
        /// Name of the missing variable.
        variable: &'static str,
    },
}
