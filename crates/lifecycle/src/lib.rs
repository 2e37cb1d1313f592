//! Lifecycle domain for a Lambda extension.
//!
//! This crate contains the identifiers, value types, configuration, and
//! configuration error shared by the Extensions API client and the binary that
//! drives it. Infrastructure crates depend on it; it never performs network I/O.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ExtensionName`, `ExtensionId`, `RuntimeApiAddress`) |
//! | [`types`] | Registration body, lifecycle event, logging settings |
//! | [`config`] | Environment-driven [`Config`] loading |
//! | [`errors`] | [`ConfigurationError`] |

pub mod config;
pub mod errors;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{Config, LOG_FORMAT_VAR, LOG_LEVEL_VAR, RUNTIME_API_VAR};
pub use errors::ConfigurationError;
pub use identifiers::{ExtensionId, ExtensionName, RuntimeApiAddress};
pub use types::{EventType, LifecycleEvent, LogFormat, LogLevel, RegistrationRequest};
