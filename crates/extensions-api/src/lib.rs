//! Lambda Extensions API client.
//!
//! Lets an extension process register itself with the host once and then
//! long-poll for lifecycle events (`INVOKE`, `SHUTDOWN`) using the identifier
//! the host issued.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, header marshaling, and JSON encoding of
//! the registration body live here. The [`lifecycle`] crate supplies the
//! configuration and identifier types; this crate never reads the environment
//! itself.
//!
//! ## Failure model
//!
//! The client never terminates the process. A non-200 answer from the host is
//! returned as [`ExtensionsApiError::Fatal`], and the binary that owns the
//! process exits with [`FATAL_EXIT_CODE`]. Transport and encoding failures are
//! returned with the endpoint and arguments attached. Nothing is retried.

pub mod client;
pub mod errors;

pub use client::{
    ExtensionsApiClient, API_PATH, EXTENSION_IDENTIFIER_HEADER, EXTENSION_NAME_HEADER,
};
pub use errors::{ExtensionsApiError, Operation, FATAL_EXIT_CODE, UNENCODABLE_BODY};
