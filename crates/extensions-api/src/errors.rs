//! Errors produced by [`crate::ExtensionsApiClient`].

use thiserror::Error;

/// Process exit status for a [`ExtensionsApiError::Fatal`] response.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Stands in for the registration body when it cannot be encoded as JSON.
pub const UNENCODABLE_BODY: &str = "<body not encodable as JSON>";

/// Boxed underlying cause of a transport or encoding failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which Extensions API call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /register`.
    Register,
    /// `GET /event/next`.
    NextEvent,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register => f.write_str("/register"),
            Self::NextEvent => f.write_str("/event/next"),
        }
    }
}

/// Failures of an Extensions API call.
///
/// Two classes exist. [`ExtensionsApiError::Fatal`] means the host answered
/// with something other than `200 OK`; the extension cannot continue and the
/// top-level caller is expected to exit with [`FATAL_EXIT_CODE`]. Every other
/// variant is a transport, encoding, or protocol problem handed back to the
/// caller to decide on.
#[derive(Debug, Error)]
pub enum ExtensionsApiError {
    /// The host returned a non-200 status.
    #[error("{operation} request to the Extensions API failed. Status: {status}, Response: {body}")]
    Fatal {
        /// Call the host rejected.
        operation: Operation,
        /// HTTP status code the host answered with.
        status: u16,
        /// Response body, lossily decoded as UTF-8.
        body: String,
    },

    /// Registration could not be sent or its body could not be encoded.
    #[error(
        "Failed to register with the Extensions API on {url} with extension name '{name}' and registration body {body}: {source}"
    )]
    Register {
        url: String,
        name: String,
        /// JSON encoding of the caller's registration body, or
        /// [`UNENCODABLE_BODY`] when encoding itself failed.
        body: String,
        #[source]
        source: BoxError,
    },

    /// The long-poll for the next event failed below the HTTP status level.
    #[error("Failed to get next event from the Extensions API on {url}: {source}")]
    NextEvent {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Registration succeeded but the host did not send an identifier header.
    #[error("Extensions API on {url} accepted the registration but returned no Lambda-Extension-Identifier header")]
    MissingIdentifier { url: String },

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client for the Extensions API: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ExtensionsApiError {
    /// Returns `true` if the host rejected the call and the extension must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal { .. })
    }

    /// Exit status the top-level caller should terminate with, if any.
    pub fn exit_code(&self) -> Option<i32> {
        self.is_fatal().then_some(FATAL_EXIT_CODE)
    }
}
