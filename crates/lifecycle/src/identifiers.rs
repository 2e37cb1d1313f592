//! Newtype domain identifiers.
//!
//! Every string the Extensions API treats as an identity is wrapped in its own
//! newtype. This prevents accidentally sending the extension name where the
//! host-issued [`ExtensionId`] is expected, even though both are plain header
//! values on the wire.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

string_id! {
    /// Name under which an extension registers itself.
    ///
    /// The host requires this to match the file name of the extension
    /// executable inside `/opt/extensions`.
    ExtensionName
}

string_id! {
    /// Opaque token issued by the host on successful registration.
    ///
    /// Sent back as the `Lambda-Extension-Identifier` header on every
    /// subsequent call. No internal structure is assumed.
    ExtensionId
}

string_id! {
    /// `host:port` of the local Runtime API, as given by `AWS_LAMBDA_RUNTIME_API`.
    RuntimeApiAddress
}
