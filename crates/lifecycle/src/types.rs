//! Shared value types for the extension lifecycle.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! structured values: the registration body sent to the host, the typed view of
//! a lifecycle event, and the logging settings read from the environment.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// A lifecycle event type an extension can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// A function invocation is starting.
    Invoke,
    /// The execution environment is about to shut down.
    Shutdown,
    /// Any event type this crate does not know about yet.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Invoke => "INVOKE",
            Self::Shutdown => "SHUTDOWN",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Body of the `/register` call: the set of events the extension wants.
///
/// Serialises to `{"events":["INVOKE","SHUTDOWN"]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    /// Event types to receive from `/event/next`.
    pub events: Vec<EventType>,
}

impl RegistrationRequest {
    /// Creates a request for the given event types.
    pub fn new(events: impl IntoIterator<Item = EventType>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    /// Subscribes to both `INVOKE` and `SHUTDOWN`.
    pub fn invoke_and_shutdown() -> Self {
        Self::new([EventType::Invoke, EventType::Shutdown])
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Typed view of a payload returned by `/event/next`.
///
/// The Extensions API client hands back raw bytes; decoding them is left to
/// the caller, which uses this type when it needs to branch on the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifecycleEvent {
    /// Kind of event.
    pub event_type: EventType,

    /// Invocation deadline in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_ms: Option<u64>,

    /// Request ID of the invocation (`INVOKE` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// ARN of the invoked function (`INVOKE` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoked_function_arn: Option<String>,

    /// Why the environment is shutting down (`SHUTDOWN` only), e.g. `"spindown"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_reason: Option<String>,
}

impl LifecycleEvent {
    /// Decodes an event payload.
    pub fn from_slice(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }

    /// Returns `true` for a `SHUTDOWN` event.
    pub fn is_shutdown(&self) -> bool {
        self.event_type == EventType::Shutdown
    }
}

// ---------------------------------------------------------------------------
// Logging settings
// ---------------------------------------------------------------------------

/// Log verbosity accepted in `LOGS_EXT_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogLevel {
    /// `DEBUG`: request URLs and registration details.
    Debug,
    /// `INFO`: received events. The default.
    #[default]
    Info,
    /// `WARNING`: undecodable events and other recoverable oddities.
    Warning,
    /// `ERROR`: rejected calls only.
    Error,
    /// `CRITICAL`: same output as `ERROR`.
    Critical,
}

impl LogLevel {
    /// Parses a level name case-insensitively. Returns `None` when unrecognised.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            "CRITICAL" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Resolves an optional raw value, falling back to [`LogLevel::Info`] when
    /// absent or unrecognised.
    pub fn from_setting(value: Option<&str>) -> Self {
        value.and_then(Self::parse).unwrap_or_default()
    }

    /// The `tracing` level this setting enables. `Critical` has no finer
    /// counterpart and shares [`tracing::Level::ERROR`].
    pub fn as_tracing_level(self) -> tracing::Level {
        match self {
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warning => tracing::Level::WARN,
            Self::Error | Self::Critical => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        };
        f.write_str(s)
    }
}

/// Output format for log lines, from `LOGS_EXT_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LogFormat {
    /// `LEVEL timestamp target thread message` lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Resolves an optional raw value; anything other than `json` is text.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => Self::Json,
            _ => Self::Text,
        }
    }
}
