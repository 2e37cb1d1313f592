//! Log subscriber wiring.
//!
//! Every crate in the workspace only emits `tracing` events; this module is the
//! single place that decides where they go. Lines go to stderr and carry the
//! level, timestamp, target module, thread id, and message.

use lifecycle::{LogFormat, LogLevel};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

/// Targets the configured level applies to. Everything else (reqwest, hyper)
/// is held at [`DEPENDENCY_CAP`] or quieter.
const OWN_TARGETS: [&str; 3] = ["lambda_extension", "extensions_api", "lifecycle"];

/// Most verbose level dependency crates may log at.
const DEPENDENCY_CAP: LevelFilter = LevelFilter::WARN;

/// Builds the event filter for a configured level.
pub fn filter_for(level: LogLevel) -> EnvFilter {
    let own = LevelFilter::from_level(level.as_tracing_level());
    let mut filter = EnvFilter::default().add_directive(own.min(DEPENDENCY_CAP).into());
    for target in OWN_TARGETS {
        if let Ok(directive) = format!("{target}={own}").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

/// Installs the global subscriber. Must be called once, before the first
/// Extensions API call.
pub fn init(level: LogLevel, format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter_for(level))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
