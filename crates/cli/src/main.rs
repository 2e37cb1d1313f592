//! Lambda extension entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Load configuration**: build [`lifecycle::Config`] from the process
//!    environment once.
//! 2. **Wire logging**: install the `tracing-subscriber` described by the
//!    config (see [`observability`]).
//! 3. **Drive the lifecycle**: register with the Extensions API, then poll
//!    `/event/next` until the host sends `SHUTDOWN`.
//! 4. **Own the exit policy**: the client returns errors, this binary alone
//!    decides to terminate. A non-200 answer from the host exits with
//!    [`extensions_api::FATAL_EXIT_CODE`].

mod observability;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use extensions_api::{ExtensionsApiClient, ExtensionsApiError};
use lifecycle::{Config, ExtensionName, LifecycleEvent, RegistrationRequest};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            // No subscriber exists yet.
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    observability::init(config.log_level, config.log_format);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code_for(&err);
            match err.downcast_ref::<ExtensionsApiError>() {
                // The client already logged the status and response body.
                Some(api_err) if api_err.is_fatal() => {
                    error!(exit_code = code, "Extensions API rejected the extension; exiting");
                }
                _ => error!(error = ?err, "Extension stopped"),
            }
            ExitCode::from(code)
        }
    }
}

fn run(config: &Config) -> Result<()> {
    let client = ExtensionsApiClient::new(config)?;
    let name = extension_name()?;

    let id = client.register(&name, &RegistrationRequest::invoke_and_shutdown())?;
    info!(extension = %name, extension_id = %id, "Registered extension");

    loop {
        let payload = client.next(&id)?;
        let event = match LifecycleEvent::from_slice(&payload) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "Could not decode lifecycle event; waiting for the next one");
                continue;
            }
        };

        info!(
            event_type = %event.event_type,
            request_id = event.request_id.as_deref().unwrap_or(""),
            "Lifecycle event"
        );

        if event.is_shutdown() {
            info!(
                reason = event.shutdown_reason.as_deref().unwrap_or("unspecified"),
                "Shutting down"
            );
            return Ok(());
        }
    }
}

/// The host requires the registered name to match the executable's file name.
fn extension_name() -> Result<ExtensionName> {
    let exe = std::env::current_exe().context("Failed to resolve the extension executable path")?;
    name_from_path(&exe)
        .with_context(|| format!("Executable path {} has no file name", exe.display()))
}

fn name_from_path(path: &Path) -> Option<ExtensionName> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(ExtensionName::new)
}

/// Exit status for failures the Extensions API client did not mark fatal.
const GENERIC_FAILURE: u8 = 1;

/// Fatal API errors carry their own status; anything else is a generic failure.
fn exit_code_for(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ExtensionsApiError>()
        .and_then(ExtensionsApiError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(GENERIC_FAILURE)
}

#[cfg(test)]
mod tests {
    use extensions_api::Operation;

    use super::*;

    #[test]
    fn extension_name_is_the_executable_file_name() {
        let name = name_from_path(Path::new("/opt/extensions/logs-extension")).unwrap();
        assert_eq!(name.as_str(), "logs-extension");
    }

    #[test]
    fn path_without_file_name_yields_no_name() {
        assert!(name_from_path(Path::new("/")).is_none());
    }

    #[test]
    fn fatal_api_errors_map_to_exit_code_1() {
        let err = anyhow::Error::new(ExtensionsApiError::Fatal {
            operation: Operation::Register,
            status: 500,
            body: String::new(),
        });
        assert_eq!(exit_code_for(&err), 1);
        assert_eq!(i32::from(exit_code_for(&err)), extensions_api::FATAL_EXIT_CODE);
    }

    #[test]
    fn other_failures_exit_with_the_generic_failure_code() {
        let err = anyhow::anyhow!("no executable path");
        assert_eq!(exit_code_for(&err), GENERIC_FAILURE);

        let missing = anyhow::Error::new(ExtensionsApiError::MissingIdentifier {
            url: "http://127.0.0.1:9001/2020-01-01/extension/register".to_string(),
        });
        assert_eq!(exit_code_for(&missing), GENERIC_FAILURE);
    }
}
