//! The Extensions API client.

use std::time::Duration;

use lifecycle::{Config, ExtensionId, ExtensionName};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::errors::{BoxError, ExtensionsApiError, Operation, UNENCODABLE_BODY};

/// Request header carrying the extension name on `/register`.
pub const EXTENSION_NAME_HEADER: &str = "Lambda-Extension-Name";

/// Response header of `/register`, and request header of `/event/next`.
pub const EXTENSION_IDENTIFIER_HEADER: &str = "Lambda-Extension-Identifier";

/// Path prefix of the Extensions API, versioned by the host.
pub const API_PATH: &str = "2020-01-01/extension";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Blocking client for the Lambda Extensions API.
///
/// Holds only the base URL derived from [`Config::runtime_api`] and a reusable
/// HTTP connection pool. Each method sends exactly one request and waits for
/// the whole response; nothing is retried.
///
/// ```no_run
/// use extensions_api::ExtensionsApiClient;
/// use lifecycle::{Config, ExtensionName, RegistrationRequest};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::from_env()?;
/// let client = ExtensionsApiClient::new(&config)?;
/// let name = ExtensionName::new("logs-extension").ok_or("empty name")?;
/// let id = client.register(&name, &RegistrationRequest::invoke_and_shutdown())?;
/// let event = client.next(&id)?;
/// # let _ = event;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ExtensionsApiClient {
    http: Client,
    base_url: String,
}

impl ExtensionsApiClient {
    /// Creates a client for the Runtime API named in `config`.
    ///
    /// The HTTP client is built without a request timeout: `/event/next`
    /// blocks until the host has an event, and only the host's own long-poll
    /// window may end it.
    pub fn new(config: &Config) -> Result<Self, ExtensionsApiError> {
        let http = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(ExtensionsApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: format!("http://{}/{}", config.runtime_api, API_PATH),
        })
    }

    /// Base URL every request is issued against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Registers the calling process as an extension.
    ///
    /// Register as early as possible: the host only starts initialising the
    /// function once every extension has registered.
    ///
    /// # Errors
    ///
    /// - [`ExtensionsApiError::Fatal`] if the host answers with anything but 200.
    /// - [`ExtensionsApiError::Register`] if `body` cannot be encoded or the
    ///   request cannot be sent.
    /// - [`ExtensionsApiError::MissingIdentifier`] if a 200 response lacks the
    ///   identifier header.
    pub fn register<B>(
        &self,
        name: &ExtensionName,
        body: &B,
    ) -> Result<ExtensionId, ExtensionsApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}/register", self.base_url);
        debug!(url = %url, extension = %name, "Registering with the Extensions API");

        let registration_failed = |body: String, source: BoxError| ExtensionsApiError::Register {
            url: url.clone(),
            name: name.to_string(),
            body,
            source,
        };

        let payload = serde_json::to_string(body)
            .map_err(|e| registration_failed(UNENCODABLE_BODY.to_string(), e.into()))?;

        let response = self
            .http
            .post(&url)
            .header(EXTENSION_NAME_HEADER, name.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(payload.clone())
            .send()
            .map_err(|e| registration_failed(payload, e.into()))?;

        let response = ensure_ok(Operation::Register, response)?;

        let id = response
            .headers()
            .get(EXTENSION_IDENTIFIER_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(ExtensionId::new)
            .ok_or_else(|| ExtensionsApiError::MissingIdentifier { url: url.clone() })?;

        debug!(extension = %name, extension_id = %id, "Registered with the Extensions API");
        Ok(id)
    }

    /// Blocks until the host delivers the next lifecycle event and returns its
    /// payload unmodified.
    ///
    /// Call this once the extension has nothing left to do for the current
    /// event. There is at most one outstanding call per client by construction.
    ///
    /// # Errors
    ///
    /// - [`ExtensionsApiError::Fatal`] if the host answers with anything but 200.
    /// - [`ExtensionsApiError::NextEvent`] if the request or the body read fails.
    pub fn next(&self, id: &ExtensionId) -> Result<Vec<u8>, ExtensionsApiError> {
        let url = format!("{}/event/next", self.base_url);
        let next_failed = |source: reqwest::Error| ExtensionsApiError::NextEvent {
            url: url.clone(),
            source,
        };

        let response = self
            .http
            .get(&url)
            .header(EXTENSION_IDENTIFIER_HEADER, id.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .send()
            .map_err(next_failed)?;

        let response = ensure_ok(Operation::NextEvent, response)?;
        let payload = response.bytes().map_err(next_failed)?.to_vec();

        info!(
            response = %String::from_utf8_lossy(&payload),
            "Received response from the Extensions API"
        );
        Ok(payload)
    }
}

/// Passes a 200 response through; logs and converts anything else into
/// [`ExtensionsApiError::Fatal`].
fn ensure_ok(operation: Operation, response: Response) -> Result<Response, ExtensionsApiError> {
    let status = response.status();
    if status == StatusCode::OK {
        return Ok(response);
    }

    // The body is diagnostic only; an unreadable one is reported as empty.
    let body = response.text().unwrap_or_default();
    error!(
        %operation,
        status = status.as_u16(),
        response = %body,
        "Extensions API request failed"
    );
    Err(ExtensionsApiError::Fatal {
        operation,
        status: status.as_u16(),
        body,
    })
}
