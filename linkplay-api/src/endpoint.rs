//! Endpoint abstraction for LinkPlay device command APIs.
//!
//! An endpoint is an addressable device command interface. The [`Endpoint`]
//! trait defines the three call shapes every transport must support; today
//! the only implementation is [`HttpApiEndpoint`], which speaks the vendor
//! HTTP command API, but the trait is the seam where an alternative control
//! channel could be substituted without touching call sites.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ApiError, Result};

/// Protocols accepted by [`HttpApiEndpoint::new`]
const SUPPORTED_PROTOCOLS: [&str; 2] = ["http", "https"];

/// The three asynchronous operations a device endpoint supports.
///
/// Commands are opaque strings; their vocabulary belongs to the device, not
/// to this crate. No operation retries, caches, or reorders anything:
/// every call maps to exactly one request, and every failure surfaces as a
/// typed [`ApiError`]. Retry and backoff policy belongs to callers that
/// understand device semantics (reboots, flaky Wi-Fi), not here.
///
/// Implementations must be `Send + Sync` so endpoints can be shared across
/// async tasks, and `Display` must render a stable diagnostic identity for
/// the endpoint without performing I/O.
#[async_trait]
pub trait Endpoint: fmt::Display + Send + Sync {
    /// Issue the command and confirm the device acknowledged it.
    ///
    /// Succeeds only when the device answers with the exact affirmative
    /// marker; any other body, a non-success status, or a transport fault
    /// is an [`ApiError::RequestError`].
    async fn request(&self, command: &str) -> Result<()>;

    /// Issue the command and parse the response as a string-to-string map.
    ///
    /// A transport fault or non-success status is an
    /// [`ApiError::RequestError`]; a body that is not a JSON object of
    /// string values is an [`ApiError::ParseError`].
    async fn json_request(&self, command: &str) -> Result<HashMap<String, String>>;

    /// Issue the command and return the response body verbatim.
    ///
    /// `timeout` overrides the shared client's default deadline for this
    /// call only; `None` inherits it. This is the escape hatch for slow or
    /// non-standard responses. Timeout expiry surfaces as an
    /// [`ApiError::RequestError`].
    async fn raw_request(&self, command: &str, timeout: Option<Duration>) -> Result<String>;
}

/// A device endpoint backed by the vendor HTTP command API.
///
/// Holds an immutable base URL (`{protocol}://{host}`) and a handle to a
/// shared connection pool. The pool is created and owned by the caller;
/// `reqwest::Client` is reference-counted internally, so cloning the handle
/// shares the pool and dropping the endpoint never closes it. Any number of
/// endpoints may share one client concurrently.
///
/// The endpoint itself is stateless: no operation mutates it, and no
/// response is cached.
///
/// # Example
///
/// ```rust,no_run
/// use linkplay_api::{Endpoint, HttpApiEndpoint};
///
/// # async fn example() -> linkplay_api::Result<()> {
/// let client = http_client::create_client()?;
/// let endpoint = HttpApiEndpoint::new("http", "192.168.1.50", client)?;
///
/// endpoint.request("setPlayerCmd:pause").await?;
/// let status = endpoint.json_request("getStatusEx").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpApiEndpoint {
    base_url: String,
    client: Client,
}

impl HttpApiEndpoint {
    /// Create an endpoint for a device at `host`, reachable via `protocol`.
    ///
    /// `protocol` must be exactly `"http"` or `"https"`; anything else is an
    /// [`ApiError::ConfigurationError`], returned synchronously before any
    /// network activity. `host` is the device address or hostname,
    /// optionally with a port. No I/O happens at construction.
    pub fn new(protocol: &str, host: &str, client: Client) -> Result<Self> {
        if !SUPPORTED_PROTOCOLS.contains(&protocol) {
            return Err(ApiError::ConfigurationError(format!(
                "Protocol must be either 'http' or 'https', got '{}'",
                protocol
            )));
        }

        Ok(Self {
            base_url: format!("{}://{}", protocol, host),
            client,
        })
    }
}

#[async_trait]
impl Endpoint for HttpApiEndpoint {
    async fn request(&self, command: &str) -> Result<()> {
        tracing::debug!(endpoint = %self.base_url, command = %command, "verified request");
        http_client::call_api_ok(&self.base_url, &self.client, command).await?;
        Ok(())
    }

    async fn json_request(&self, command: &str) -> Result<HashMap<String, String>> {
        tracing::debug!(endpoint = %self.base_url, command = %command, "json request");
        let data = http_client::call_api_json(&self.base_url, &self.client, command).await?;
        Ok(data)
    }

    async fn raw_request(&self, command: &str, timeout: Option<Duration>) -> Result<String> {
        tracing::debug!(endpoint = %self.base_url, command = %command, "raw request");
        let body = http_client::call_api(&self.base_url, &self.client, command, timeout).await?;
        Ok(body)
    }
}

impl fmt::Display for HttpApiEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base_url)
    }
}
