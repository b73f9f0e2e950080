use http_client::HttpError;
use thiserror::Error;

/// Errors surfaced by endpoint operations
///
/// Callers can distinguish "device unreachable" (`RequestError`) from
/// "device returned garbage" (`ParseError`); configuration problems are
/// caught at construction time and never reach the network.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid endpoint configuration, such as an unsupported protocol
    ///
    /// Raised synchronously at construction; never retried and never the
    /// result of network activity.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The request failed: network fault, timeout expiry, non-success
    /// status, or an acknowledgement body other than the expected marker
    #[error("Request error: {0}")]
    RequestError(String),

    /// The device answered, but the body was not valid structured data
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

/// Convert from HttpError to ApiError
///
/// Everything except a parse failure collapses into `RequestError`; the
/// endpoint performs no retries and no local recovery, so the distinction
/// that matters to callers is transport-versus-format.
impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Parse(msg) => ApiError::ParseError(msg),
            other => ApiError::RequestError(other.to_string()),
        }
    }
}
