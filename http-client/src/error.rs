//! Error types for the HTTP command helpers

use thiserror::Error;

/// Errors that can occur while issuing a device command over HTTP
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network-level failure: connect error, DNS failure, or timeout expiry
    #[error("Network error: {0}")]
    Network(String),

    /// The device answered with a non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// The device answered, but the body was not the expected acknowledgement
    #[error("Unexpected device response: {0}")]
    UnexpectedResponse(String),

    /// The response body could not be parsed as structured data
    #[error("Parse error: {0}")]
    Parse(String),
}
