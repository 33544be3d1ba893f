//! Error types for adapters.

use thiserror::Error;

/// Errors that can occur when reading from a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Connection failed (DNS, refused, TLS, reset).
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The store rejected the read (HTTP 401 or 403).
    ///
    /// Kept apart from [`AdapterError::Http`] because it points at access
    /// rules or credentials rather than a transient outage.
    #[error("Access denied (HTTP {0})")]
    Unauthorized(u16),

    /// Any other non-success HTTP status.
    #[error("HTTP request failed with status {0}")]
    Http(u16),

    /// Response body is not valid JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Anything the other kinds do not cover.
    #[error("Unexpected error: {0}")]
    Unknown(String),
}

#[cfg(feature = "firebase")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else if err.is_decode() {
            AdapterError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            crate::classify_status(status.as_u16())
                .unwrap_or_else(|| AdapterError::Unknown(err.to_string()))
        } else {
            AdapterError::Unknown(err.to_string())
        }
    }
}
