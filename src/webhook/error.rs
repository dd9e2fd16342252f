//! Error types for webhook delivery.

use thiserror::Error;

/// Error type for HTTP operations.
///
/// Describes what went wrong without dictating recovery strategy.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed.
    ///
    /// This includes DNS resolution failures, connection refused,
    /// TLS failures, and other network-level errors.
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Request timed out.
    ///
    /// The server did not respond within the configured timeout period.
    #[error("Request timed out")]
    Timeout,

    /// The request was cancelled by the caller before a response arrived.
    #[error("Request cancelled")]
    Cancelled,

    /// The provided URL is invalid.
    ///
    /// This typically indicates a configuration error rather than
    /// a transient failure.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Error returned by a [`TokenGenerator`](super::TokenGenerator).
#[derive(Debug, Error)]
#[error("Failed to generate token: {reason}")]
pub struct SigningError {
    /// Why the token could not be produced.
    pub reason: String,
}

impl SigningError {
    /// Creates a signing error with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Error type for a single webhook delivery attempt.
///
/// Variants are ordered roughly by when they can occur: local failures
/// (encoding, signing) never reach the network.
#[derive(Debug, Error)]
pub enum SendError {
    /// The payload could not be serialized.
    #[error("Failed to encode payload: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The token generator rejected the digest.
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(#[from] HttpError),

    /// The endpoint answered with a status other than 200.
    #[error("Endpoint returned status {status}")]
    Delivery {
        /// HTTP status code returned
        status: http::StatusCode,
        /// Response body (if available and valid UTF-8)
        body: Option<String>,
    },

    /// The response body could not be drained after a successful status.
    #[error("Failed to drain response body: {0}")]
    Cleanup(String),
}
