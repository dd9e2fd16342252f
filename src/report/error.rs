//! Error types for report dispatch.

use thiserror::Error;

use crate::webhook::{IsRetryable, SendError};

/// The merged reporter configuration cannot be used for delivery.
///
/// Reaching this means an upstream configuration bug: the job passed the
/// reporting predicate yet no target was configured anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Neither the job nor the global configuration supplies a URL.
    #[error("no webhook URL configured")]
    MissingUrl,
}

/// Error type for a report call.
///
/// Every variant names the job; delivery failures also name the target.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Configuration could not be merged into a deliverable target.
    #[error("Invalid reporter configuration for job '{job}': {source}")]
    Configuration {
        /// Job name
        job: String,
        /// What was wrong
        #[source]
        source: ConfigurationError,
    },

    /// The dry-run preview could not be serialized.
    #[error("Failed to encode notification for job '{job}': {source}")]
    Encoding {
        /// Job name
        job: String,
        /// Underlying serializer error
        #[source]
        source: serde_json::Error,
    },

    /// The sender failed to deliver the notification.
    #[error("Failed to report job '{job}' to {url}: {source}")]
    Send {
        /// Job name
        job: String,
        /// Target URL
        url: String,
        /// Underlying delivery error
        #[source]
        source: SendError,
    },
}

impl IsRetryable for ReportError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Send { source, .. } => source.is_retryable(),
            Self::Configuration { .. } | Self::Encoding { .. } => false,
        }
    }
}
