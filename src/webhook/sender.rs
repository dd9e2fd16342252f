//! Webhook sender trait and signed HTTP implementation.

use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::job::Job;
use crate::time::{Clock, SystemClock, rfc3339};

use super::signing::{TokenGenerator, digest};
use super::{HttpClient, HttpError, HttpRequest, HttpResponse, SendError, SigningError};

/// Header carrying the RFC3339 delivery timestamp.
pub const TIMESTAMP_HEADER: &str = "x-webhook-timestamp";

/// Header carrying the token derived from the delivery digest.
pub const TOKEN_HEADER: &str = "x-webhook-token";

/// Payload envelope posted to the webhook endpoint.
///
/// Serializes as `{"prow_job": <job>}`. No delivery identifier is added;
/// receivers that need deduplication must derive it from the job itself.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Notification<'a> {
    /// The job being reported.
    #[serde(rename = "prow_job")]
    pub job: &'a Job,
}

impl<'a> Notification<'a> {
    /// Wraps a job in the notification envelope.
    #[must_use]
    pub const fn new(job: &'a Job) -> Self {
        Self { job }
    }
}

/// Trait for delivering job notifications to a webhook endpoint.
///
/// Each call is exactly one attempt. Retrying is left to the caller, which
/// can consult [`IsRetryable`] on the returned error.
pub trait WebhookSender: Send + Sync {
    /// Delivers `message` to `url`.
    ///
    /// The attempt is abandoned as soon as `cancel` fires.
    ///
    /// # Errors
    ///
    /// Returns [`SendError`] describing the first failure encountered.
    fn send(
        &self,
        cancel: &CancellationToken,
        url: &str,
        message: &Notification<'_>,
    ) -> impl std::future::Future<Output = Result<(), SendError>> + Send;
}

/// HTTP webhook sender that signs every request.
///
/// For each delivery the sender reads the clock once, derives a token from
/// `url NUL timestamp NUL body` and posts the body with the timestamp and
/// token headers attached.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `T`: The token generator
/// - `C`: The clock (defaults to [`SystemClock`])
///
/// # Example
///
/// ```
/// use webhook_reporter::webhook::{HmacTokenGenerator, HttpSender, ReqwestClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let sender = HttpSender::new(ReqwestClient::new()?, HmacTokenGenerator::new("secret"));
/// assert!(!sender.is_disabled());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpSender<H, T, C = SystemClock> {
    client: H,
    tokens: T,
    clock: C,
    disabled: bool,
}

impl<H, T> HttpSender<H, T, SystemClock> {
    /// Creates an enabled sender using the system clock.
    #[must_use]
    pub const fn new(client: H, tokens: T) -> Self {
        Self {
            client,
            tokens,
            clock: SystemClock,
            disabled: false,
        }
    }
}

impl<H, T, C> HttpSender<H, T, C> {
    /// Sets a custom clock.
    ///
    /// This is primarily useful for testing with fixed timestamps.
    #[must_use]
    pub fn with_clock<C2>(self, clock: C2) -> HttpSender<H, T, C2> {
        HttpSender {
            client: self.client,
            tokens: self.tokens,
            clock,
            disabled: self.disabled,
        }
    }

    /// Turns every send into a successful no-op.
    ///
    /// A disabled sender does no signing and no network I/O.
    #[must_use]
    pub const fn with_delivery_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Returns true if delivery is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }
}

impl<H: HttpClient, T: TokenGenerator, C: Clock> HttpSender<H, T, C> {
    /// Builds the signed POST request for `body`.
    fn build_request(
        &self,
        url: url::Url,
        raw_url: &str,
        body: Vec<u8>,
    ) -> Result<HttpRequest, SendError> {
        let timestamp = rfc3339(self.clock.now());
        let token = self.tokens.generate(&digest(raw_url, &timestamp, &body))?;

        let timestamp = HeaderValue::try_from(timestamp).map_err(|e| {
            SigningError::new(format!("timestamp is not a valid header value: {e}"))
        })?;
        let token = HeaderValue::try_from(token)
            .map_err(|e| SigningError::new(format!("token is not a valid header value: {e}")))?;

        Ok(HttpRequest::post(url)
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .with_header(HeaderName::from_static(TIMESTAMP_HEADER), timestamp)
            .with_header(HeaderName::from_static(TOKEN_HEADER), token)
            .with_body(body))
    }
}

/// Maps a drained response to the delivery outcome.
///
/// A non-200 status outranks a drain failure; the drain failure is only
/// surfaced when the endpoint accepted the delivery.
fn classify_response(response: HttpResponse) -> Result<(), SendError> {
    if !response.is_ok() {
        if let Some(reason) = &response.drain_error {
            tracing::warn!(status = %response.status, "Failed to drain response body: {reason}");
        }
        return Err(SendError::Delivery {
            status: response.status,
            body: response.body_text().map(ToString::to_string),
        });
    }

    match response.drain_error {
        Some(reason) => Err(SendError::Cleanup(reason)),
        None => Ok(()),
    }
}

impl<H: HttpClient, T: TokenGenerator, C: Clock> WebhookSender for HttpSender<H, T, C> {
    async fn send(
        &self,
        cancel: &CancellationToken,
        url: &str,
        message: &Notification<'_>,
    ) -> Result<(), SendError> {
        if self.disabled {
            tracing::debug!(url, job = %message.job.name, "Delivery disabled, skipping webhook");
            return Ok(());
        }

        let body = serde_json::to_vec(message).map_err(SendError::Encoding)?;
        let parsed =
            url::Url::parse(url).map_err(|e| HttpError::InvalidUrl(format!("{url}: {e}")))?;
        let request = self.build_request(parsed, url, body)?;

        let response = tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(HttpError::Cancelled.into()),

            result = self.client.request(request) => result?,
        };

        classify_response(response)
    }
}

/// Extension trait for checking if an error is retryable.
///
/// The sender never retries on its own; callers that layer a retry loop
/// around a report use this to decide whether another attempt can help.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            // Cancellation is the caller's decision; bad URLs are configuration
            Self::Cancelled | Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for SendError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_retryable(),
            Self::Delivery { status, .. } => {
                status.is_server_error()
                    || *status == http::StatusCode::TOO_MANY_REQUESTS
                    || *status == http::StatusCode::REQUEST_TIMEOUT
            }
            // Local failures repeat identically; cleanup means the endpoint already accepted
            Self::Encoding(_) | Self::Signing(_) | Self::Cleanup(_) => false,
        }
    }
}
