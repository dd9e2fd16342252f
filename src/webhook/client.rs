//! Production HTTP client implementation using reqwest.

use std::time::Duration;

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Production HTTP client using reqwest.
///
/// A thin wrapper around `reqwest::Client` that implements [`HttpClient`].
/// Connections are pooled by reqwest; every response body is read to the end
/// before returning so the connection goes back to the pool.
///
/// # Example
///
/// ```no_run
/// use webhook_reporter::webhook::{ReqwestClient, HttpClient, HttpRequest};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new()?;
/// let url = Url::parse("https://hooks.example.com/jobs")?;
/// let request = HttpRequest::post(url).with_body(b"{}".to_vec());
/// let response = client.request(request).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates an HTTP client with reqwest's default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, HttpError> {
        Self::build(reqwest::Client::builder())
    }

    /// Creates an HTTP client whose requests time out after `timeout`.
    ///
    /// The timeout covers connecting, sending, and draining the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Connection`] if the TLS backend cannot be
    /// initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        Self::build(reqwest::Client::builder().timeout(timeout))
    }

    /// Redirects are not followed, so a 3xx reaches the caller as a status.
    fn build(builder: reqwest::ClientBuilder) -> Result<Self, HttpError> {
        let inner = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HttpError::Connection(Box::new(e)))?;

        Ok(Self { inner })
    }
}

fn classify(error: reqwest::Error) -> HttpError {
    if error.is_timeout() {
        HttpError::Timeout
    } else if error.is_builder() {
        HttpError::InvalidUrl(error.to_string())
    } else {
        HttpError::Connection(Box::new(error))
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let mut response = builder.send().await.map_err(classify)?;

        let status = response.status();
        let headers = response.headers().clone();

        // Drain chunk by chunk so a mid-body failure keeps the status.
        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => body.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(e) => {
                    return Ok(HttpResponse::new(status, headers, body)
                        .with_drain_error(e.to_string()));
                }
            }
        }

        Ok(HttpResponse::new(status, headers, body))
    }
}
