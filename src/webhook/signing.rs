//! Request digests and token generation.
//!
//! Every delivery carries a token derived from a digest of the target URL,
//! the delivery timestamp and the exact body bytes. Binding the timestamp
//! into the digest lets receivers reject replays outside their tolerance
//! window; a retried delivery therefore carries a different token.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::SigningError;

type HmacSha256 = Hmac<Sha256>;

/// Builds the byte sequence a delivery token is derived from.
///
/// Layout: `url NUL timestamp NUL body`.
#[must_use]
pub fn digest(url: &str, timestamp: &str, body: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(url.len() + timestamp.len() + body.len() + 2);
    buf.extend_from_slice(url.as_bytes());
    buf.push(0);
    buf.extend_from_slice(timestamp.as_bytes());
    buf.push(0);
    buf.extend_from_slice(body);
    buf
}

/// Produces an authentication token for a delivery digest.
///
/// The scheme is opaque to the sender. Implementations must be safe to call
/// from concurrent deliveries. Closures with the matching signature
/// implement this trait, which keeps test doubles short.
pub trait TokenGenerator: Send + Sync {
    /// Returns the token for `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`SigningError`] if no token can be produced. The delivery is
    /// abandoned before any network activity.
    fn generate(&self, digest: &[u8]) -> Result<String, SigningError>;
}

impl<F> TokenGenerator for F
where
    F: Fn(&[u8]) -> Result<String, SigningError> + Send + Sync,
{
    fn generate(&self, digest: &[u8]) -> Result<String, SigningError> {
        self(digest)
    }
}

/// HMAC-SHA256 token generator producing lowercase hex.
#[derive(Clone)]
pub struct HmacTokenGenerator {
    secret: Vec<u8>,
}

impl HmacTokenGenerator {
    /// Creates a generator keyed with `secret`.
    #[must_use]
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for HmacTokenGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacTokenGenerator")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl TokenGenerator for HmacTokenGenerator {
    fn generate(&self, digest: &[u8]) -> Result<String, SigningError> {
        if self.secret.is_empty() {
            return Err(SigningError::new("HMAC secret is empty"));
        }

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|e| SigningError::new(e.to_string()))?;
        mac.update(digest);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
