//! Webhook layer for delivering signed job notifications.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`])
//! - Handling drained HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Request digests and tokens ([`digest`], [`TokenGenerator`], [`HmacTokenGenerator`])
//! - Signed delivery ([`WebhookSender`], [`HttpSender`])

mod client;
mod error;
mod http;
mod sender;
mod signing;


pub use client::ReqwestClient;
pub use error::{HttpError, SendError, SigningError};
pub use http::{HttpClient, HttpRequest, HttpResponse};
pub use sender::{
    HttpSender, IsRetryable, Notification, TIMESTAMP_HEADER, TOKEN_HEADER, WebhookSender,
};
pub use signing::{HmacTokenGenerator, TokenGenerator, digest};
