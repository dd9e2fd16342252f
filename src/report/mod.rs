//! Webhook reporting for job status events.
//!
//! This module provides:
//! - Layered configuration ([`GlobalReportConfig`], [`JobReportConfig`], [`EffectiveConfig`])
//! - Repository-level configuration lookup ([`GlobalConfigSource`])
//! - The reporting predicate ([`should_report`])
//! - Report dispatch through a [`WebhookSender`](crate::webhook::WebhookSender) ([`Reporter`])
//!
//! # Merge Semantics
//!
//! Job-level fields that are present win over global fields; absent fields
//! fall back to the global value. The job-type allow-list is global only.

mod config;
mod error;
mod reporter;
mod source;


pub use config::{EffectiveConfig, GlobalReportConfig, JobReportConfig, ReportSettings};
pub use error::{ConfigurationError, ReportError};
pub use reporter::{Reporter, should_report};
pub use source::GlobalConfigSource;
