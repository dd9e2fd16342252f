//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default HTTP request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;
