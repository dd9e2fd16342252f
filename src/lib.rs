//! webhook-reporter: CI job webhook notifier
//!
//! A library for deciding whether a CI job's status should be reported
//! and delivering the report as a signed webhook notification.

pub mod config;
pub mod job;
pub mod report;
pub mod time;
pub mod webhook;
