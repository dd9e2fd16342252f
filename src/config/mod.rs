//! Configuration layer for webhook-reporter.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Repository-scoped reporter settings ([`ReporterTable`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! `--url` only replaces the default URL. Repository overrides in
//! `[reporter.repos]` still win for the repositories they name, and a job's
//! own `reporter_config` wins over all of them.
//!
//! # Repository Overrides
//!
//! Keys are either `org` or `org/repo`. Each field is taken from the most
//! specific entry that sets it, so an `org/repo` entry that only sets
//! `enabled` keeps the org's URL and the default state list.
//!
//! # Signing Secret
//!
//! `--hmac-secret-file` is required unless `--dry-run` or
//! `--disable-delivery` is set. Trailing whitespace in the file is ignored.

mod cli;
pub mod defaults;
mod error;
mod table;
mod toml;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use table::ReporterTable;
pub use toml::{HttpSection, RepoSection, ReporterSection, TomlConfig, default_config_template};
pub use validated::{JobSource, ValidatedConfig, write_default_config};
