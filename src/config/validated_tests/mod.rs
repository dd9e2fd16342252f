//! Tests for validated configuration.

use std::io::Write;

use tempfile::NamedTempFile;

use super::ConfigError;
use super::cli::Cli;
use super::toml::TomlConfig;
use super::validated::{JobSource, ValidatedConfig};

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["webhook-reporter"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse TOML config
fn toml(content: &str) -> TomlConfig {
    TomlConfig::parse(content).unwrap()
}

/// Helper to write a secret file
fn secret_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

mod secret_tests;
