//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// webhook-reporter: CI job webhook notifier
///
/// Reads a job status record, decides whether it should be reported, and
/// delivers a signed webhook notification.
#[derive(Debug, Parser)]
#[command(name = "webhook-reporter")]
#[command(version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)] // CLI flags are naturally boolean
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the job record JSON ('-' reads from stdin)
    #[arg(long, value_name = "PATH")]
    pub job: Option<PathBuf>,

    /// Default webhook URL (overrides reporter.url in the config file)
    #[arg(long)]
    pub url: Option<String>,

    /// File containing the HMAC secret used to sign deliveries
    #[arg(long = "hmac-secret-file", value_name = "PATH")]
    pub hmac_secret_file: Option<PathBuf>,

    /// HTTP request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Log the payload that would be sent instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Accept every report without signing or sending anything
    #[arg(long = "disable-delivery")]
    pub disable_delivery: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for webhook-reporter
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "webhook-reporter.toml")]
        output: PathBuf,
    },
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
