//! Exit codes, logging setup and configuration hints for the binary.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use webhook_reporter::config::{ConfigError, field};

pub mod exit_code {
    use std::process::ExitCode;

    /// The job was reported, previewed, or did not need reporting.
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Bad configuration or job input, including a matching job with no URL.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// The endpoint did not accept the delivery, or it never arrived.
    pub fn delivery_failure() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Suggests a next step for errors a first-time user is likely to hit.
pub fn print_config_hint(error: &ConfigError) {
    match error {
        ConfigError::MissingRequired { field: f, .. } if *f == field::HMAC_SECRET => {
            eprintln!("\nUse --dry-run to preview the payload without a signing secret.");
        }
        ConfigError::MissingRequired { field: f, .. } if *f == field::JOB => {
            eprintln!("\nPass the job record with --job <PATH>, or --job - to read stdin.");
        }
        ConfigError::FileRead { .. } => {
            eprintln!("\nRun 'webhook-reporter init' to generate a configuration template.");
        }
        _ => {}
    }
}

/// Logs go to stderr so stdout stays free for the `init` message.
/// `RUST_LOG` overrides the level chosen by `--verbose`.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
