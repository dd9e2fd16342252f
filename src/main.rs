//! webhook-reporter: reports one CI job to a webhook endpoint.

use std::path::Path;
use std::process::ExitCode;

use webhook_reporter::config::{Cli, Command, ValidatedConfig, write_default_config};

mod app;
mod run;

use app::{exit_code, print_config_hint, setup_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    if let Some(Command::Init { output }) = &cli.command {
        return write_template(output);
    }

    let config = match ValidatedConfig::load(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            print_config_hint(&e);
            return exit_code::CONFIG_ERROR;
        }
    };

    setup_tracing(config.verbose);
    tracing::debug!("{config}");

    report(config)
}

fn write_template(output: &Path) -> ExitCode {
    match write_default_config(output) {
        Ok(()) => {
            println!("Wrote configuration template to {}", output.display());
            exit_code::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            exit_code::CONFIG_ERROR
        }
    }
}

/// Runs a single report and maps the result onto an exit code.
fn report(config: ValidatedConfig) -> ExitCode {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return exit_code::delivery_failure();
        }
    };

    match runtime.block_on(run::execute(config)) {
        Ok(_) => exit_code::SUCCESS,
        Err(e) if e.is_input_error() => {
            tracing::error!("{e}");
            exit_code::CONFIG_ERROR
        }
        Err(e) => {
            tracing::error!("Report failed: {e}");
            exit_code::delivery_failure()
        }
    }
}
