//! Application execution logic.
//!
//! Reads the job record, decides whether it is reported, and delivers the
//! webhook while watching for a shutdown signal.

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use webhook_reporter::config::{JobSource, ReporterTable, ValidatedConfig};
use webhook_reporter::job::Job;
use webhook_reporter::report::{ReportError, Reporter};
use webhook_reporter::webhook::{HmacTokenGenerator, HttpError, HttpSender, ReqwestClient};

/// Reporter wired with the production HTTP stack.
type AppReporter = Reporter<HttpSender<ReqwestClient, HmacTokenGenerator>, ReporterTable>;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to read the job record.
    #[error("Failed to read job from {source_name}: {source}")]
    JobRead {
        /// Where the job was read from
        source_name: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The job record is not valid JSON for a job.
    #[error("Failed to parse job: {0}")]
    JobParse(#[source] serde_json::Error),

    /// Failed to create the HTTP client.
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[source] HttpError),

    /// Reporting the job failed.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl RunError {
    /// Returns true if the failure came from the input rather than delivery.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::JobRead { .. }
                | Self::JobParse(_)
                | Self::Report(ReportError::Configuration { .. })
        )
    }
}

/// What happened to the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A notification was delivered (or previewed in dry-run mode).
    Reported,
    /// The job does not match the reporter configuration.
    Skipped,
}

/// Executes a single report.
///
/// # Errors
///
/// Returns an error if the job cannot be read or parsed, the HTTP client
/// cannot be built, or the report fails.
pub async fn execute(config: ValidatedConfig) -> Result<Outcome, RunError> {
    let job = read_job(&config.job).await?;
    let reporter = create_reporter(config)?;

    report_job(&reporter, &job, shutdown_signal()).await
}

/// Reports `job` if the reporter accepts it, cancelling when `shutdown` fires.
async fn report_job(
    reporter: &AppReporter,
    job: &Job,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<Outcome, RunError> {
    if !reporter.should_report(job) {
        tracing::info!(
            job = %job.name,
            job_type = %job.job_type,
            state = %job.state,
            "Job does not match reporter configuration, skipping"
        );
        return Ok(Outcome::Skipped);
    }

    let cancel = CancellationToken::new();
    let watcher = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            shutdown.await;
            tracing::info!("Shutdown signal received, cancelling delivery...");
            cancel.cancel();
        }
    });

    let result = reporter.report(&cancel, job).await;
    watcher.abort();

    result?;
    tracing::info!(job = %job.name, state = %job.state, "Job reported");
    Ok(Outcome::Reported)
}

/// Reads and parses the job record.
async fn read_job(source: &JobSource) -> Result<Job, RunError> {
    let content = match source {
        JobSource::Stdin => {
            let mut content = String::new();
            tokio::io::stdin()
                .read_to_string(&mut content)
                .await
                .map(|_| content)
        }
        JobSource::File(path) => tokio::fs::read_to_string(path).await,
    }
    .map_err(|e| RunError::JobRead {
        source_name: source.to_string(),
        source: e,
    })?;

    Job::from_json(&content).map_err(RunError::JobParse)
}

/// Builds the reporter from validated config.
fn create_reporter(config: ValidatedConfig) -> Result<AppReporter, RunError> {
    let client = ReqwestClient::with_timeout(config.timeout).map_err(RunError::HttpClient)?;

    // Without a secret nothing is ever signed: validation only allows that
    // in dry-run or disabled-delivery mode.
    let tokens = config
        .token_generator
        .unwrap_or_else(|| HmacTokenGenerator::new(Vec::new()));

    if config.dry_run {
        tracing::info!("Dry-run mode enabled - webhook payloads will be logged but not sent");
    }
    if config.disable_delivery {
        tracing::info!("Delivery disabled - reports will be accepted without sending");
    }

    let sender = HttpSender::new(client, tokens).with_delivery_disabled(config.disable_delivery);
    Ok(Reporter::new(sender, config.reporter).with_dry_run(config.dry_run))
}

/// Resolves when Ctrl+C or SIGTERM is received.
///
/// If a handler cannot be installed, that signal is never observed.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
