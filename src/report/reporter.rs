//! Reporting predicate and report dispatch.

use tokio_util::sync::CancellationToken;

use crate::job::Job;
use crate::webhook::{Notification, WebhookSender};

use super::{
    EffectiveConfig, GlobalConfigSource, GlobalReportConfig, JobReportConfig, ReportError,
    ReportSettings,
};

/// Decides whether `job` warrants a webhook under `global`.
///
/// The job must be in an allowed state, and either its type is allowed by
/// the global configuration or the job names its own target. An explicit
/// `enabled = false` on either layer (job winning) vetoes everything.
///
/// The type allow-list is read from `global` only; a job-level override
/// cannot make an ineligible job type eligible except by supplying a URL.
#[must_use]
pub fn should_report(global: &GlobalReportConfig, job: &Job) -> bool {
    let job_config = job.reporter_config.as_ref();
    let settings = ReportSettings::overlay(global, job_config);

    if settings.is_disabled() {
        return false;
    }

    let state_match = settings.allows_state(job.state);
    let type_match = global.allows_type(job.job_type);
    let url_override = job_config.is_some_and(JobReportConfig::has_url);

    state_match && (type_match || url_override)
}

/// Reports job status events to webhooks.
///
/// Holds no per-call state; a single reporter can serve concurrent calls
/// for unrelated jobs.
///
/// # Type Parameters
///
/// - `S`: The webhook sender
/// - `G`: The repository-level configuration source
///
/// # Example
///
/// ```
/// use webhook_reporter::job::{Job, JobState, JobType};
/// use webhook_reporter::report::{GlobalReportConfig, Reporter};
/// use webhook_reporter::webhook::{HmacTokenGenerator, HttpSender, ReqwestClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let global = GlobalReportConfig {
///     job_types: Some(vec![JobType::Presubmit]),
///     job_states: Some(vec![JobState::Failure]),
///     url: Some("https://hooks.example.com/jobs".to_string()),
///     enabled: None,
/// };
/// let sender = HttpSender::new(ReqwestClient::new()?, HmacTokenGenerator::new("secret"));
/// let reporter = Reporter::new(sender, global);
///
/// let job = Job::new("unit", JobType::Presubmit, JobState::Failure);
/// assert!(reporter.should_report(&job));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Reporter<S, G> {
    sender: S,
    config: G,
    dry_run: bool,
}

impl<S, G> Reporter<S, G> {
    /// Creates a reporter that delivers through `sender`.
    #[must_use]
    pub const fn new(sender: S, config: G) -> Self {
        Self {
            sender,
            config,
            dry_run: false,
        }
    }

    /// Enables dry-run mode: payloads are logged instead of sent.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Returns true if dry-run mode is enabled.
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }
}

impl<S: WebhookSender, G: GlobalConfigSource> Reporter<S, G> {
    /// Looks up the global configuration for `job` and returns it with the
    /// job's own override.
    ///
    /// The lookup is keyed on the primary refs, else the first extra refs.
    pub fn resolve<'j>(&self, job: &'j Job) -> (GlobalReportConfig, Option<&'j JobReportConfig>) {
        let global = self.config.global_config(job.report_refs());
        (global, job.reporter_config.as_ref())
    }

    /// Returns true if `job` should be reported.
    ///
    /// Callers must gate [`report`](Self::report) on this; `report` does not
    /// check again.
    pub fn should_report(&self, job: &Job) -> bool {
        let (global, _) = self.resolve(job);
        should_report(&global, job)
    }

    /// Delivers a notification for `job`.
    ///
    /// Makes exactly one delivery attempt, or none in dry-run mode.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Configuration`] if no URL is configured,
    /// [`ReportError::Encoding`] if a dry-run preview cannot be serialized,
    /// and [`ReportError::Send`] if delivery fails.
    pub async fn report(&self, cancel: &CancellationToken, job: &Job) -> Result<(), ReportError> {
        let (global, job_config) = self.resolve(job);
        let config = EffectiveConfig::merge(&global, job_config).map_err(|source| {
            ReportError::Configuration {
                job: job.name.clone(),
                source,
            }
        })?;

        let message = Notification::new(job);

        if self.dry_run {
            let payload =
                serde_json::to_string(&message).map_err(|source| ReportError::Encoding {
                    job: job.name.clone(),
                    source,
                })?;
            tracing::info!(
                job = %job.name,
                url = %config.url,
                "Dry-run: would send webhook: {payload}"
            );
            return Ok(());
        }

        self.sender
            .send(cancel, &config.url, &message)
            .await
            .map_err(|source| ReportError::Send {
                job: job.name.clone(),
                url: config.url.clone(),
                source,
            })?;

        tracing::debug!(job = %job.name, url = %config.url, state = %job.state, "Webhook sent");
        Ok(())
    }
}
