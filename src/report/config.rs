//! Layered reporter configuration.
//!
//! A [`GlobalReportConfig`] comes from the repository-level configuration;
//! a [`JobReportConfig`] may ride along on an individual job. Every field is
//! an `Option` so "not configured" stays distinct from "configured as empty
//! or false". Job fields that are present always win.

use serde::{Deserialize, Serialize};

use crate::job::{JobState, JobType};

use super::ConfigurationError;

/// Reporter settings resolved for one repository.
///
/// A default value (everything absent) is valid and reports nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalReportConfig {
    /// Job types eligible for reporting. Not overridable per job.
    pub job_types: Option<Vec<JobType>>,
    /// Job states eligible for reporting.
    pub job_states: Option<Vec<JobState>>,
    /// Default webhook target.
    pub url: Option<String>,
    /// Master switch; `Some(false)` suppresses all reporting.
    pub enabled: Option<bool>,
}

impl GlobalReportConfig {
    /// Returns true if `job_type` is in a non-empty type allow-list.
    #[must_use]
    pub fn allows_type(&self, job_type: JobType) -> bool {
        self.job_types
            .as_deref()
            .is_some_and(|types| types.contains(&job_type))
    }
}

/// Sparse per-job override of the reporter settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReportConfig {
    /// Webhook target for this job only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Enables or disables reporting for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Job states to report for this job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_states: Option<Vec<JobState>>,
}

impl JobReportConfig {
    /// Returns true if the job names its own, non-empty target.
    #[must_use]
    pub fn has_url(&self) -> bool {
        self.url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// Job settings laid over global settings, before URL validation.
///
/// This is what the reporting predicate inspects. It never fails: a missing
/// URL only matters once a report is actually dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportSettings {
    /// Webhook target, if any layer set one.
    pub url: Option<String>,
    /// Master switch, if any layer set one.
    pub enabled: Option<bool>,
    /// State allow-list, if any layer set one.
    pub job_states: Option<Vec<JobState>>,
}

impl ReportSettings {
    /// Lays `job` over `global` field by field.
    #[must_use]
    pub fn overlay(global: &GlobalReportConfig, job: Option<&JobReportConfig>) -> Self {
        Self {
            url: job
                .and_then(|j| j.url.clone())
                .or_else(|| global.url.clone()),
            enabled: job.and_then(|j| j.enabled).or(global.enabled),
            job_states: job
                .and_then(|j| j.job_states.clone())
                .or_else(|| global.job_states.clone()),
        }
    }

    /// Returns true if reporting was explicitly switched off.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self.enabled, Some(false))
    }

    /// Returns true if `state` is in a non-empty state allow-list.
    #[must_use]
    pub fn allows_state(&self, state: JobState) -> bool {
        self.job_states
            .as_deref()
            .is_some_and(|states| states.contains(&state))
    }
}

/// Deliverable configuration for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// Webhook target, guaranteed non-empty.
    pub url: String,
    /// Master switch, if any layer set one.
    pub enabled: Option<bool>,
    /// State allow-list, if any layer set one.
    pub job_states: Option<Vec<JobState>>,
}

impl EffectiveConfig {
    /// Merges `job` over `global`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingUrl`] if the merged URL is absent
    /// or empty.
    pub fn merge(
        global: &GlobalReportConfig,
        job: Option<&JobReportConfig>,
    ) -> Result<Self, ConfigurationError> {
        let settings = ReportSettings::overlay(global, job);

        let url = settings
            .url
            .filter(|url| !url.is_empty())
            .ok_or(ConfigurationError::MissingUrl)?;

        Ok(Self {
            url,
            enabled: settings.enabled,
            job_states: settings.job_states,
        })
    }
}
