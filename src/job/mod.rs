//! Job status records consumed by the reporter.
//!
//! The job record is owned by whatever system schedules and tracks CI jobs.
//! This module only models the fields the reporting pipeline reads, plus
//! enough structure to round-trip the record into the notification payload.

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::report::JobReportConfig;

/// The kind of CI job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobType {
    /// Runs against an unmerged pull request.
    Presubmit,
    /// Runs after a change merges.
    Postsubmit,
    /// Runs on a schedule, independent of any change.
    Periodic,
    /// Runs against a batch of pull requests merged together.
    Batch,
}

impl JobType {
    /// Returns the wire name of the job type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Presubmit => "presubmit",
            Self::Postsubmit => "postsubmit",
            Self::Periodic => "periodic",
            Self::Batch => "batch",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The lifecycle state of a CI job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Created but not yet scheduled.
    Triggered,
    /// Scheduled and running.
    Pending,
    /// Finished successfully.
    Success,
    /// Finished with a test or build failure.
    Failure,
    /// Cancelled before completion.
    Aborted,
    /// Could not be run because of an infrastructure error.
    Error,
}

impl JobState {
    /// Returns the wire name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Triggered => "triggered",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Aborted => "aborted",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pull request included in a job's refs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pull {
    /// Pull request number.
    pub number: u64,
    /// Login of the pull request author.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub author: String,
    /// Head commit SHA.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sha: String,
}

/// The source code a job runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refs {
    /// Organization (or owner) name.
    pub org: String,
    /// Repository name.
    pub repo: String,
    /// Base branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_ref: Option<String>,
    /// Base commit SHA.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_sha: Option<String>,
    /// Pull requests merged on top of the base.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pulls: Vec<Pull>,
}

impl Refs {
    /// Creates refs for the given organization and repository.
    #[must_use]
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
            base_ref: None,
            base_sha: None,
            pulls: Vec::new(),
        }
    }

    /// Returns `org/repo`.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

/// A job status event as delivered to the reporter.
///
/// Read-only for the duration of a report call. Unknown fields in the
/// incoming record are ignored so newer producers do not break parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Job name.
    pub name: String,
    /// Kind of job.
    #[serde(rename = "type")]
    pub job_type: JobType,
    /// Current state.
    pub state: JobState,
    /// Primary refs. Absent for periodic jobs without a checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refs: Option<Refs>,
    /// Additional repositories checked out by the job.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_refs: Vec<Refs>,
    /// Per-job reporter override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_config: Option<JobReportConfig>,
}

impl Job {
    /// Creates a job with no refs and no reporter override.
    #[must_use]
    pub fn new(name: impl Into<String>, job_type: JobType, state: JobState) -> Self {
        Self {
            name: name.into(),
            job_type,
            state,
            refs: None,
            extra_refs: Vec::new(),
            reporter_config: None,
        }
    }

    /// Sets the primary refs.
    #[must_use]
    pub fn with_refs(mut self, refs: Refs) -> Self {
        self.refs = Some(refs);
        self
    }

    /// Appends an extra refs entry.
    #[must_use]
    pub fn with_extra_refs(mut self, refs: Refs) -> Self {
        self.extra_refs.push(refs);
        self
    }

    /// Sets the per-job reporter override.
    #[must_use]
    pub fn with_reporter_config(mut self, config: JobReportConfig) -> Self {
        self.reporter_config = Some(config);
        self
    }

    /// Returns the refs used to look up repository-level configuration.
    ///
    /// The primary refs win; otherwise the first extra refs are used.
    #[must_use]
    pub fn report_refs(&self) -> Option<&Refs> {
        self.refs.as_ref().or_else(|| self.extra_refs.first())
    }

    /// Parses a job record from JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if the input is not a
    /// valid job record.
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
