//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::job::{JobState, JobType};

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Reporter defaults and per-repository overrides
    #[serde(default)]
    pub reporter: ReporterSection,

    /// HTTP delivery settings
    #[serde(default)]
    pub http: HttpSection,
}

/// Reporter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReporterSection {
    /// Default webhook URL
    pub url: Option<String>,

    /// Master switch for reporting
    pub enabled: Option<bool>,

    /// Job types eligible for reporting
    pub job_types: Option<Vec<JobType>>,

    /// Job states eligible for reporting
    pub job_states: Option<Vec<JobState>>,

    /// Overrides keyed by `org` or `org/repo`
    #[serde(default)]
    pub repos: HashMap<String, RepoSection>,
}

/// Per-organization or per-repository reporter override.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepoSection {
    /// Webhook URL for this scope
    pub url: Option<String>,

    /// Master switch for this scope
    pub enabled: Option<bool>,

    /// Job types eligible for reporting in this scope
    pub job_types: Option<Vec<JobType>>,

    /// Job states eligible for reporting in this scope
    pub job_states: Option<Vec<JobState>>,
}

/// HTTP delivery configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    /// Request timeout in seconds
    pub timeout: Option<u64>,

    /// File containing the HMAC signing secret
    pub hmac_secret_file: Option<PathBuf>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# webhook-reporter configuration file

[reporter]
# Default webhook URL (can be overridden by --url, or per job via reporter_config.url)
# url = "https://hooks.example.com/jobs"

# Master switch. Set to false to suppress all reporting.
# enabled = true

# Job types eligible for reporting: presubmit, postsubmit, periodic, batch
# A job whose own reporter_config sets a url is eligible regardless of type.
job_types = ["presubmit", "postsubmit"]

# Job states eligible for reporting: triggered, pending, success, failure, aborted, error
# Nothing is reported when this list is empty.
job_states = ["success", "failure", "error"]

# Overrides for an organization or a single repository.
# The most specific entry wins field by field: org/repo > org > defaults above.
# [reporter.repos."acme"]
# url = "https://hooks.acme.example.com/jobs"
#
# [reporter.repos."acme/legacy"]
# enabled = false

[http]
# Request timeout in seconds (default: 30)
# timeout = 30

# File holding the HMAC-SHA256 signing secret (required unless --dry-run or --disable-delivery)
# hmac_secret_file = "/etc/webhook-reporter/hmac"
"#
    .to_string()
}
