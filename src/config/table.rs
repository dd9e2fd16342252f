//! Repository-scoped reporter configuration built from the config file.

use std::collections::HashMap;

use url::Url;

use crate::job::Refs;
use crate::report::{GlobalConfigSource, GlobalReportConfig};

use super::error::ConfigError;
use super::toml::{ReporterSection, RepoSection};

/// Reporter defaults plus overrides keyed by `org` or `org/repo`.
///
/// Lookups layer the entries field by field, most specific first:
/// `org/repo`, then `org`, then the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterTable {
    defaults: GlobalReportConfig,
    overrides: HashMap<String, GlobalReportConfig>,
}

impl ReporterTable {
    /// Creates a table with only default settings.
    #[must_use]
    pub fn new(defaults: GlobalReportConfig) -> Self {
        Self {
            defaults,
            overrides: HashMap::new(),
        }
    }

    /// Adds an override for `key` (`org` or `org/repo`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepoKey` if the key is not of either form.
    pub fn with_override(
        mut self,
        key: impl Into<String>,
        config: GlobalReportConfig,
    ) -> Result<Self, ConfigError> {
        let key = key.into();
        validate_key(&key)?;
        self.overrides.insert(key, config);
        Ok(self)
    }

    /// Builds a table from the `[reporter]` section of the config file.
    ///
    /// `url_override` replaces the default URL (from `--url`).
    ///
    /// # Errors
    ///
    /// Returns an error if a repository key or any URL is invalid.
    pub fn from_section(
        section: &ReporterSection,
        url_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let url = url_override.or(section.url.as_deref());
        let defaults = GlobalReportConfig {
            job_types: section.job_types.clone(),
            job_states: section.job_states.clone(),
            url: url.map(validate_url).transpose()?,
            enabled: section.enabled,
        };

        section
            .repos
            .iter()
            .try_fold(Self::new(defaults), |table, (key, repo)| {
                table.with_override(key.as_str(), repo_config(repo)?)
            })
    }

    /// Returns the default settings.
    #[must_use]
    pub const fn defaults(&self) -> &GlobalReportConfig {
        &self.defaults
    }

    /// Returns the number of repository overrides.
    #[must_use]
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Resolves the settings that apply to `refs`.
    #[must_use]
    pub fn lookup(&self, refs: Option<&Refs>) -> GlobalReportConfig {
        let Some(refs) = refs else {
            return self.defaults.clone();
        };

        let org = self.overrides.get(&refs.org);
        let repo = self.overrides.get(&refs.full_name());
        layer(layer(self.defaults.clone(), org), repo)
    }
}

impl GlobalConfigSource for ReporterTable {
    fn global_config(&self, refs: Option<&Refs>) -> GlobalReportConfig {
        self.lookup(refs)
    }
}

fn layer(base: GlobalReportConfig, over: Option<&GlobalReportConfig>) -> GlobalReportConfig {
    let Some(over) = over else {
        return base;
    };

    GlobalReportConfig {
        job_types: over.job_types.clone().or(base.job_types),
        job_states: over.job_states.clone().or(base.job_states),
        url: over.url.clone().or(base.url),
        enabled: over.enabled.or(base.enabled),
    }
}

fn repo_config(repo: &RepoSection) -> Result<GlobalReportConfig, ConfigError> {
    Ok(GlobalReportConfig {
        job_types: repo.job_types.clone(),
        job_states: repo.job_states.clone(),
        url: repo.url.as_deref().map(validate_url).transpose()?,
        enabled: repo.enabled,
    })
}

fn validate_key(key: &str) -> Result<(), ConfigError> {
    let mut parts = key.split('/');
    let valid = match (parts.next(), parts.next(), parts.next()) {
        (Some(org), None, None) => !org.is_empty(),
        (Some(org), Some(repo), None) => !org.is_empty() && !repo.is_empty(),
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidRepoKey {
            key: key.to_string(),
        })
    }
}

/// Checks that `url` parses, keeping the string as written.
fn validate_url(url: &str) -> Result<String, ConfigError> {
    Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(url.to_string())
}
