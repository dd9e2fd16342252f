//! Lookup of repository-level reporter configuration.

use crate::job::Refs;

use super::GlobalReportConfig;

/// Resolves the reporter configuration that applies to a repository.
///
/// Called once per predicate evaluation or report. `refs` is `None` for jobs
/// without any checkout. Returning [`GlobalReportConfig::default`] when
/// nothing is configured is expected, not an error.
///
/// Closures with the matching signature implement this trait, and a plain
/// [`GlobalReportConfig`] acts as a source that ignores the refs.
pub trait GlobalConfigSource: Send + Sync {
    /// Returns the configuration for `refs`.
    fn global_config(&self, refs: Option<&Refs>) -> GlobalReportConfig;
}

impl<F> GlobalConfigSource for F
where
    F: Fn(Option<&Refs>) -> GlobalReportConfig + Send + Sync,
{
    fn global_config(&self, refs: Option<&Refs>) -> GlobalReportConfig {
        self(refs)
    }
}

impl GlobalConfigSource for GlobalReportConfig {
    fn global_config(&self, _refs: Option<&Refs>) -> GlobalReportConfig {
        self.clone()
    }
}
