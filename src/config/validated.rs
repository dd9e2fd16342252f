//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::webhook::HmacTokenGenerator;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::table::ReporterTable;
use super::toml::TomlConfig;

/// Where the job record is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSource {
    /// Standard input (`--job -`)
    Stdin,
    /// A JSON file
    File(PathBuf),
}

impl JobSource {
    fn from_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Job record location (required)
    pub job: JobSource,

    /// Reporter defaults and repository overrides
    pub reporter: ReporterTable,

    /// HTTP request timeout
    pub timeout: Duration,

    /// Signing key. `None` only when nothing will be signed.
    pub token_generator: Option<HmacTokenGenerator>,

    /// Dry-run mode (log the payload without sending it)
    pub dry_run: bool,

    /// Accept every report without sending anything
    pub disable_delivery: bool,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = self.reporter.defaults();
        write!(
            f,
            "Config {{ job: {}, url: {}, repos: {}, timeout: {}s, signing: {}, dry_run: {}, \
             disable_delivery: {} }}",
            self.job,
            defaults.url.as_deref().unwrap_or("none"),
            self.reporter.override_count(),
            self.timeout.as_secs(),
            self.token_generator.is_some(),
            self.dry_run,
            self.disable_delivery,
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The job source is missing
    /// - A URL or repository key is invalid
    /// - The timeout is zero
    /// - The HMAC secret is missing, unreadable, or empty
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let job = cli.job.as_deref().map(JobSource::from_arg).ok_or_else(|| {
            ConfigError::missing(field::JOB, "Use --job <PATH> (or '-' to read from stdin)")
        })?;

        let reporter = match toml {
            Some(toml) => ReporterTable::from_section(&toml.reporter, cli.url.as_deref())?,
            None => ReporterTable::from_section(&Default::default(), cli.url.as_deref())?,
        };

        let timeout = Self::resolve_timeout(cli, toml)?;
        let token_generator = Self::resolve_secret(cli, toml)?;

        Ok(Self {
            job,
            reporter,
            timeout,
            token_generator,
            dry_run: cli.dry_run,
            disable_delivery: cli.disable_delivery,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let toml = if let Some(ref path) = cli.config {
            Some(TomlConfig::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, toml.as_ref())
    }

    fn resolve_timeout(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > TOML > default
        let seconds = cli
            .timeout
            .or_else(|| toml.and_then(|t| t.http.timeout))
            .unwrap_or(defaults::TIMEOUT_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_secret(
        cli: &Cli,
        toml: Option<&TomlConfig>,
    ) -> Result<Option<HmacTokenGenerator>, ConfigError> {
        let path = cli
            .hmac_secret_file
            .as_deref()
            .or_else(|| toml.and_then(|t| t.http.hmac_secret_file.as_deref()));

        match path {
            Some(path) => read_secret(path).map(|secret| Some(HmacTokenGenerator::new(secret))),
            None if cli.dry_run || cli.disable_delivery => Ok(None),
            None => Err(ConfigError::missing(
                field::HMAC_SECRET,
                "Use --hmac-secret-file or set http.hmac_secret_file in config file",
            )),
        }
    }
}

/// Reads a secret file, dropping trailing whitespace.
fn read_secret(path: &Path) -> Result<Vec<u8>, ConfigError> {
    let mut secret = std::fs::read(path).map_err(|e| ConfigError::InvalidSecret {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let len = secret.trim_ascii_end().len();
    secret.truncate(len);

    if secret.is_empty() {
        return Err(ConfigError::InvalidSecret {
            path: path.to_path_buf(),
            reason: "file is empty".to_string(),
        });
    }

    Ok(secret)
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
