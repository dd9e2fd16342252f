//! Tests for the run module.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use webhook_reporter::config::Cli;
use webhook_reporter::job::{JobState, JobType};
use webhook_reporter::webhook::{
    HmacTokenGenerator, SendError, TIMESTAMP_HEADER, TOKEN_HEADER, TokenGenerator, digest,
};

use super::*;

const JOB_JSON: &str = r#"{
    "name": "unit",
    "type": "presubmit",
    "state": "failure",
    "refs": {"org": "acme", "repo": "widgets"}
}"#;

fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{content}").unwrap();
    file
}

fn config(args: &[&str], toml: &str) -> ValidatedConfig {
    let mut full_args = vec!["webhook-reporter", "--job", "-"];
    full_args.extend(args);
    let cli = Cli::parse_from_iter(full_args);
    let toml = webhook_reporter::config::TomlConfig::parse(toml).unwrap();
    ValidatedConfig::from_raw(&cli, Some(&toml)).unwrap()
}

const REPORT_FAILURES: &str = r#"
    [reporter]
    job_types = ["presubmit"]
    job_states = ["failure"]
"#;

mod run_error {
    use super::*;
    use webhook_reporter::report::ConfigurationError;

    #[test]
    fn job_read_displays_source() {
        let error = RunError::JobRead {
            source_name: "job.json".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };

        assert_eq!(error.to_string(), "Failed to read job from job.json: missing");
        assert!(error.is_input_error());
    }

    #[test]
    fn configuration_errors_are_input_errors() {
        let error = RunError::Report(ReportError::Configuration {
            job: "unit".to_string(),
            source: ConfigurationError::MissingUrl,
        });

        assert!(error.is_input_error());
    }

    #[test]
    fn delivery_errors_are_not_input_errors() {
        let error = RunError::Report(ReportError::Send {
            job: "unit".to_string(),
            url: "https://example.com".to_string(),
            source: SendError::Transport(HttpError::Timeout),
        });

        assert!(!error.is_input_error());
        assert!(!RunError::HttpClient(HttpError::Timeout).is_input_error());
    }
}

mod job_input {
    use super::*;

    #[tokio::test]
    async fn reads_job_from_file() {
        let file = temp_file(JOB_JSON);

        let job = read_job(&JobSource::File(file.path().to_path_buf()))
            .await
            .unwrap();

        assert_eq!(job.name, "unit");
        assert_eq!(job.job_type, JobType::Presubmit);
        assert_eq!(job.state, JobState::Failure);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let source = JobSource::File("/nonexistent_dir_12345/job.json".into());

        let result = read_job(&source).await;

        assert!(matches!(result, Err(RunError::JobRead { .. })));
    }

    #[tokio::test]
    async fn invalid_json_is_parse_error() {
        let file = temp_file(r#"{"name": "unit""#);

        let result = read_job(&JobSource::File(file.path().to_path_buf())).await;

        assert!(matches!(result, Err(RunError::JobParse(_))));
    }
}

mod reporting {
    use super::*;

    fn never() -> impl Future<Output = ()> + Send + 'static {
        std::future::pending()
    }

    #[tokio::test]
    async fn delivers_signed_notification() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let url = format!("{}/hook", server.uri());
        let secret = temp_file("s3cret\n");
        let config = config(
            &[
                "--url",
                url.as_str(),
                "--hmac-secret-file",
                secret.path().to_str().unwrap(),
            ],
            REPORT_FAILURES,
        );
        let reporter = create_reporter(config).unwrap();
        let job = Job::from_json(JOB_JSON).unwrap();

        let outcome = report_job(&reporter, &job, never()).await.unwrap();

        assert_eq!(outcome, Outcome::Reported);

        let requests = server.received_requests().await.unwrap();
        let request = &requests[0];
        let timestamp = request.headers[TIMESTAMP_HEADER].to_str().unwrap();
        let token = request.headers[TOKEN_HEADER].to_str().unwrap();
        let expected = HmacTokenGenerator::new("s3cret")
            .generate(&digest(&url, timestamp, &request.body))
            .unwrap();
        assert_eq!(token, expected);

        let payload: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(payload["prow_job"]["name"], "unit");
    }

    #[tokio::test]
    async fn repo_override_selects_target() {
        let server = MockServer::start().await;
        let toml = format!(
            "{REPORT_FAILURES}\n[reporter.repos.\"acme\"]\nurl = \"{}/acme\"",
            server.uri()
        );
        let config = config(&["--url", "https://unused.invalid", "--disable-delivery"], &toml);
        let reporter = create_reporter(config).unwrap();
        let job = Job::from_json(JOB_JSON).unwrap();

        let outcome = report_job(&reporter, &job, never()).await.unwrap();

        // Delivery is disabled, so the override only shows up in resolution.
        assert_eq!(outcome, Outcome::Reported);
        let (global, _) = reporter.resolve(&job);
        assert_eq!(global.url, Some(format!("{}/acme", server.uri())));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unmatched_job_is_skipped() {
        let server = MockServer::start().await;
        let url = format!("{}/hook", server.uri());
        let config = config(&["--url", url.as_str(), "--dry-run"], REPORT_FAILURES);
        let reporter = create_reporter(config).unwrap();
        let mut job = Job::from_json(JOB_JSON).unwrap();
        job.state = JobState::Success;

        let outcome = report_job(&reporter, &job, never()).await.unwrap();

        assert_eq!(outcome, Outcome::Skipped);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn dry_run_sends_nothing() {
        let server = MockServer::start().await;
        let url = format!("{}/hook", server.uri());
        let config = config(&["--url", url.as_str(), "--dry-run"], REPORT_FAILURES);
        let reporter = create_reporter(config).unwrap();
        let job = Job::from_json(JOB_JSON).unwrap();

        let outcome = report_job(&reporter, &job, never()).await.unwrap();

        assert_eq!(outcome, Outcome::Reported);
        assert!(reporter.is_dry_run());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_url_fails_as_input_error() {
        let config = config(&["--dry-run"], REPORT_FAILURES);
        let reporter = create_reporter(config).unwrap();
        let job = Job::from_json(JOB_JSON).unwrap();

        let error = report_job(&reporter, &job, never()).await.unwrap_err();

        assert!(error.is_input_error());
    }

    #[tokio::test]
    async fn endpoint_failure_is_delivery_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let url = format!("{}/hook", server.uri());
        let secret = temp_file("s3cret");
        let config = config(
            &[
                "--url",
                url.as_str(),
                "--hmac-secret-file",
                secret.path().to_str().unwrap(),
            ],
            REPORT_FAILURES,
        );
        let reporter = create_reporter(config).unwrap();
        let job = Job::from_json(JOB_JSON).unwrap();

        let error = report_job(&reporter, &job, never()).await.unwrap_err();

        assert!(!error.is_input_error());
        assert!(matches!(
            error,
            RunError::Report(ReportError::Send {
                source: SendError::Delivery { .. },
                ..
            })
        ));
    }

    #[tokio::test]
    async fn shutdown_cancels_delivery() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;

        let url = format!("{}/hook", server.uri());
        let secret = temp_file("s3cret");
        let config = config(
            &[
                "--url",
                url.as_str(),
                "--hmac-secret-file",
                secret.path().to_str().unwrap(),
            ],
            REPORT_FAILURES,
        );
        let reporter = create_reporter(config).unwrap();
        let job = Job::from_json(JOB_JSON).unwrap();

        let shutdown = async { tokio::time::sleep(Duration::from_millis(50)).await };
        let error = report_job(&reporter, &job, shutdown).await.unwrap_err();

        assert!(matches!(
            error,
            RunError::Report(ReportError::Send {
                source: SendError::Transport(HttpError::Cancelled),
                ..
            })
        ));
    }
}
