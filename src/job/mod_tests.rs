//! Tests for the job model.

use super::*;
use crate::report::JobReportConfig;

mod report_refs {
    use super::*;

    #[test]
    fn prefers_primary_refs() {
        let job = Job::new("unit", JobType::Presubmit, JobState::Pending)
            .with_refs(Refs::new("acme", "api"))
            .with_extra_refs(Refs::new("acme", "tools"));

        assert_eq!(job.report_refs().unwrap().full_name(), "acme/api");
    }

    #[test]
    fn falls_back_to_first_extra_refs() {
        let job = Job::new("nightly", JobType::Periodic, JobState::Success)
            .with_extra_refs(Refs::new("acme", "tools"))
            .with_extra_refs(Refs::new("acme", "docs"));

        assert_eq!(job.report_refs().unwrap().full_name(), "acme/tools");
    }

    #[test]
    fn none_without_any_refs() {
        let job = Job::new("nightly", JobType::Periodic, JobState::Success);

        assert!(job.report_refs().is_none());
    }
}

mod job_state {
    use super::*;

    #[test]
    fn display_uses_wire_name() {
        assert_eq!(JobState::Failure.to_string(), "failure");
        assert_eq!(JobType::Postsubmit.to_string(), "postsubmit");
    }
}

mod parsing {
    use super::*;

    #[test]
    fn parses_minimal_record() {
        let job = Job::from_json(r#"{"name":"lint","type":"presubmit","state":"pending"}"#).unwrap();

        assert_eq!(job.name, "lint");
        assert_eq!(job.job_type, JobType::Presubmit);
        assert_eq!(job.state, JobState::Pending);
        assert!(job.refs.is_none());
        assert!(job.extra_refs.is_empty());
        assert!(job.reporter_config.is_none());
    }

    #[test]
    fn parses_refs_and_reporter_override() {
        let job = Job::from_json(
            r#"{
                "name": "e2e",
                "type": "postsubmit",
                "state": "success",
                "refs": {"org": "acme", "repo": "api", "base_ref": "main",
                         "pulls": [{"number": 7, "author": "octo", "sha": "abc"}]},
                "reporter_config": {"url": "https://hooks.example.com", "job_states": ["success"]}
            }"#,
        )
        .unwrap();

        let refs = job.refs.as_ref().unwrap();
        assert_eq!(refs.base_ref.as_deref(), Some("main"));
        assert_eq!(refs.pulls[0].number, 7);

        let override_config = job.reporter_config.unwrap();
        assert_eq!(override_config.url.as_deref(), Some("https://hooks.example.com"));
        assert_eq!(override_config.job_states, Some(vec![JobState::Success]));
        assert_eq!(override_config.enabled, None);
    }

    #[test]
    fn ignores_unknown_fields() {
        let job = Job::from_json(
            r#"{"name":"lint","type":"batch","state":"error","cluster":"default"}"#,
        )
        .unwrap();

        assert_eq!(job.job_type, JobType::Batch);
    }

    #[test]
    fn rejects_unknown_state() {
        let result = Job::from_json(r#"{"name":"lint","type":"presubmit","state":"exploded"}"#);

        assert!(result.is_err());
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let job = Job::new("lint", JobType::Presubmit, JobState::Success)
            .with_reporter_config(JobReportConfig::default());
        let value = serde_json::to_value(&job).unwrap();

        assert_eq!(value["type"], "presubmit");
        assert!(value.get("refs").is_none());
        assert!(value.get("extra_refs").is_none());
        assert_eq!(value["reporter_config"], serde_json::json!({}));
    }
}
