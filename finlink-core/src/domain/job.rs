//! Job domain types
//!
//! A job is the remote asynchronous task the API spawns when a bank connection
//! is created or refreshed. It carries an ordered sequence of steps (credential
//! verification first, then data retrieval), each with its own status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Remote asynchronous job tracking a connection validation/sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub created: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub steps: Vec<JobStep>,
    pub links: Option<JobLinks>,
}

/// One phase of a job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobStep {
    pub title: StepKind,
    #[serde(default)]
    pub status: StepStatus,
    /// Payload attached once the step completes (e.g. a link to the
    /// created resource, or error details).
    pub result: Option<serde_json::Value>,
}

/// Step status as reported on the wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Success,
    Failure,
    /// Any other value the API reports; treated as terminal.
    #[serde(other)]
    Unknown,
}

impl StepStatus {
    /// True once the step has left the `pending`/`in-progress` states.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending | Self::InProgress)
    }
}

/// Known step titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepKind {
    VerifyCredentials,
    RetrieveAccounts,
    RetrieveTransactions,
    #[serde(other)]
    Other,
}

/// Links attached to a job resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobLinks {
    #[serde(rename = "self")]
    pub self_link: Option<String>,
    /// URL of the connection this job operates on.
    pub source: Option<String>,
}

impl Job {
    /// The credentials step: always the first entry of the step sequence.
    pub fn credentials_step(&self) -> Option<&JobStep> {
        self.steps.first()
    }

    /// First step with the given title.
    pub fn step(&self, kind: StepKind) -> Option<&JobStep> {
        self.steps.iter().find(|s| s.title == kind)
    }

    /// The step the job is currently working through: the last step that has
    /// left `pending`, falling back to the first step of a fresh job.
    pub fn current_step(&self) -> Option<&JobStep> {
        self.steps
            .iter()
            .rev()
            .find(|s| s.status != StepStatus::Pending)
            .or_else(|| self.steps.first())
    }

    /// Id of the connection this job operates on, extracted from the job's
    /// `source` link.
    pub fn connection_id(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.source.as_deref())
            .and_then(|source| source.trim_end_matches('/').rsplit('/').next())
            .filter(|id| !id.is_empty())
    }

    /// True once account data can be fetched for the connection: the
    /// account-retrieval step has completed successfully.
    pub fn can_fetch_accounts(&self) -> bool {
        self.step(StepKind::RetrieveAccounts)
            .is_some_and(|s| s.status == StepStatus::Success)
    }

    /// True once the job has progressed past credential verification into the
    /// data-retrieval phases.
    pub fn can_fetch_transactions(&self) -> bool {
        self.current_step().is_some_and(|s| {
            matches!(
                s.title,
                StepKind::RetrieveAccounts | StepKind::RetrieveTransactions
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(title: StepKind, status: StepStatus) -> JobStep {
        JobStep {
            title,
            status,
            result: None,
        }
    }

    fn job_with_steps(steps: Vec<JobStep>) -> Job {
        Job {
            id: "job-1".to_string(),
            created: None,
            updated: None,
            steps,
            links: None,
        }
    }

    #[test]
    fn test_step_status_wire_format() {
        let parsed: StepStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, StepStatus::InProgress);

        let parsed: StepStatus = serde_json::from_str("\"success\"").unwrap();
        assert_eq!(parsed, StepStatus::Success);

        // Unrecognized statuses deserialize to Unknown and count as settled.
        let parsed: StepStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(parsed, StepStatus::Unknown);
        assert!(parsed.is_settled());
    }

    #[test]
    fn test_absent_status_is_pending() {
        let parsed: JobStep =
            serde_json::from_str(r#"{"title": "verify-credentials"}"#).unwrap();
        assert_eq!(parsed.status, StepStatus::Pending);
        assert!(!parsed.status.is_settled());
    }

    #[test]
    fn test_job_deserializes_from_api_payload() {
        let body = r#"{
            "id": "e9132638",
            "created": "2024-03-01T10:15:00Z",
            "updated": "2024-03-01T10:15:30Z",
            "steps": [
                {"title": "verify-credentials", "status": "success", "result": {"type": "link"}},
                {"title": "retrieve-accounts", "status": "in-progress"}
            ],
            "links": {
                "self": "https://api.example.com/jobs/e9132638",
                "source": "https://api.example.com/users/u1/connections/c-77"
            }
        }"#;

        let job: Job = serde_json::from_str(body).unwrap();
        assert_eq!(job.id, "e9132638");
        assert_eq!(job.steps.len(), 2);
        assert_eq!(job.steps[0].title, StepKind::VerifyCredentials);
        assert_eq!(job.connection_id(), Some("c-77"));
    }

    #[test]
    fn test_credentials_step_is_first() {
        let job = job_with_steps(vec![
            step(StepKind::VerifyCredentials, StepStatus::InProgress),
            step(StepKind::RetrieveAccounts, StepStatus::Pending),
        ]);
        assert_eq!(
            job.credentials_step().unwrap().title,
            StepKind::VerifyCredentials
        );

        let empty = job_with_steps(vec![]);
        assert!(empty.credentials_step().is_none());
    }

    #[test]
    fn test_current_step_tracks_progress() {
        let job = job_with_steps(vec![
            step(StepKind::VerifyCredentials, StepStatus::Success),
            step(StepKind::RetrieveAccounts, StepStatus::InProgress),
            step(StepKind::RetrieveTransactions, StepStatus::Pending),
        ]);
        assert_eq!(job.current_step().unwrap().title, StepKind::RetrieveAccounts);

        // A fresh job points at its first step.
        let fresh = job_with_steps(vec![
            step(StepKind::VerifyCredentials, StepStatus::Pending),
            step(StepKind::RetrieveAccounts, StepStatus::Pending),
        ]);
        assert_eq!(
            fresh.current_step().unwrap().title,
            StepKind::VerifyCredentials
        );
    }

    #[test]
    fn test_can_fetch_accounts() {
        let job = job_with_steps(vec![
            step(StepKind::VerifyCredentials, StepStatus::Success),
            step(StepKind::RetrieveAccounts, StepStatus::Success),
            step(StepKind::RetrieveTransactions, StepStatus::InProgress),
        ]);
        assert!(job.can_fetch_accounts());
        assert!(job.can_fetch_transactions());

        let verifying = job_with_steps(vec![
            step(StepKind::VerifyCredentials, StepStatus::InProgress),
            step(StepKind::RetrieveAccounts, StepStatus::Pending),
        ]);
        assert!(!verifying.can_fetch_accounts());
        assert!(!verifying.can_fetch_transactions());
    }

    #[test]
    fn test_connection_id_handles_trailing_slash() {
        let mut job = job_with_steps(vec![]);
        job.links = Some(JobLinks {
            self_link: None,
            source: Some("https://api.example.com/users/u1/connections/c-9/".to_string()),
        });
        assert_eq!(job.connection_id(), Some("c-9"));

        job.links = None;
        assert_eq!(job.connection_id(), None);
    }
}
