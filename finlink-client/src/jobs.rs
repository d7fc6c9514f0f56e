//! Job-related API endpoints

use crate::AggregatorClient;
use crate::error::Result;
use crate::wait::JobSource;
use async_trait::async_trait;
use finlink_core::domain::job::Job;
use reqwest::Method;

impl AggregatorClient {
    // =============================================================================
    // Job Retrieval
    // =============================================================================

    /// Get a job by id
    ///
    /// This is also the refresh primitive the credentials poller uses to
    /// re-fetch job state between attempts.
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let response = self
            .request(Method::GET, &format!("jobs/{}", job_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Step Inspection
    // =============================================================================

    /// Check whether account data can be fetched for the job's connection
    ///
    /// # Arguments
    /// * `job` - The job to inspect
    /// * `reload` - When true, re-fetch the job from the API first; otherwise
    ///   inspect the state the caller already holds
    pub async fn can_fetch_accounts(&self, job: &Job, reload: bool) -> Result<bool> {
        if reload {
            Ok(self.get_job(&job.id).await?.can_fetch_accounts())
        } else {
            Ok(job.can_fetch_accounts())
        }
    }

    /// Check whether the job has progressed past credential verification into
    /// the data-retrieval phases
    ///
    /// Same reload semantics as [`can_fetch_accounts`](Self::can_fetch_accounts).
    pub async fn can_fetch_transactions(&self, job: &Job, reload: bool) -> Result<bool> {
        if reload {
            Ok(self.get_job(&job.id).await?.can_fetch_transactions())
        } else {
            Ok(job.can_fetch_transactions())
        }
    }
}

#[async_trait]
impl JobSource for AggregatorClient {
    async fn refresh(&self, job: &Job) -> Result<Job> {
        self.get_job(&job.id).await
    }
}
