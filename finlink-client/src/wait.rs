//! Bounded credentials poller
//!
//! Waits for a job's credentials step (the first step of its sequence) to
//! leave the `pending`/`in-progress` states, re-fetching the job at a fixed
//! cadence until it settles or the caller's budget runs out.
//!
//! The wait is a small state machine driven by one loop: each cycle checks the
//! budget, refreshes the job (attempt 0 inspects the caller's state as-is),
//! inspects the credentials step, and either settles or sleeps into the next
//! attempt. The job travels through the states explicitly; there is no shared
//! mutable state and no attempt ever starts once the budget check fails.

use crate::AggregatorClient;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use finlink_core::domain::job::{Job, StepStatus};
use std::time::Duration;
use tokio::time;
use tracing::debug;

/// Source of fresh job state between poll attempts.
///
/// [`AggregatorClient`] implements this by re-fetching the job from the API;
/// tests substitute a scripted source.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch the latest state of the given job.
    async fn refresh(&self, job: &Job) -> Result<Job>;
}

/// State of an in-flight credentials wait.
#[derive(Debug)]
enum WaitState {
    /// About to run attempt `attempt` against the carried job state.
    Pending { attempt: u32, job: Job },
    /// The credentials step settled; `granted` is true only for `success`.
    Settled { granted: bool },
    /// The budget ran out before the step settled.
    TimedOut,
}

/// Wait for a job's credentials step to settle
///
/// * `timeout` - total budget for the wait, measured in whole poll intervals
///   (`attempt * wait_time`, not wall-clock time)
/// * `wait_time` - fixed delay between attempts
///
/// Attempt 0 inspects `job` without refreshing; every later attempt re-fetches
/// through `source` first. Resolves `Ok(true)` when the credentials step
/// settles with `success`, `Ok(false)` for any other terminal status. Fails
/// with [`ClientError::Timeout`] once `attempt * wait_time` exceeds `timeout`,
/// strictly before issuing another refresh, and propagates refresh errors
/// unmodified.
pub async fn wait_for_credentials<S>(
    source: &S,
    job: Job,
    timeout: Duration,
    wait_time: Duration,
) -> Result<bool>
where
    S: JobSource + ?Sized,
{
    let mut state = WaitState::Pending { attempt: 0, job };

    loop {
        state = match state {
            WaitState::Pending { attempt, job } => {
                advance(source, attempt, job, timeout, wait_time).await?
            }
            WaitState::Settled { granted } => return Ok(granted),
            WaitState::TimedOut => return Err(ClientError::Timeout),
        };
    }
}

/// Run one poll cycle and produce the next state.
async fn advance<S>(
    source: &S,
    attempt: u32,
    job: Job,
    timeout: Duration,
    wait_time: Duration,
) -> Result<WaitState>
where
    S: JobSource + ?Sized,
{
    if budget_exhausted(attempt, wait_time, timeout) {
        debug!(attempt, "credentials wait exceeded its budget");
        return Ok(WaitState::TimedOut);
    }

    let job = if attempt == 0 {
        job
    } else {
        source.refresh(&job).await?
    };

    if let Some(step) = job.credentials_step() {
        if step.status.is_settled() {
            debug!(attempt, status = ?step.status, "credentials step settled");
            return Ok(WaitState::Settled {
                granted: step.status == StepStatus::Success,
            });
        }
    }

    debug!(attempt, "credentials step not settled yet");
    time::sleep(wait_time).await;

    Ok(WaitState::Pending {
        attempt: attempt + 1,
        job,
    })
}

/// True once the cadence estimate for this attempt exceeds the budget.
/// Overflowing the estimate counts as exhausted.
fn budget_exhausted(attempt: u32, wait_time: Duration, timeout: Duration) -> bool {
    wait_time
        .checked_mul(attempt)
        .is_none_or(|elapsed| elapsed > timeout)
}

impl AggregatorClient {
    /// Wait for a connection job's credentials step to settle
    ///
    /// Convenience wrapper over [`wait_for_credentials`] that refreshes through
    /// this client.
    ///
    /// # Example
    /// ```no_run
    /// # use finlink_client::AggregatorClient;
    /// # use std::time::Duration;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = AggregatorClient::new("https://au-api.example.com", "token");
    /// let job = client.get_job("job-1").await?;
    /// let ok = client
    ///     .wait_for_credentials(&job, Duration::from_secs(60), Duration::from_secs(2))
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn wait_for_credentials(
        &self,
        job: &Job,
        timeout: Duration,
        wait_time: Duration,
    ) -> Result<bool> {
        wait_for_credentials(self, job.clone(), timeout, wait_time).await
    }
}
