//! Publish a build status for the working copy's current commit.
//!
//! One publish walks through
//! `ResolvingCommit -> BuildingStatus -> Publishing(1..=N) -> Emitted`.
//! Only the `Publishing` step loops: each failed call is repeated after a
//! fixed delay until the retry budget is spent.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::build_env::BuildEnv;
use crate::client::StatusClient;
use crate::domain::{BuildStatus, CommitId, PublishError, PublishRequest, PublishResult, Result};
use crate::git;

/// Pause between two attempts at the host.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How the publish call is repeated after a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first one (0 = single attempt).
    pub retry_attempts: u32,
    /// Fixed wait between attempts. No backoff, no jitter.
    pub delay: Duration,
    /// Give up on the first non-transient error instead of spending the budget.
    pub fail_fast: bool,
}

impl RetryPolicy {
    pub fn new(retry_attempts: u32) -> Self {
        Self {
            retry_attempts,
            delay: DEFAULT_RETRY_DELAY,
            fail_fast: false,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Total number of calls the policy allows.
    pub fn max_attempts(&self) -> u32 {
        self.retry_attempts.saturating_add(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Call `client` until it accepts `status` or the policy is exhausted.
///
/// Returns the status as recorded by the host, falling back to `status`
/// itself when the host only acknowledges. Attempts are strictly sequential
/// and no delay follows the last one.
pub async fn set_with_retry(
    client: &dyn StatusClient,
    commit: &CommitId,
    status: &BuildStatus,
    policy: &RetryPolicy,
) -> Result<BuildStatus> {
    let max_attempts = policy.max_attempts();
    let mut attempt = 1;

    loop {
        match client.set_build_status(commit, status).await {
            Ok(updated) => {
                info!(attempt, "Status set successfully");
                return Ok(updated.unwrap_or_else(|| status.clone()));
            }
            Err(err) => {
                let permanent = policy.fail_fast && !err.is_transient();
                if attempt >= max_attempts || permanent {
                    return Err(PublishError::ExhaustedRetries {
                        attempts: attempt,
                        last_error: err,
                    });
                }
                warn!(attempt, max_attempts, error = %err, "Failed to set build status, retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}

/// Serialize the response document for `result` to `out`.
pub fn emit<W: Write>(result: &PublishResult, mut out: W) -> Result<()> {
    serde_json::to_writer(&mut out, &result.to_response())
        .map_err(|e| PublishError::Output(e.into()))?;
    out.flush().map_err(PublishError::Output)
}

/// Turns a [`PublishRequest`] into a status on the host.
pub struct StatusPublisher {
    client: Arc<dyn StatusClient>,
    env: BuildEnv,
    retry_delay: Duration,
}

impl StatusPublisher {
    pub fn new(client: Arc<dyn StatusClient>, env: BuildEnv) -> Self {
        Self {
            client,
            env,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Retry policy for `request`.
    pub fn policy_for(&self, request: &PublishRequest) -> RetryPolicy {
        RetryPolicy::new(request.retry_attempts)
            .with_delay(self.retry_delay)
            .with_fail_fast(request.fail_fast)
    }

    /// Assemble the payload. Pure; cannot fail.
    pub fn build_status(&self, request: &PublishRequest) -> BuildStatus {
        BuildStatus {
            state: request.desired_state.clone(),
            key: self.env.status_key(),
            name: self.env.status_name(),
            url: self.env.build_url(),
            description: request.description.clone(),
            date_added: 0,
        }
    }

    /// Resolve the commit under `base_dir` and set its build status.
    pub async fn publish(&self, base_dir: &Path, request: &PublishRequest) -> Result<PublishResult> {
        let repo_dir = git::repository_dir(base_dir, &request.repository_path)?;
        debug!(repo = %repo_dir.display(), "Resolving commit");
        let commit = git::resolve_head(&repo_dir).await?;
        info!(commit = commit.short(), "Setting build status");

        let status = self.build_status(request);
        info!(
            state = %status.state,
            key = %status.key,
            name = %status.name,
            url = %status.url,
            "Build status {:?}",
            status.description
        );

        let policy = self.policy_for(request);
        let recorded = set_with_retry(self.client.as_ref(), &commit, &status, &policy).await?;
        Ok(PublishResult::new(commit, recorded))
    }

    /// [`publish`](Self::publish), then write the response document to `out`.
    ///
    /// A write failure surfaces as [`PublishError::Output`]; the status has
    /// already been set at that point and is not published again.
    pub async fn publish_to<W: Write>(
        &self,
        base_dir: &Path,
        request: &PublishRequest,
        out: W,
    ) -> Result<PublishResult> {
        let result = self.publish(base_dir, request).await?;
        emit(&result, out)?;
        Ok(result)
    }
}
