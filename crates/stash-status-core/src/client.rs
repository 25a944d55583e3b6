//! The seam between the publisher and a source-control host.

use async_trait::async_trait;

use crate::domain::{BuildStatus, ClientError, CommitId};

/// Sets a build status on a commit.
///
/// Implementations must be idempotent: the publisher repeats the exact same
/// call after a failure. Calls are strictly sequential.
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Attach `status` to `commit`.
    ///
    /// Returns the status as recorded by the host when the host reports one
    /// (e.g. with `date_added` filled in), or `None` when it only acknowledges.
    async fn set_build_status(
        &self,
        commit: &CommitId,
        status: &BuildStatus,
    ) -> Result<Option<BuildStatus>, ClientError>;
}
