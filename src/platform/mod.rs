//! Platform service for GitLab
//!
//! The wizard talks to the code-hosting service only through this trait, so
//! tests can swap in a mock.

mod gitlab;

pub use gitlab::GitLabService;

use crate::error::Result;
use crate::types::{
    CreatedMergeRequest, Identity, MergeRequestPayload, MergeRequestSummary, StartupData,
};
use async_trait::async_trait;
use tracing::debug;

/// Platform service trait for MR operations
///
/// Every method is a single round trip. Failures are returned as-is; nothing
/// is retried.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Resolve the user the access token belongs to
    async fn resolve_identity(&self) -> Result<Identity>;

    /// List the project's open merge requests
    async fn list_open_merge_requests(&self) -> Result<Vec<MergeRequestSummary>>;

    /// Create a merge request
    async fn submit_merge_request(
        &self,
        payload: &MergeRequestPayload,
    ) -> Result<CreatedMergeRequest>;
}

/// Resolve the identity, then fetch the open MR listing.
///
/// The listing is only requested once the identity is known, so an
/// authentication failure never reaches the listing endpoint.
pub async fn load_startup_data(platform: &dyn PlatformService) -> Result<StartupData> {
    let identity = platform.resolve_identity().await?;
    debug!(user_id = identity.id, "authenticated");

    let merge_requests = platform.list_open_merge_requests().await?;
    debug!(count = merge_requests.len(), "loaded open MRs");

    Ok(StartupData {
        identity,
        merge_requests,
    })
}
