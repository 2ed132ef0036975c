//! Submission execution - effectful operations
//!
//! Takes the [`Submission`] produced by the wizard, renders the description
//! document, creates the MR, and archives the document locally.

use crate::document::{DescriptionTemplate, write_archive};
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{CreatedMergeRequest, Submission};
use std::path::PathBuf;
use tracing::{info, warn};

/// Where and how description documents are produced
#[derive(Debug, Clone)]
pub struct DocumentSettings {
    /// Template the description is rendered into
    pub template: DescriptionTemplate,
    /// Archive directory
    pub output_dir: PathBuf,
}

/// Create the MR described by `submission`.
///
/// The archive copy is written only after GitLab accepted the MR. A failed
/// archive write is logged but does not fail the submission, since the MR
/// already exists.
pub async fn execute_submission(
    platform: &dyn PlatformService,
    settings: &DocumentSettings,
    submission: Submission,
) -> Result<CreatedMergeRequest> {
    let document = settings
        .template
        .render(&submission.description, &submission.ticket);
    let branch = submission.source_branch.clone();
    let payload = submission.into_payload(document);

    let created = platform.submit_merge_request(&payload).await?;
    info!(mr_iid = created.iid, web_url = %created.web_url, "merge request created");

    if let Err(e) = write_archive(&settings.output_dir, &branch, &payload.description) {
        warn!(error = %e, "failed to archive description");
    }

    Ok(created)
}
