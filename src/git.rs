//! Current branch lookup

use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Name of the branch checked out in the repository containing `path`.
///
/// Fails outside a git repository and on a detached HEAD.
pub fn current_branch(path: &Path) -> Result<String> {
    let repo = gix::discover(path)
        .map_err(|e| Error::Git(format!("no git repository at {}: {e}", path.display())))?;

    let head = repo
        .head_name()
        .map_err(|e| Error::Git(format!("failed to read HEAD: {e}")))?
        .ok_or_else(|| Error::Git("HEAD is detached, check out a branch first".to_string()))?;

    let branch = head.shorten().to_string();
    debug!(branch, "detected current branch");
    Ok(branch)
}

/// File-system safe form of a branch name (`feature/x` becomes `feature-x`)
pub fn sanitize_branch(branch: &str) -> String {
    branch.replace('/', "-")
}
