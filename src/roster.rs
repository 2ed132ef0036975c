//! Reviewer roster loaded from a TOML file.
//!
//! ```toml
//! [[reviewers]]
//! label = "Grace Hopper"
//! id = 1234567
//! ```

use crate::error::{Error, Result};
use crate::types::Reviewer;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Default, Deserialize)]
struct RosterFile {
    #[serde(default)]
    reviewers: Vec<Reviewer>,
}

/// Load the reviewer roster from disk.
///
/// Returns an empty roster if the file doesn't exist.
pub fn load_roster(path: &Path) -> Result<Vec<Reviewer>> {
    if !path.exists() {
        warn!(path = %path.display(), "reviewer roster not found, no reviewers available");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| Error::Roster(format!("failed to read {}: {e}", path.display())))?;

    let roster: RosterFile = toml::from_str(&content)
        .map_err(|e| Error::Roster(format!("failed to parse {}: {e}", path.display())))?;

    Ok(roster.reviewers)
}
