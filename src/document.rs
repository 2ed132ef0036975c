//! Description document: template rendering and the local archive copy

use crate::error::{Error, Result};
use crate::format::bullet_lines;
use crate::git::sanitize_branch;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder replaced with the bulleted description
const DESCRIPTION_SLOT: &str = "${1}";
/// Placeholder replaced with the ticket ID
const TICKET_SLOT: &str = "${2}";

/// Used when no template file exists
const DEFAULT_TEMPLATE: &str = "## Ticket\n\n${2}\n\n## Changes\n\n${1}\n";

/// MR description template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionTemplate {
    text: String,
}

impl Default for DescriptionTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl DescriptionTemplate {
    /// Create a template from its text
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Load a template file, falling back to the built-in template if it
    /// doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no template file, using built-in template");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .map_err(|e| Error::Template(format!("failed to read {}: {e}", path.display())))?;
        Ok(Self::new(text))
    }

    /// Fill in the first occurrence of each placeholder
    pub fn render(&self, description: &str, ticket: &str) -> String {
        self.text
            .replacen(DESCRIPTION_SLOT, &bullet_lines(description), 1)
            .replacen(TICKET_SLOT, ticket, 1)
    }
}

/// Path of the archived document for a branch
pub fn archive_path(dir: &Path, branch: &str) -> PathBuf {
    dir.join(format!("{}.md", sanitize_branch(branch)))
}

/// Write the rendered document to `<dir>/<sanitized branch>.md`.
///
/// Creates the directory if it doesn't exist.
pub fn write_archive(dir: &Path, branch: &str, document: &str) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .map_err(|e| Error::Template(format!("failed to create {}: {e}", dir.display())))?;
    }

    let path = archive_path(dir, branch);
    fs::write(&path, document)
        .map_err(|e| Error::Template(format!("failed to write {}: {e}", path.display())))?;

    debug!(path = %path.display(), "archived description");
    Ok(path)
}
