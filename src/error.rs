//! Error types for turtle

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// All errors produced by turtle
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or invalid configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// GitLab returned an error status or an unexpected body
    #[error("GitLab API error: {0}")]
    GitLabApi(String),

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Git repository could not be read
    #[error("git error: {0}")]
    Git(String),

    /// Description template could not be loaded or written
    #[error("template error: {0}")]
    Template(String),

    /// Reviewer roster could not be loaded
    #[error("reviewer roster error: {0}")]
    Roster(String),

    /// Terminal or filesystem I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
