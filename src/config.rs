//! Runtime configuration loaded from the process environment.
//!
//! Every value is parsed up front so that a bad URL or regex aborts the
//! process before the terminal UI starts.

use crate::error::{Error, Result};
use crate::ticket::TicketRules;
use regex::Regex;
use std::fmt;
use std::path::PathBuf;
use url::Url;

/// GitLab API root, e.g. `https://gitlab.com/api/v4`
pub const BASE_URL_VAR: &str = "GITLAB_BASE_URL";
/// Personal access token
pub const TOKEN_VAR: &str = "GITLAB_PRIVATE_TOKEN";
/// Project API path (`/projects/<id>`) or namespaced path (`group/name`)
pub const PROJECT_VAR: &str = "GITLAB_PROJECT";
/// Regex deciding whether the branch already names a ticket
pub const TICKET_PATTERN_VAR: &str = "TURTLE_TICKET_PATTERN";
/// Ticket prefix label used in composed titles
pub const TICKET_PREFIX_VAR: &str = "TURTLE_TICKET_PREFIX";
/// Target branch for new MRs
pub const TARGET_BRANCH_VAR: &str = "TURTLE_TARGET_BRANCH";
/// Path of the reviewer roster TOML file
pub const REVIEWERS_VAR: &str = "TURTLE_REVIEWERS";
/// Path of the description template
pub const TEMPLATE_VAR: &str = "TURTLE_TEMPLATE";
/// Directory receiving rendered description documents
pub const OUTPUT_DIR_VAR: &str = "TURTLE_OUTPUT_DIR";

const DEFAULT_TICKET_PATTERN: &str = r"hapo[\s\-0-9]+";
const DEFAULT_TICKET_PREFIX: &str = "Hapo";
const DEFAULT_TARGET_BRANCH: &str = "stage";
const DEFAULT_REVIEWERS: &str = "reviewers.toml";
const DEFAULT_TEMPLATE: &str = "migrations/template.md";
const DEFAULT_OUTPUT_DIR: &str = "migrations";

/// Connection settings for the GitLab API
#[derive(Clone)]
pub struct GitLabConfig {
    /// API root URL
    pub base_url: Url,
    /// Access token, sent as `PRIVATE-TOKEN`
    pub token: String,
    /// Project path appended to the API root, always starting with `/`
    pub project_path: String,
}

impl fmt::Debug for GitLabConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[redacted]")
            .field("project_path", &self.project_path)
            .finish()
    }
}

/// Complete runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// GitLab connection
    pub gitlab: GitLabConfig,
    /// Ticket title rules
    pub ticket: TicketRules,
    /// Target branch for new MRs
    pub target_branch: String,
    /// Reviewer roster file
    pub reviewers_path: PathBuf,
    /// Description template file
    pub template_path: PathBuf,
    /// Archive directory for rendered descriptions
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require =
            |key: &str| get(key).ok_or_else(|| Error::Config(format!("{key} is not set")));

        let raw_url = require(BASE_URL_VAR)?;
        let base_url = Url::parse(raw_url.trim())
            .map_err(|e| Error::Config(format!("{BASE_URL_VAR} is not a valid URL: {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "{BASE_URL_VAR} must be an http(s) URL, got {}",
                base_url.scheme()
            )));
        }

        let token = require(TOKEN_VAR)?.trim().to_string();
        let project_path = project_api_path(&require(PROJECT_VAR)?)?;

        let pattern = get(TICKET_PATTERN_VAR).unwrap_or_else(|| DEFAULT_TICKET_PATTERN.to_string());
        let pattern = Regex::new(&pattern)
            .map_err(|e| Error::Config(format!("{TICKET_PATTERN_VAR} is not a valid regex: {e}")))?;
        let prefix = get(TICKET_PREFIX_VAR).unwrap_or_else(|| DEFAULT_TICKET_PREFIX.to_string());

        Ok(Self {
            gitlab: GitLabConfig {
                base_url,
                token,
                project_path,
            },
            ticket: TicketRules::new(pattern, prefix),
            target_branch: get(TARGET_BRANCH_VAR)
                .unwrap_or_else(|| DEFAULT_TARGET_BRANCH.to_string()),
            reviewers_path: get(REVIEWERS_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_REVIEWERS), PathBuf::from),
            template_path: get(TEMPLATE_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_TEMPLATE), PathBuf::from),
            output_dir: get(OUTPUT_DIR_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from),
        })
    }
}

/// Normalize the project setting into an API path.
///
/// `/projects/123` is used as-is; `group/name` becomes
/// `/projects/group%2Fname`.
fn project_api_path(raw: &str) -> Result<String> {
    let raw = raw.trim().trim_end_matches('/');
    if raw.starts_with('/') {
        return Ok(raw.to_string());
    }
    if raw.is_empty() {
        return Err(Error::Config(format!("{PROJECT_VAR} is empty")));
    }
    Ok(format!("/projects/{}", urlencoding::encode(raw)))
}
