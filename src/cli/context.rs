//! Startup context for the wizard
//!
//! Everything that can fail before the terminal UI starts is done here, so
//! a failure aborts the process without ever drawing a screen.

use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use turtle::config::Config;
use turtle::document::DescriptionTemplate;
use turtle::error::Result;
use turtle::git::current_branch;
use turtle::platform::{GitLabService, PlatformService};
use turtle::roster::load_roster;
use turtle::submit::DocumentSettings;
use turtle::types::Reviewer;
use turtle::wizard::WizardConfig;

/// Shared context for running the wizard
pub struct CommandContext {
    /// Runtime configuration
    pub config: Config,
    /// Branch checked out in the working directory
    pub source_branch: String,
    /// Configured reviewers, before self-filtering
    pub roster: Vec<Reviewer>,
    /// Description template
    pub template: DescriptionTemplate,
    /// Platform service (GitLab)
    pub platform: Arc<dyn PlatformService>,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// This performs the setup that must succeed before the UI starts:
    /// - Load and validate configuration
    /// - Detect the current branch
    /// - Load the reviewer roster and description template
    /// - Create the platform service
    pub fn new(path: &Path) -> Result<Self> {
        let config = Config::from_env()?;
        debug!(gitlab = ?config.gitlab, "configuration loaded");

        let source_branch = current_branch(path)?;
        let roster = load_roster(&config.reviewers_path)?;
        let template = DescriptionTemplate::load(&config.template_path)?;
        let platform: Arc<dyn PlatformService> = Arc::new(GitLabService::new(&config.gitlab)?);

        Ok(Self {
            config,
            source_branch,
            roster,
            template,
            platform,
        })
    }

    /// Wizard inputs derived from this context
    pub fn wizard_config(&self) -> WizardConfig {
        WizardConfig {
            source_branch: self.source_branch.clone(),
            target_branch: self.config.target_branch.clone(),
            ticket: self.config.ticket.clone(),
            roster: self.roster.clone(),
        }
    }

    /// Document settings derived from this context
    pub fn document_settings(&self) -> DocumentSettings {
        DocumentSettings {
            template: self.template.clone(),
            output_dir: self.config.output_dir.clone(),
        }
    }
}
