//! CLI entry: startup, terminal session, and final report

mod context;
pub mod style;

use anstream::println;
use anyhow::Context;
use context::CommandContext;
use std::path::Path;
use std::sync::Arc;
use style::{Stylize, check, link};
use tokio::sync::mpsc;
use turtle::app::{self, App};
use turtle::types::CreatedMergeRequest;
use turtle::wizard::Wizard;

/// Run the wizard in the repository at `path`
pub async fn run_wizard(path: &Path) -> anyhow::Result<Option<CreatedMergeRequest>> {
    let ctx = CommandContext::new(path).context("startup failed")?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let app = App::new(
        Wizard::new(ctx.wizard_config()),
        Arc::clone(&ctx.platform),
        ctx.document_settings(),
        event_tx,
    );

    let terminal = ratatui::try_init().context("failed to initialize terminal")?;
    let result = app::run(app, event_rx, terminal).await;
    ratatui::restore();

    result.context("terminal session failed")
}

/// Print the created MR after the terminal has been restored
pub fn report_created(created: &CreatedMergeRequest) {
    println!(
        "{} {}",
        check(),
        format!("Created merge request !{}", created.iid).emphasis()
    );
    if !created.web_url.is_empty() {
        println!("  {}", link(&created.web_url, &created.web_url).accent());
    }
}
