//! turtle - create GitLab merge requests from the terminal

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::style::Stylize;
use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Environment variable holding the log filter
const LOG_ENV: &str = "TURTLE_LOG";

#[derive(Parser)]
#[command(
    name = "turtle",
    version,
    about = "Browse open GitLab merge requests and create a new one from the terminal"
)]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    dotenvy::dotenv().ok();
    init_logging();

    info!(version = env!("CARGO_PKG_VERSION"), "turtle starting");

    match cli::run_wizard(Path::new(".")).await {
        Ok(Some(created)) => {
            cli::report_created(&created);
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            let detail = format!("{e:#}");
            error!(error = %detail, "fatal error");
            eprintln!("{} {detail}", "error:".error());
            ExitCode::FAILURE
        }
    }
}

/// Log to a file; the terminal belongs to the UI.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let writer = log_file().map_or_else(
        || BoxMakeWriter::new(std::io::sink),
        |file| BoxMakeWriter::new(Mutex::new(file)),
    );

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init();
}

fn log_file() -> Option<File> {
    let dir = dirs::cache_dir()?.join("turtle");
    fs::create_dir_all(&dir).ok()?;
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("turtle.log"))
        .ok()
}
