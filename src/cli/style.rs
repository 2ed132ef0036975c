//! Styling for messages printed outside the terminal UI
//!
//! Output goes through `anstream`, which strips the escape codes when the
//! stream is not a color-capable terminal.

use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used for success lines
pub const CHECK: &str = "✓";

/// Semantic styles
pub trait Stylize: Display + Sized {
    /// Bold text
    fn emphasis(&self) -> String {
        self.bold().to_string()
    }

    /// Highlighted value
    fn accent(&self) -> String {
        self.cyan().to_string()
    }

    /// Success message
    fn success(&self) -> String {
        self.green().to_string()
    }

    /// Error message
    fn error(&self) -> String {
        self.red().bold().to_string()
    }
}

impl<T: Display> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Render `url` as a terminal hyperlink when the terminal supports it
pub fn link(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else {
        url.to_string()
    }
}
