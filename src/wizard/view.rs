//! Pure projection of the wizard state to a text screen.
//!
//! Styling is left to the terminal layer; lines only carry a [`LineKind`].

use super::{Step, TextField, Wizard};
use crate::format::{bullet_lines, time_since, truncate_string};
use chrono::{DateTime, Utc};
use std::fmt;

/// Width of the listing's title column
pub const TITLE_COLUMN: usize = 45;
/// Width of the listing's author column
pub const AUTHOR_COLUMN: usize = 20;

const CURSOR: &str = "_";

/// How a line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Screen or section heading
    Heading,
    /// Regular text
    Text,
    /// De-emphasized hint
    Muted,
    /// Highlighted row
    Selected,
    /// Text the user is editing
    Input,
    /// Transient error notice
    Notice,
}

/// One rendered line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    /// Presentation hint
    pub kind: LineKind,
    /// Line content
    pub text: String,
}

/// A rendered screen: body lines plus the help line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    /// Body lines
    pub body: Vec<ScreenLine>,
    /// Legal keys for the current state
    pub help: String,
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.body {
            writeln!(f, "{}", line.text)?;
        }
        write!(f, "\n{}", self.help)
    }
}

#[derive(Default)]
struct Builder {
    lines: Vec<ScreenLine>,
}

impl Builder {
    fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(ScreenLine {
            kind,
            text: text.into(),
        });
    }

    fn text(&mut self, text: impl Into<String>) {
        self.push(LineKind::Text, text);
    }

    fn heading(&mut self, text: impl Into<String>) {
        self.push(LineKind::Heading, text);
    }

    fn blank(&mut self) {
        self.text("");
    }
}

/// Render the current state. `now` drives the relative MR ages.
pub fn render(wizard: &Wizard, now: DateTime<Utc>) -> Screen {
    let mut b = Builder::default();

    match wizard.step() {
        Step::Authenticating => b.text("Checking authentication..."),
        Step::ListOpen => listing(&mut b, wizard, now),
        Step::TitleEntry => field(&mut b, "Enter title", &wizard.draft().title, "Enter title"),
        Step::DescriptionEntry => field(
            &mut b,
            "Enter description",
            &wizard.draft().description,
            "What changed, one point per line",
        ),
        Step::TicketEntry => field(
            &mut b,
            &format!("Enter [{}-]:ID", wizard.ticket_rules().prefix()),
            &wizard.draft().ticket,
            "Ticket number",
        ),
        Step::ReviewerSelect => reviewers(&mut b, wizard),
        Step::SummaryConfirm => summary(&mut b, wizard),
        Step::Submitting => b.text("Creating merge request..."),
        Step::Terminated => b.text("Merge request created."),
        Step::Error(detail) => b.push(LineKind::Notice, format!("Something went wrong: {detail}")),
    }

    Screen {
        body: b.lines,
        help: help_text(wizard.step()),
    }
}

fn listing(b: &mut Builder, wizard: &Wizard, now: DateTime<Utc>) {
    let mrs = &wizard.session().merge_requests;
    b.heading(format!(
        "  {:<TITLE_COLUMN$} {:<AUTHOR_COLUMN$} {}",
        "Title", "Author", "Created"
    ));

    if mrs.is_empty() {
        b.push(LineKind::Muted, "  No open merge requests");
        return;
    }

    for (i, mr) in mrs.iter().enumerate() {
        let selected = i == wizard.list_cursor();
        let row = format!(
            "{} {:<TITLE_COLUMN$} {:<AUTHOR_COLUMN$} {}",
            if selected { ">" } else { " " },
            truncate_string(&mr.title, TITLE_COLUMN),
            truncate_string(&mr.author, AUTHOR_COLUMN),
            time_since(mr.created_at, now),
        );
        b.push(if selected { LineKind::Selected } else { LineKind::Text }, row);
    }
}

fn field(b: &mut Builder, heading: &str, field: &TextField, placeholder: &str) {
    b.heading(heading);

    let (row, col) = field.cursor();
    for (i, line) in field.lines().iter().enumerate() {
        if i == row {
            let at = line.char_indices().nth(col).map_or(line.len(), |(at, _)| at);
            b.push(
                LineKind::Input,
                format!("{}{CURSOR}{}", &line[..at], &line[at..]),
            );
        } else {
            b.push(LineKind::Input, line.as_str());
        }
    }

    if field.is_empty() {
        b.push(LineKind::Muted, placeholder);
    }
    b.push(
        LineKind::Muted,
        format!("{}/{}", field.len(), field.limit()),
    );
}

fn reviewers(b: &mut Builder, wizard: &Wizard) {
    b.heading("Select reviewer(s):");
    b.blank();

    let choices = &wizard.draft().reviewers;
    if choices.is_empty() {
        b.push(LineKind::Muted, "No reviewers available");
        return;
    }

    for (i, choice) in choices.iter().enumerate() {
        let selected = i == wizard.reviewer_cursor();
        let checked = if choice.selected { "[x]" } else { "[ ]" };
        b.push(
            if selected { LineKind::Selected } else { LineKind::Text },
            format!("{} {checked} {}", if selected { ">" } else { " " }, choice.label),
        );
    }
}

fn summary(b: &mut Builder, wizard: &Wizard) {
    let draft = wizard.draft();
    b.heading("Merge Request Summary:");
    b.blank();
    b.text(format!(
        "Ticket number: {}",
        wizard.ticket_rules().reference(&draft.ticket.value())
    ));
    b.blank();
    b.text(format!("Title: {}", wizard.composed_title()));
    b.blank();
    b.heading("Description:");
    for line in bullet_lines(&draft.description.value()).split('\n') {
        b.text(line);
    }
    b.blank();
    b.heading("Selected Reviewers:");
    for choice in draft.selected_reviewers() {
        b.text(format!("- {}", choice.label));
    }

    if let Some(notice) = wizard.notice() {
        b.blank();
        b.push(LineKind::Notice, notice);
    }
}

/// Keys accepted in a state
pub fn help_text(step: &Step) -> String {
    let extra = match step {
        Step::ListOpen => "  [ctrl+y] Continue [up/down] Navigate",
        Step::TitleEntry => "  [ctrl+y] Confirm Title",
        Step::DescriptionEntry => "  [ctrl+y] Confirm Description [enter] Next line",
        Step::TicketEntry => "  [ctrl+y] Confirm Ticket ID",
        Step::ReviewerSelect => "  [ctrl+y] Accept Reviewers [enter] Select Option [up/down] Navigate",
        Step::SummaryConfirm => "  [ctrl+y] Create Merge Request",
        Step::Authenticating | Step::Submitting | Step::Terminated | Step::Error(_) => "",
    };
    format!("[ctrl+c] Quit{extra}")
}
