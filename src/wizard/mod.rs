//! Merge-request creation wizard
//!
//! A pure state machine: key presses and task completions go in, a new state
//! and at most one [`Command`] come out. No I/O happens here, the caller
//! runs the commands and feeds their results back.
//!
//! ```text
//! Authenticating -> ListOpen -> TitleEntry -> DescriptionEntry -> TicketEntry
//!      |                                                              |
//!      v                                                              v
//!    Error          Terminated <- Submitting <- SummaryConfirm <- ReviewerSelect
//! ```

mod input;
pub mod view;

pub use input::TextField;
pub use view::{LineKind, Screen, ScreenLine, render};

use crate::error::Result;
use crate::ticket::TicketRules;
use crate::types::{
    CreatedMergeRequest, Identity, MergeRequestSummary, Reviewer, ReviewerChoice, StartupData,
    Submission,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

/// Title character cap
pub const TITLE_LIMIT: usize = 256;
/// Description character cap
pub const DESCRIPTION_LIMIT: usize = 600;
/// Ticket ID character cap
pub const TICKET_LIMIT: usize = 4;

/// Wizard state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Waiting for the identity check and MR listing
    Authenticating,
    /// Browsing open MRs
    ListOpen,
    /// Editing the title
    TitleEntry,
    /// Editing the description
    DescriptionEntry,
    /// Editing the ticket ID
    TicketEntry,
    /// Choosing reviewers
    ReviewerSelect,
    /// Reviewing the final MR before creating it
    SummaryConfirm,
    /// Create request in flight
    Submitting,
    /// MR created
    Terminated,
    /// Startup failed; only quitting is possible
    Error(String),
}

/// Side effect requested by the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Nothing to do
    None,
    /// Resolve the identity and list open MRs in the background
    LoadSession,
    /// Create the MR in the background
    Submit(Submission),
    /// Exit the process
    Quit,
}

/// Inputs the wizard needs before it starts
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Branch the MR is created from
    pub source_branch: String,
    /// Branch the MR targets
    pub target_branch: String,
    /// Ticket title rules
    pub ticket: TicketRules,
    /// Every configured reviewer, before self-filtering
    pub roster: Vec<Reviewer>,
}

/// Data known about the running session
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Authenticated user, once resolved
    pub identity: Option<Identity>,
    /// Open MRs shown in the listing
    pub merge_requests: Vec<MergeRequestSummary>,
    /// Branch the MR is created from
    pub source_branch: String,
}

/// The MR being composed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    /// Title as typed
    pub title: TextField,
    /// Description as typed
    pub description: TextField,
    /// Ticket ID as typed
    pub ticket: TextField,
    /// Selectable reviewers; never contains the authenticated user
    pub reviewers: Vec<ReviewerChoice>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            title: TextField::single_line(TITLE_LIMIT),
            description: TextField::multi_line(DESCRIPTION_LIMIT),
            ticket: TextField::digits(TICKET_LIMIT),
            reviewers: Vec::new(),
        }
    }
}

impl Draft {
    /// Reviewers currently selected, in roster order
    pub fn selected_reviewers(&self) -> impl Iterator<Item = &ReviewerChoice> {
        self.reviewers.iter().filter(|r| r.selected)
    }
}

/// Keys the wizard reacts to outside of text editing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    Confirm,
    Up,
    Down,
    Toggle,
    Other,
}

fn classify(key: KeyEvent, text_entry: bool) -> Action {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Action::Quit,
        KeyCode::Char('y') if ctrl => Action::Confirm,
        KeyCode::Up => Action::Up,
        KeyCode::Down => Action::Down,
        KeyCode::Char('k') if !text_entry && !ctrl => Action::Up,
        KeyCode::Char('j') if !text_entry && !ctrl => Action::Down,
        KeyCode::Enter if !text_entry => Action::Toggle,
        _ => Action::Other,
    }
}

/// The wizard state machine
#[derive(Debug, Clone)]
pub struct Wizard {
    step: Step,
    session: Session,
    draft: Draft,
    roster: Vec<Reviewer>,
    ticket: TicketRules,
    target_branch: String,
    list_cursor: usize,
    reviewer_cursor: usize,
    notice: Option<String>,
    created: Option<CreatedMergeRequest>,
}

impl Wizard {
    /// Create a wizard in the `Authenticating` state
    pub fn new(config: WizardConfig) -> Self {
        Self {
            step: Step::Authenticating,
            session: Session {
                source_branch: config.source_branch,
                ..Session::default()
            },
            draft: Draft::default(),
            roster: config.roster,
            ticket: config.ticket,
            target_branch: config.target_branch,
            list_cursor: 0,
            reviewer_cursor: 0,
            notice: None,
            created: None,
        }
    }

    /// Kick off the background startup task
    pub fn start(&self) -> Command {
        if self.step == Step::Authenticating {
            Command::LoadSession
        } else {
            Command::None
        }
    }

    /// Current state
    pub const fn step(&self) -> &Step {
        &self.step
    }

    /// Session data
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Draft being composed
    pub const fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Ticket title rules
    pub const fn ticket_rules(&self) -> &TicketRules {
        &self.ticket
    }

    /// Highlighted row in the MR listing
    pub const fn list_cursor(&self) -> usize {
        self.list_cursor
    }

    /// Highlighted entry in the reviewer list
    pub const fn reviewer_cursor(&self) -> usize {
        self.reviewer_cursor
    }

    /// Transient message from the last failed submission
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The created MR, once submission succeeded
    pub const fn created(&self) -> Option<&CreatedMergeRequest> {
        self.created.as_ref()
    }

    /// Consume the wizard, returning the created MR if any
    pub fn into_created(self) -> Option<CreatedMergeRequest> {
        self.created
    }

    /// Title that will be sent, with the ticket prefix applied
    pub fn composed_title(&self) -> String {
        self.ticket.compose_title(
            &self.session.source_branch,
            &self.draft.ticket.value(),
            &self.draft.title.value(),
        )
    }

    /// Handle the result of the startup task
    pub fn on_session_loaded(&mut self, result: Result<StartupData>) -> Command {
        if self.step != Step::Authenticating {
            return Command::None;
        }

        match result {
            Ok(data) => {
                let own_id = data.identity.id;
                self.draft.reviewers = self
                    .roster
                    .iter()
                    .filter(|r| r.id != own_id)
                    .cloned()
                    .map(ReviewerChoice::from)
                    .collect();
                self.session.identity = Some(data.identity);
                self.session.merge_requests = data.merge_requests;
                self.list_cursor = 0;
                self.step = Step::ListOpen;
                debug!(
                    reviewers = self.draft.reviewers.len(),
                    open_mrs = self.session.merge_requests.len(),
                    "session ready"
                );
            }
            Err(e) => {
                warn!(error = %e, "startup failed");
                self.step = Step::Error(e.to_string());
            }
        }
        Command::None
    }

    /// Handle the result of the submission task
    pub fn on_submitted(&mut self, result: Result<CreatedMergeRequest>) -> Command {
        if self.step != Step::Submitting {
            return Command::None;
        }

        match result {
            Ok(created) => {
                debug!(mr_iid = created.iid, "submission succeeded");
                self.created = Some(created);
                self.step = Step::Terminated;
                Command::Quit
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.notice = Some(format!("Error creating merge request: {e}"));
                self.step = Step::SummaryConfirm;
                Command::None
            }
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if key.kind != KeyEventKind::Press {
            return Command::None;
        }

        let text_entry = matches!(
            self.step,
            Step::TitleEntry | Step::DescriptionEntry | Step::TicketEntry
        );
        let action = classify(key, text_entry);
        if action == Action::Quit {
            return Command::Quit;
        }
        self.notice = None;

        match self.step {
            Step::Authenticating | Step::Submitting | Step::Terminated | Step::Error(_) => {
                Command::None
            }
            Step::ListOpen => {
                self.handle_list_key(action);
                Command::None
            }
            Step::TitleEntry => {
                if action == Action::Confirm {
                    self.step = Step::DescriptionEntry;
                } else {
                    self.draft.title.handle_key(key);
                }
                Command::None
            }
            Step::DescriptionEntry => {
                if action == Action::Confirm {
                    self.step = Step::TicketEntry;
                } else {
                    self.draft.description.handle_key(key);
                }
                Command::None
            }
            Step::TicketEntry => {
                if action == Action::Confirm {
                    self.reviewer_cursor = 0;
                    self.step = Step::ReviewerSelect;
                } else {
                    self.draft.ticket.handle_key(key);
                }
                Command::None
            }
            Step::ReviewerSelect => {
                self.handle_reviewer_key(action);
                Command::None
            }
            Step::SummaryConfirm => {
                if action == Action::Confirm {
                    self.submit()
                } else {
                    Command::None
                }
            }
        }
    }

    fn handle_list_key(&mut self, action: Action) {
        let last = self.session.merge_requests.len().saturating_sub(1);
        match action {
            Action::Up => self.list_cursor = self.list_cursor.saturating_sub(1),
            Action::Down => self.list_cursor = (self.list_cursor + 1).min(last),
            Action::Confirm => {
                let branch = self.session.source_branch.clone();
                self.draft.title.set_value(&branch);
                self.step = Step::TitleEntry;
            }
            _ => {}
        }
    }

    fn handle_reviewer_key(&mut self, action: Action) {
        let last = self.draft.reviewers.len().saturating_sub(1);
        match action {
            Action::Up => self.reviewer_cursor = self.reviewer_cursor.saturating_sub(1),
            Action::Down => self.reviewer_cursor = (self.reviewer_cursor + 1).min(last),
            Action::Toggle => {
                if let Some(choice) = self.draft.reviewers.get_mut(self.reviewer_cursor) {
                    choice.selected = !choice.selected;
                }
            }
            Action::Confirm => self.step = Step::SummaryConfirm,
            _ => {}
        }
    }

    fn submit(&mut self) -> Command {
        let Some(identity) = &self.session.identity else {
            self.notice = Some("Not authenticated".to_string());
            return Command::None;
        };

        let submission = Submission {
            source_branch: self.session.source_branch.clone(),
            target_branch: self.target_branch.clone(),
            title: self.composed_title(),
            assignee_id: identity.id,
            description: self.draft.description.value(),
            ticket: self.draft.ticket.value(),
            reviewer_ids: self.draft.selected_reviewers().map(|r| r.id).collect(),
        };
        self.step = Step::Submitting;
        Command::Submit(submission)
    }
}

#[cfg(test)]
impl Wizard {
    /// Config that rebuilds this wizard from scratch
    pub(crate) fn config_for_test(&self) -> WizardConfig {
        WizardConfig {
            source_branch: self.session.source_branch.clone(),
            target_branch: self.target_branch.clone(),
            ticket: self.ticket.clone(),
            roster: self.roster.clone(),
        }
    }
}
