//! Terminal application: event loop around the wizard
//!
//! Terminal input and background task completions are all delivered as
//! [`AppEvent`]s on one channel, consumed by a single loop that owns the
//! wizard. Background tasks only ever send their result back; they never
//! touch wizard state.

mod draw;

use crate::error::Result;
use crate::platform::{PlatformService, load_startup_data};
use crate::submit::{DocumentSettings, execute_submission};
use crate::types::{CreatedMergeRequest, StartupData};
use crate::wizard::{Command, Wizard};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{Stream, StreamExt};
use ratatui::DefaultTerminal;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Events that drive the application state machine.
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press.
    Key(KeyEvent),
    /// Terminal resize or focus regained.
    Redraw,
    /// Startup task finished.
    SessionLoaded(Result<StartupData>),
    /// Submission task finished.
    Submitted(Result<CreatedMergeRequest>),
    /// Terminal input stream ended; no more keys will arrive.
    TerminalClosed,
}

/// Whether the loop keeps running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep processing events
    Continue,
    /// Leave the loop
    Exit,
}

/// Top-level application.
pub struct App {
    wizard: Wizard,
    platform: Arc<dyn PlatformService>,
    documents: Arc<DocumentSettings>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    /// Create an application posting task completions to `events`
    pub fn new(
        wizard: Wizard,
        platform: Arc<dyn PlatformService>,
        documents: DocumentSettings,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            wizard,
            platform,
            documents: Arc::new(documents),
            events,
        }
    }

    /// The wizard state
    pub const fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Consume the app, returning the created MR if any
    pub fn into_created(self) -> Option<CreatedMergeRequest> {
        self.wizard.into_created()
    }

    /// Launch the startup task
    pub fn start(&mut self) -> Flow {
        let command = self.wizard.start();
        self.execute(command)
    }

    /// Feed one event to the wizard and run the command it returns
    pub fn handle_event(&mut self, event: AppEvent) -> Flow {
        let command = match event {
            AppEvent::TerminalClosed => {
                warn!("terminal input closed");
                return Flow::Exit;
            }
            AppEvent::Key(key) => self.wizard.handle_key(key),
            AppEvent::Redraw => Command::None,
            AppEvent::SessionLoaded(result) => self.wizard.on_session_loaded(result),
            AppEvent::Submitted(result) => self.wizard.on_submitted(result),
        };
        self.execute(command)
    }

    fn execute(&self, command: Command) -> Flow {
        match command {
            Command::None => Flow::Continue,
            Command::Quit => Flow::Exit,
            Command::LoadSession => {
                debug!("spawning startup task");
                let platform = Arc::clone(&self.platform);
                let tx = self.events.clone();
                tokio::spawn(async move {
                    let result = load_startup_data(platform.as_ref()).await;
                    // Receiver is gone once the user quit; drop the result.
                    let _ = tx.send(AppEvent::SessionLoaded(result));
                });
                Flow::Continue
            }
            Command::Submit(submission) => {
                debug!(title = %submission.title, "spawning submission task");
                let platform = Arc::clone(&self.platform);
                let documents = Arc::clone(&self.documents);
                let tx = self.events.clone();
                tokio::spawn(async move {
                    let result =
                        execute_submission(platform.as_ref(), &documents, submission).await;
                    let _ = tx.send(AppEvent::Submitted(result));
                });
                Flow::Continue
            }
        }
    }
}

/// Main event loop: reads terminal events, dispatches, and re-renders.
pub async fn run(
    mut app: App,
    mut events: mpsc::UnboundedReceiver<AppEvent>,
    mut terminal: DefaultTerminal,
) -> Result<Option<CreatedMergeRequest>> {
    let reader = tokio::spawn(forward_terminal_events(
        EventStream::new(),
        app.events.clone(),
    ));

    let mut flow = app.start();
    while flow == Flow::Continue {
        terminal.draw(|frame| draw::draw(frame, &app.wizard))?;

        match events.recv().await {
            Some(event) => flow = app.handle_event(event),
            None => break,
        }
    }

    reader.abort();
    Ok(app.into_created())
}

/// Forward terminal events to the app until the stream ends.
///
/// Read errors are skipped. The end of the stream is reported as
/// [`AppEvent::TerminalClosed`] so the loop can exit instead of waiting on
/// keys that will never come.
async fn forward_terminal_events<S>(mut stream: S, tx: mpsc::UnboundedSender<AppEvent>)
where
    S: Stream<Item = std::io::Result<Event>> + Unpin,
{
    while let Some(event) = stream.next().await {
        let app_event = match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Ok(Event::Resize(..) | Event::FocusGained) => AppEvent::Redraw,
            Ok(_) => continue,
            Err(e) => {
                warn!(error = %e, "failed to read terminal event");
                continue;
            }
        };
        if tx.send(app_event).is_err() {
            return;
        }
    }
    let _ = tx.send(AppEvent::TerminalClosed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketRules;
    use crate::wizard::WizardConfig;
    use crossterm::event::{KeyCode, KeyModifiers};
    use futures::stream;
    use regex::Regex;
    use std::io;

    struct NoPlatform;

    #[async_trait::async_trait]
    impl PlatformService for NoPlatform {
        async fn resolve_identity(&self) -> Result<crate::types::Identity> {
            Err(crate::error::Error::GitLabApi("offline".to_string()))
        }

        async fn list_open_merge_requests(
            &self,
        ) -> Result<Vec<crate::types::MergeRequestSummary>> {
            Ok(Vec::new())
        }

        async fn submit_merge_request(
            &self,
            _payload: &crate::types::MergeRequestPayload,
        ) -> Result<CreatedMergeRequest> {
            Err(crate::error::Error::GitLabApi("offline".to_string()))
        }
    }

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let wizard = Wizard::new(WizardConfig {
            source_branch: "main".to_string(),
            target_branch: "stage".to_string(),
            ticket: TicketRules::new(Regex::new("x").unwrap(), "X".to_string()),
            roster: Vec::new(),
        });
        let documents = DocumentSettings {
            template: crate::document::DescriptionTemplate::default(),
            output_dir: std::env::temp_dir(),
        };
        (App::new(wizard, Arc::new(NoPlatform), documents, tx), rx)
    }

    fn key_event(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[tokio::test]
    async fn test_read_errors_are_skipped_and_end_is_reported() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let events = stream::iter(vec![
            Err(io::Error::other("tty hiccup")),
            Ok(key_event('a')),
            Ok(Event::FocusLost),
            Ok(Event::Resize(80, 24)),
        ]);

        forward_terminal_events(events, tx).await;

        assert!(matches!(rx.recv().await, Some(AppEvent::Key(k)) if k.code == KeyCode::Char('a')));
        assert!(matches!(rx.recv().await, Some(AppEvent::Redraw)));
        assert!(matches!(rx.recv().await, Some(AppEvent::TerminalClosed)));
        assert!(rx.recv().await.is_none());
    }

    #[test]
    fn test_terminal_closed_exits_loop() {
        let (mut app, _rx) = app();
        assert_eq!(app.handle_event(AppEvent::TerminalClosed), Flow::Exit);
    }

    #[tokio::test]
    async fn test_startup_result_arrives_on_channel() {
        let (mut app, mut rx) = app();
        assert_eq!(app.start(), Flow::Continue);

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::SessionLoaded(Err(_))));
        assert_eq!(app.handle_event(event), Flow::Continue);
        assert!(matches!(app.wizard().step(), crate::wizard::Step::Error(_)));
    }
}
