//! Bounded text fields edited by the wizard
//!
//! Editing and cursor movement are delegated to [`TextArea`]; this wrapper
//! only decides which keys reach it and enforces the character cap.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::TextArea;

/// What a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    SingleLine,
    MultiLine,
    Digits,
}

/// A text field with a character cap.
///
/// The cap is enforced on every insertion, so the value is always in bounds.
/// Newlines count as one character.
#[derive(Debug, Clone)]
pub struct TextField {
    textarea: TextArea<'static>,
    limit: usize,
    kind: FieldKind,
}

impl PartialEq for TextField {
    fn eq(&self, other: &Self) -> bool {
        self.limit == other.limit
            && self.kind == other.kind
            && self.textarea.lines() == other.textarea.lines()
            && self.textarea.cursor() == other.textarea.cursor()
    }
}

impl Eq for TextField {}

impl TextField {
    /// Single-line free text
    pub fn single_line(limit: usize) -> Self {
        Self::with_kind(limit, FieldKind::SingleLine)
    }

    /// Multi-line free text; `Enter` inserts a newline
    pub fn multi_line(limit: usize) -> Self {
        Self::with_kind(limit, FieldKind::MultiLine)
    }

    /// ASCII digits only
    pub fn digits(limit: usize) -> Self {
        Self::with_kind(limit, FieldKind::Digits)
    }

    fn with_kind(limit: usize, kind: FieldKind) -> Self {
        Self {
            textarea: TextArea::default(),
            limit,
            kind,
        }
    }

    /// Current value, lines joined with `\n`
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }

    /// Lines of the current value
    pub fn lines(&self) -> &[String] {
        self.textarea.lines()
    }

    /// Cursor position as `(row, column)`, in characters
    pub fn cursor(&self) -> (usize, usize) {
        self.textarea.cursor()
    }

    /// Maximum number of characters
    pub const fn limit(&self) -> usize {
        self.limit
    }

    /// Number of characters entered
    pub fn len(&self) -> usize {
        let lines = self.textarea.lines();
        let chars: usize = lines.iter().map(|l| l.chars().count()).sum();
        chars + lines.len().saturating_sub(1)
    }

    /// Whether nothing has been entered
    pub fn is_empty(&self) -> bool {
        self.textarea.lines().iter().all(String::is_empty)
    }

    /// Replace the value, dropping characters the field would not accept.
    ///
    /// The cursor ends up after the last character.
    pub fn set_value(&mut self, value: &str) {
        self.textarea = TextArea::default();
        for c in value.chars() {
            self.insert(c);
        }
    }

    /// Apply an editing key. Returns `true` if the value changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }

        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Enter if self.kind == FieldKind::MultiLine => self.insert('\n'),
            KeyCode::Backspace
            | KeyCode::Delete
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Home
            | KeyCode::End => self.textarea.input(key),
            _ => false,
        }
    }

    fn insert(&mut self, c: char) -> bool {
        let accepted = match self.kind {
            FieldKind::SingleLine => c != '\n',
            FieldKind::MultiLine => true,
            FieldKind::Digits => c.is_ascii_digit(),
        };
        if !accepted || self.len() >= self.limit {
            return false;
        }
        if c == '\n' {
            self.textarea.insert_newline();
        } else {
            self.textarea.insert_char(c);
        }
        true
    }
}
