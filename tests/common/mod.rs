//! Shared test fixtures

#![allow(dead_code)]

mod mock_platform;

pub use mock_platform::MockPlatformService;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use regex::Regex;
use turtle::ticket::TicketRules;
use turtle::types::{Identity, Reviewer};
use turtle::wizard::WizardConfig;

/// The authenticated user in tests
pub fn me() -> Identity {
    Identity {
        id: 5,
        name: "Me".to_string(),
    }
}

/// `hapo`-style ticket rules: `[Hapo-<id>]` prefix unless the branch names one
pub fn hapo_rules() -> TicketRules {
    TicketRules::new(Regex::new(r"hapo[\s\-0-9]+").unwrap(), "Hapo".to_string())
}

/// Wizard config on `branch` with a roster containing the test user
pub fn wizard_config(branch: &str) -> WizardConfig {
    WizardConfig {
        source_branch: branch.to_string(),
        target_branch: "stage".to_string(),
        ticket: hapo_rules(),
        roster: vec![
            Reviewer {
                label: "Grace".to_string(),
                id: 11,
            },
            Reviewer {
                label: "Me".to_string(),
                id: 5,
            },
            Reviewer {
                label: "Ada".to_string(),
                id: 12,
            },
        ],
    }
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// Key events typing `s`
pub fn typed(s: &str) -> Vec<KeyEvent> {
    s.chars()
        .map(|c| {
            if c == '\n' {
                key(KeyCode::Enter)
            } else {
                key(KeyCode::Char(c))
            }
        })
        .collect()
}
