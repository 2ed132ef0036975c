//! Ticket reference rules for MR titles

use regex::Regex;

/// Decides whether a branch already names a ticket, and how to prefix
/// titles when it does not.
#[derive(Debug, Clone)]
pub struct TicketRules {
    pattern: Regex,
    prefix: String,
}

impl TicketRules {
    /// Create rules from a branch pattern and a prefix label
    pub const fn new(pattern: Regex, prefix: String) -> Self {
        Self { pattern, prefix }
    }

    /// The prefix label, e.g. `Hapo`
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the branch name already carries a ticket reference
    pub fn branch_has_ticket(&self, branch: &str) -> bool {
        self.pattern.is_match(branch)
    }

    /// Bracketed reference shown in the summary, e.g. `[Hapo-42]`
    pub fn reference(&self, ticket: &str) -> String {
        format!("[{}-{ticket}]", self.prefix)
    }

    /// Final MR title.
    ///
    /// Prefixed with the ticket reference unless the branch name already
    /// contains one.
    pub fn compose_title(&self, branch: &str, ticket: &str, title: &str) -> String {
        if self.branch_has_ticket(branch) {
            title.to_string()
        } else {
            format!("{} - {title}", self.reference(ticket))
        }
    }
}
