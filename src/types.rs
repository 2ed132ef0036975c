//! Core types for turtle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated GitLab user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// GitLab user ID
    pub id: u64,
    /// Display name
    pub name: String,
}

/// An open merge request, as shown in the listing view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequestSummary {
    /// MR title
    pub title: String,
    /// Author display name
    pub author: String,
    /// When the MR was opened
    pub created_at: DateTime<Utc>,
}

/// A reviewer from the configured roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reviewer {
    /// Label shown in the selection list
    pub label: String,
    /// GitLab user ID
    pub id: u64,
}

/// A selectable reviewer in the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewerChoice {
    /// Label shown in the selection list
    pub label: String,
    /// GitLab user ID
    pub id: u64,
    /// Whether the reviewer is requested
    pub selected: bool,
}

impl From<Reviewer> for ReviewerChoice {
    fn from(reviewer: Reviewer) -> Self {
        Self {
            label: reviewer.label,
            id: reviewer.id,
            selected: false,
        }
    }
}

/// Body of the create-merge-request call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergeRequestPayload {
    /// Branch the changes come from
    pub source_branch: String,
    /// Branch the changes go into
    pub target_branch: String,
    /// Final (possibly ticket-prefixed) title
    pub title: String,
    /// Assignee, always the authenticated user
    pub assignee_id: u64,
    /// Rendered description document
    pub description: String,
    /// Requested reviewers
    pub reviewer_ids: Vec<u64>,
}

/// Acknowledgement returned by GitLab for a created MR
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedMergeRequest {
    /// Project-scoped MR number
    #[serde(default)]
    pub iid: u64,
    /// Web URL of the MR
    #[serde(default)]
    pub web_url: String,
}

/// Everything the wizard collected, ready to be turned into a payload
///
/// The description is still the raw user text here; it is rendered into the
/// description document right before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Branch the changes come from
    pub source_branch: String,
    /// Branch the changes go into
    pub target_branch: String,
    /// Final (possibly ticket-prefixed) title
    pub title: String,
    /// Assignee, always the authenticated user
    pub assignee_id: u64,
    /// Raw description as typed
    pub description: String,
    /// Ticket ID as typed
    pub ticket: String,
    /// Requested reviewers
    pub reviewer_ids: Vec<u64>,
}

impl Submission {
    /// Build the wire payload with the rendered description document
    pub fn into_payload(self, document: String) -> MergeRequestPayload {
        MergeRequestPayload {
            source_branch: self.source_branch,
            target_branch: self.target_branch,
            title: self.title,
            assignee_id: self.assignee_id,
            description: document,
            reviewer_ids: self.reviewer_ids,
        }
    }
}

/// Data resolved by the background startup task
#[derive(Debug, Clone)]
pub struct StartupData {
    /// Authenticated user
    pub identity: Identity,
    /// Currently open MRs
    pub merge_requests: Vec<MergeRequestSummary>,
}
