//! Mock platform service for testing

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use turtle::error::{Error, Result};
use turtle::platform::PlatformService;
use turtle::types::{CreatedMergeRequest, Identity, MergeRequestPayload, MergeRequestSummary};

/// Simple mock platform service for testing
///
/// Features:
/// - Auto-incrementing MR numbers
/// - Call tracking for verification
/// - Error injection for failure path testing
pub struct MockPlatformService {
    identity: Identity,
    merge_requests: Vec<MergeRequestSummary>,
    next_iid: AtomicU64,
    // Call tracking
    identity_calls: AtomicU64,
    list_calls: AtomicU64,
    submit_calls: Mutex<Vec<MergeRequestPayload>>,
    // Error injection
    error_on_identity: Mutex<Option<String>>,
    error_on_list: Mutex<Option<String>>,
    error_on_submit: Mutex<Option<String>>,
}

impl MockPlatformService {
    /// Create a mock authenticating as `identity`
    pub fn with_identity(identity: Identity) -> Self {
        Self {
            identity,
            merge_requests: Vec::new(),
            next_iid: AtomicU64::new(1),
            identity_calls: AtomicU64::new(0),
            list_calls: AtomicU64::new(0),
            submit_calls: Mutex::new(Vec::new()),
            error_on_identity: Mutex::new(None),
            error_on_list: Mutex::new(None),
            error_on_submit: Mutex::new(None),
        }
    }

    /// Set the open MRs returned by the listing
    pub fn with_merge_requests(mut self, titles: &[&str]) -> Self {
        self.merge_requests = titles
            .iter()
            .map(|title| MergeRequestSummary {
                title: (*title).to_string(),
                author: "Grace".to_string(),
                created_at: Utc::now() - Duration::hours(1),
            })
            .collect();
        self
    }

    // === Error injection methods ===

    /// Make `resolve_identity` return an error
    pub fn fail_identity(&self, msg: &str) {
        *self.error_on_identity.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `list_open_merge_requests` return an error
    pub fn fail_list(&self, msg: &str) {
        *self.error_on_list.lock().unwrap() = Some(msg.to_string());
    }

    /// Make `submit_merge_request` return an error
    pub fn fail_submit(&self, msg: &str) {
        *self.error_on_submit.lock().unwrap() = Some(msg.to_string());
    }

    /// Clear the submission error
    pub fn clear_submit_failure(&self) {
        *self.error_on_submit.lock().unwrap() = None;
    }

    // === Call inspection ===

    pub fn identity_call_count(&self) -> u64 {
        self.identity_calls.load(Ordering::SeqCst)
    }

    pub fn list_call_count(&self) -> u64 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> Vec<MergeRequestPayload> {
        self.submit_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn resolve_identity(&self) -> Result<Identity> {
        self.identity_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.error_on_identity.lock().unwrap().clone() {
            return Err(Error::GitLabApi(msg));
        }
        Ok(self.identity.clone())
    }

    async fn list_open_merge_requests(&self) -> Result<Vec<MergeRequestSummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = self.error_on_list.lock().unwrap().clone() {
            return Err(Error::GitLabApi(msg));
        }
        Ok(self.merge_requests.clone())
    }

    async fn submit_merge_request(
        &self,
        payload: &MergeRequestPayload,
    ) -> Result<CreatedMergeRequest> {
        self.submit_calls.lock().unwrap().push(payload.clone());
        if let Some(msg) = self.error_on_submit.lock().unwrap().clone() {
            return Err(Error::GitLabApi(msg));
        }
        let iid = self.next_iid.fetch_add(1, Ordering::SeqCst);
        Ok(CreatedMergeRequest {
            iid,
            web_url: format!("https://gitlab.example.com/team/app/-/merge_requests/{iid}"),
        })
    }
}
