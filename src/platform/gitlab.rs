//! GitLab platform service implementation

use crate::config::GitLabConfig;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{CreatedMergeRequest, Identity, MergeRequestPayload, MergeRequestSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

/// GitLab service using reqwest
pub struct GitLabService {
    client: Client,
    token: String,
    base_url: String,
    project_path: String,
}

#[derive(Deserialize)]
struct MergeRequest {
    title: String,
    created_at: DateTime<Utc>,
    author: Identity,
}

impl From<MergeRequest> for MergeRequestSummary {
    fn from(mr: MergeRequest) -> Self {
        Self {
            title: mr.title,
            author: mr.author.name,
            created_at: mr.created_at,
        }
    }
}

/// Request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

impl GitLabService {
    /// Create a new GitLab service
    pub fn new(config: &GitLabConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::GitLabApi(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            token: config.token.clone(),
            base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
            project_path: config.project_path.clone(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn merge_requests_url(&self) -> String {
        self.api_url(&format!("{}/merge_requests", self.project_path))
    }
}

#[async_trait]
impl PlatformService for GitLabService {
    async fn resolve_identity(&self) -> Result<Identity> {
        debug!("resolving token owner");
        let url = self.api_url("/user");

        let identity: Identity = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        debug!(user_id = identity.id, "resolved token owner");
        Ok(identity)
    }

    async fn list_open_merge_requests(&self) -> Result<Vec<MergeRequestSummary>> {
        debug!(project = %self.project_path, "listing open MRs");
        let url = self.merge_requests_url();

        let mrs: Vec<MergeRequest> = self
            .client
            .get(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .query(&[("state", "opened")])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        let summaries: Vec<MergeRequestSummary> = mrs.into_iter().map(Into::into).collect();
        debug!(count = summaries.len(), "listed open MRs");
        Ok(summaries)
    }

    async fn submit_merge_request(
        &self,
        payload: &MergeRequestPayload,
    ) -> Result<CreatedMergeRequest> {
        debug!(
            source = %payload.source_branch,
            target = %payload.target_branch,
            reviewers = payload.reviewer_ids.len(),
            "creating MR"
        );
        let url = self.merge_requests_url();

        let created: CreatedMergeRequest = self
            .client
            .post(&url)
            .header("PRIVATE-TOKEN", &self.token)
            .json(payload)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::GitLabApi(e.to_string()))?
            .json()
            .await?;

        debug!(mr_iid = created.iid, "created MR");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use url::Url;

    fn config_for(server: &mockito::Server) -> GitLabConfig {
        GitLabConfig {
            base_url: Url::parse(&server.url()).unwrap(),
            token: "glpat-test".to_string(),
            project_path: "/projects/7".to_string(),
        }
    }

    fn payload() -> MergeRequestPayload {
        MergeRequestPayload {
            source_branch: "feature/xyz".to_string(),
            target_branch: "stage".to_string(),
            title: "[Hapo-42] - Fix bug".to_string(),
            assignee_id: 5,
            description: "- line1".to_string(),
            reviewer_ids: vec![11, 12],
        }
    }

    #[tokio::test]
    async fn test_resolve_identity_sends_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/user")
            .match_header("PRIVATE-TOKEN", "glpat-test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": 5, "name": "Ada", "username": "ada"}"#)
            .create_async()
            .await;

        let service = GitLabService::new(&config_for(&server)).unwrap();
        let identity = tokio_test::assert_ok!(service.resolve_identity().await);

        assert_eq!(
            identity,
            Identity {
                id: 5,
                name: "Ada".to_string()
            }
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_identity_unauthorized_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/user")
            .with_status(401)
            .with_body(r#"{"message":"401 Unauthorized"}"#)
            .create_async()
            .await;

        let service = GitLabService::new(&config_for(&server)).unwrap();
        let err = service.resolve_identity().await.unwrap_err();

        assert!(matches!(err, Error::GitLabApi(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn test_list_open_merge_requests_maps_author_and_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/projects/7/merge_requests")
            .match_query(Matcher::UrlEncoded("state".into(), "opened".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                serde_json::json!([
                    {
                        "title": "Add login",
                        "created_at": "2024-03-01T10:00:00Z",
                        "author": { "id": 9, "name": "Grace" }
                    }
                ])
                .to_string(),
            )
            .create_async()
            .await;

        let service = GitLabService::new(&config_for(&server)).unwrap();
        let mrs = service.list_open_merge_requests().await.unwrap();

        assert_eq!(mrs.len(), 1);
        assert_eq!(mrs[0].title, "Add login");
        assert_eq!(mrs[0].author, "Grace");
        assert_eq!(
            mrs[0].created_at,
            DateTime::parse_from_rfc3339("2024-03-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc)
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_open_merge_requests_rejects_bad_timestamp() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/projects/7/merge_requests")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"title":"x","created_at":"yesterday","author":{"id":1,"name":"a"}}]"#)
            .create_async()
            .await;

        let service = GitLabService::new(&config_for(&server)).unwrap();
        assert!(service.list_open_merge_requests().await.is_err());
    }

    #[tokio::test]
    async fn test_submit_merge_request_posts_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/projects/7/merge_requests")
            .match_header("PRIVATE-TOKEN", "glpat-test")
            .match_body(Matcher::Json(serde_json::json!({
                "source_branch": "feature/xyz",
                "target_branch": "stage",
                "title": "[Hapo-42] - Fix bug",
                "assignee_id": 5,
                "description": "- line1",
                "reviewer_ids": [11, 12]
            })))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"iid": 31, "web_url": "https://gitlab.example.com/g/p/-/merge_requests/31"}"#)
            .create_async()
            .await;

        let service = GitLabService::new(&config_for(&server)).unwrap();
        let created = service.submit_merge_request(&payload()).await.unwrap();

        assert_eq!(created.iid, 31);
        assert!(created.web_url.ends_with("/31"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_merge_request_conflict_is_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/projects/7/merge_requests")
            .with_status(409)
            .with_body(r#"{"message":["Another open merge request already exists"]}"#)
            .create_async()
            .await;

        let service = GitLabService::new(&config_for(&server)).unwrap();
        let err = service.submit_merge_request(&payload()).await.unwrap_err();
        assert!(err.to_string().contains("409"));
    }
}
