//! GitLab REST client for merge requests and notes.
//!
//! Authenticates with a `PRIVATE-TOKEN` header against `<base>/api/v4`.

use async_trait::async_trait;
use reqwest::Url;

use super::wire::{MergeRequest, Note};
use super::{ApiFailure, GitlabError, ReviewLookup, ReviewSource};
use crate::config::{ConfigError, GitlabConfig};
use crate::models::{BranchContext, Comment, Review};

const TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// GitLab API client bound to one instance and token.
#[derive(Clone)]
pub struct GitlabClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for GitlabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitlabClient")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl GitlabClient {
    /// Create a client for the API rooted at `base_url` (e.g. `https://gitlab.com/api/v4`).
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &GitlabConfig) -> Result<Self, ConfigError> {
        let token = config.require_token()?;
        Ok(Self::new(config.api_url(), token))
    }

    /// Build `<base>/<segments..>`, percent-encoding each segment.
    ///
    /// Project paths like `group/repo` are a single segment and come out
    /// as `group%2Frepo`, which is how the API addresses projects by path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GitlabError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| GitlabError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| GitlabError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request_open_reviews(
        &self,
        project: &str,
        branch: &str,
    ) -> Result<Vec<MergeRequest>, ApiFailure> {
        let url = self
            .endpoint(&["projects", project, "merge_requests"])
            .map_err(|e| ApiFailure {
                status: None,
                payload: serde_json::json!({ "error": e.to_string() }),
            })?;
        tracing::debug!(%url, branch, "looking up open merge requests");

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .query(&[("source_branch", branch), ("state", "opened")])
            .send()
            .await
            .map_err(|e| ApiFailure {
                status: None,
                payload: serde_json::json!({ "error": e.to_string() }),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let payload = serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body));
            return Err(ApiFailure {
                status: Some(status.as_u16()),
                payload,
            });
        }

        response.json().await.map_err(|e| ApiFailure {
            status: Some(status.as_u16()),
            payload: serde_json::json!({ "error": e.to_string() }),
        })
    }
}

#[async_trait]
impl ReviewSource for GitlabClient {
    async fn find_open_review(&self, context: &BranchContext) -> ReviewLookup {
        let (Some(project), Some(branch)) = (&context.project, &context.remote_branch) else {
            tracing::debug!("branch context incomplete, skipping merge request lookup");
            return ReviewLookup::NotFound;
        };

        match self.request_open_reviews(project, branch).await {
            Ok(reviews) => match reviews.into_iter().next() {
                Some(mr) => ReviewLookup::Found(mr.into()),
                None => ReviewLookup::NotFound,
            },
            Err(failure) => {
                tracing::warn!(
                    status = ?failure.status,
                    payload = %failure.payload,
                    "merge request lookup failed"
                );
                ReviewLookup::Failed(failure)
            }
        }
    }

    async fn fetch_comments(&self, review: &Review) -> Result<Vec<Comment>, GitlabError> {
        let project_id = review.project_id.to_string();
        let iid = review.iid.to_string();
        let url = self.endpoint(&["projects", &project_id, "merge_requests", &iid, "notes"])?;
        tracing::debug!(%url, "fetching merge request notes");

        let response = self
            .http
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .query(&[("sort", "asc"), ("order_by", "created_at")])
            .send()
            .await
            .map_err(|e| GitlabError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GitlabError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let notes: Vec<Note> = response
            .json()
            .await
            .map_err(|e| GitlabError::Decode(e.to_string()))?;

        Ok(notes
            .into_iter()
            .filter(Note::is_review_discussion)
            .map(Comment::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_project_path() {
        let client = GitlabClient::new("https://gitlab.com/api/v4/", "t");
        let url = client
            .endpoint(&["projects", "group/sub/repo", "merge_requests"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://gitlab.com/api/v4/projects/group%2Fsub%2Frepo/merge_requests"
        );
    }

    #[test]
    fn endpoint_numeric_segments() {
        let client = GitlabClient::new("http://127.0.0.1:9/api/v4", "t");
        let url = client
            .endpoint(&["projects", "7", "merge_requests", "42", "notes"])
            .unwrap();
        assert_eq!(url.path(), "/api/v4/projects/7/merge_requests/42/notes");
    }

    #[test]
    fn endpoint_rejects_invalid_base() {
        let client = GitlabClient::new("not a url", "t");
        assert!(matches!(
            client.endpoint(&["projects"]),
            Err(GitlabError::InvalidUrl(_))
        ));
    }

    #[test]
    fn from_config_requires_token() {
        let config = GitlabConfig::default();
        assert!(GitlabClient::from_config(&config).is_err());

        let mut config = GitlabConfig::default();
        config.token = Some("glpat-x".into());
        let client = GitlabClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "https://gitlab.com/api/v4");
        assert!(!format!("{client:?}").contains("glpat-x"));
    }

    #[tokio::test]
    async fn incomplete_context_short_circuits() {
        // Unroutable base URL: any request would fail, so NotFound proves none was made.
        let client = GitlabClient::new("http://127.0.0.1:9/api/v4", "t");
        let context = BranchContext {
            branch_name: "feature-x".into(),
            remote_name: "origin".into(),
            remote_branch: None,
            project: Some("group/repo".into()),
        };
        assert_eq!(client.find_open_review(&context).await, ReviewLookup::NotFound);
    }

    #[tokio::test]
    async fn transport_error_is_captured() {
        let client = GitlabClient::new("http://127.0.0.1:9/api/v4", "t");
        let context = BranchContext {
            branch_name: "feature-x".into(),
            remote_name: "origin".into(),
            remote_branch: Some("feature-x".into()),
            project: Some("group/repo".into()),
        };
        match client.find_open_review(&context).await {
            ReviewLookup::Failed(failure) => {
                assert_eq!(failure.status, None);
                assert!(failure.payload["error"].is_string());
            }
            other => panic!("expected captured failure, got {other:?}"),
        }
    }
}
