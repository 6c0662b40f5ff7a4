//! Jira Cloud REST v3 client.
//!
//! Authenticates with basic auth (account email + API token).

use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::wire::{SearchResults, WireIssue};
use super::{IssueSource, JiraError};
use crate::config::{ConfigError, JiraConfig};
use crate::models::{Issue, IssueSummary};

/// Fields requested when fetching a single issue.
const ISSUE_FIELDS: &str = "description,comment,summary";

/// Jira API client bound to one instance and account.
#[derive(Clone)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    email: String,
    token: String,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl JiraClient {
    /// Create a client for the API rooted at `base_url` (e.g. `https://acme.atlassian.net/rest/api/3`).
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            token: token.into(),
        }
    }

    pub fn from_config(config: &JiraConfig) -> Result<Self, ConfigError> {
        let base_url = config.api_url()?;
        let (email, token) = config.credentials()?;
        Ok(Self::new(base_url, email, token))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, JiraError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| JiraError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| JiraError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, JiraError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "jira request");

        let response = self
            .http
            .get(url)
            .basic_auth(&self.email, Some(&self.token))
            .query(query)
            .send()
            .await
            .map_err(|e| JiraError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(JiraError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| JiraError::Decode(e.to_string()))
    }
}

#[async_trait]
impl IssueSource for JiraClient {
    async fn get_issue(&self, issue_id: &str) -> Result<Issue, JiraError> {
        let issue: WireIssue = self
            .get_json(&["issue", issue_id], &[("fields", ISSUE_FIELDS)])
            .await?;
        Ok(issue.into())
    }

    async fn search(&self, jql: &str) -> Result<Vec<IssueSummary>, JiraError> {
        let results: SearchResults = self
            .get_json(&["search"], &[("jql", jql), ("fields", "summary")])
            .await?;
        Ok(results.issues.into_iter().map(IssueSummary::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_segments() {
        let client = JiraClient::new("https://acme.atlassian.net/rest/api/3/", "a@b.c", "t");
        let url = client.endpoint(&["issue", "PROJ-7"]).unwrap();
        assert_eq!(url.as_str(), "https://acme.atlassian.net/rest/api/3/issue/PROJ-7");
    }

    #[test]
    fn from_config_requires_instance_and_credentials() {
        let mut config = JiraConfig::default();
        assert!(JiraClient::from_config(&config).is_err());

        config.instance = Some("https://acme.atlassian.net".into());
        config.email = Some("dev@acme.com".into());
        assert!(JiraClient::from_config(&config).is_err());

        config.token = Some("secret".into());
        let client = JiraClient::from_config(&config).unwrap();
        assert_eq!(client.base_url, "https://acme.atlassian.net/rest/api/3");
        assert!(!format!("{client:?}").contains("secret"));
    }

    #[tokio::test]
    async fn unreachable_server_is_request_error() {
        let client = JiraClient::new("http://127.0.0.1:9/rest/api/3", "a@b.c", "t");
        let err = client.get_issue("PROJ-1").await.unwrap_err();
        assert!(matches!(err, JiraError::Request(_)), "got: {err}");
    }
}
