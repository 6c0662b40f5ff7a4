//! Jira issue retrieval.
//!
//! [`IssueSource`] abstracts the REST client so the issue pipeline can be
//! tested without a server; [`adf`] converts Atlassian Document Format
//! bodies to markdown.

pub mod adf;
pub mod client;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Issue, IssueSummary};

pub use adf::{AdfMarkdown, RichTextConverter};
pub use client::JiraClient;

/// Errors from Jira API calls.
#[derive(Error, Debug)]
pub enum JiraError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("API request failed: {0}")]
    Request(String),

    #[error("API request failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode API response: {0}")]
    Decode(String),
}

/// Source of issues and issue listings.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Fetch one issue with its description and comments.
    async fn get_issue(&self, issue_id: &str) -> Result<Issue, JiraError>;

    /// Run a JQL query and return lightweight summaries.
    async fn search(&self, jql: &str) -> Result<Vec<IssueSummary>, JiraError>;
}
