//! Jira REST v3 response shapes.

use serde::Deserialize;

use crate::models::{Issue, IssueComment, IssueSummary};

#[derive(Debug, Clone, Deserialize)]
pub struct WireIssue {
    pub id: String,
    pub key: String,
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueFields {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: Option<serde_json::Value>,
    #[serde(default)]
    pub comment: Option<CommentPage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentPage {
    #[serde(default)]
    pub comments: Vec<WireComment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireComment {
    pub id: String,
    pub author: WireUser,
    #[serde(default)]
    pub created: String,
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUser {
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub issues: Vec<WireIssue>,
}

impl From<WireIssue> for Issue {
    fn from(issue: WireIssue) -> Self {
        let comments = issue
            .fields
            .comment
            .unwrap_or_default()
            .comments
            .into_iter()
            .map(|c| IssueComment {
                id: c.id,
                author: c.author.display_name,
                created: c.created,
                body: c.body,
            })
            .collect();

        Issue {
            id: issue.id,
            key: issue.key,
            summary: issue.fields.summary,
            description: issue.fields.description.filter(|d| !d.is_null()),
            comments,
        }
    }
}

impl From<WireIssue> for IssueSummary {
    fn from(issue: WireIssue) -> Self {
        IssueSummary {
            id: issue.id,
            key: issue.key,
            summary: issue.fields.summary,
        }
    }
}
