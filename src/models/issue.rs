//! Issue-tracker types.

use serde::{Deserialize, Serialize};

/// An issue with its rich-text description and comment feed.
///
/// `description` and comment bodies are kept as raw structured documents
/// (Atlassian Document Format) until rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub description: Option<serde_json::Value>,
    pub comments: Vec<IssueComment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: String,
    /// Author display name.
    pub author: String,
    pub created: String,
    pub body: serde_json::Value,
}

/// Lightweight listing entry for issue selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub id: String,
    pub key: String,
    pub summary: String,
}

impl IssueSummary {
    /// `KEY-1: Summary` label used in listings and item names.
    pub fn label(&self) -> String {
        format!("{}: {}", self.key, self.summary)
    }
}
