//! Jira issue context and candidate-issue submenu.

use async_trait::async_trait;

use super::{ContextProvider, ProviderError};
use crate::constants;
use crate::jira::{IssueSource, RichTextConverter};
use crate::models::{ContextItem, SubmenuItem};
use crate::render::render_issue;

pub struct JiraProvider {
    source: Box<dyn IssueSource>,
    converter: Box<dyn RichTextConverter>,
    query: String,
    title: String,
    display: String,
}

impl JiraProvider {
    pub fn new(source: Box<dyn IssueSource>, converter: Box<dyn RichTextConverter>) -> Self {
        Self {
            source,
            converter,
            query: constants::DEFAULT_ISSUE_QUERY.to_string(),
            title: "jira".to_string(),
            display: "Jira".to_string(),
        }
    }

    /// JQL used by [`ContextProvider::submenu_items`].
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_labels(mut self, title: impl Into<String>, display: impl Into<String>) -> Self {
        self.title = title.into();
        self.display = display.into();
        self
    }
}

#[async_trait]
impl ContextProvider for JiraProvider {
    fn title(&self) -> &str {
        &self.title
    }

    fn display_title(&self) -> &str {
        &self.display
    }

    fn description(&self) -> &str {
        "Retrieve ticket information from Jira"
    }

    async fn context_items(&self, issue_id: &str) -> Result<Vec<ContextItem>, ProviderError> {
        let issue = self.source.get_issue(issue_id).await?;
        let content = render_issue(&issue, self.converter.as_ref());

        Ok(vec![ContextItem {
            name: format!("{}: {}", issue.key, issue.summary),
            content,
            description: issue.key,
        }])
    }

    async fn submenu_items(&self) -> Vec<SubmenuItem> {
        match self.source.search(&self.query).await {
            Ok(issues) => issues
                .into_iter()
                .map(|issue| SubmenuItem {
                    title: issue.label(),
                    id: issue.id,
                    description: String::new(),
                })
                .collect(),
            Err(e) => {
                tracing::warn!("unable to list Jira issues: {e}");
                Vec::new()
            }
        }
    }
}
