//! Merge request comments for the checked-out branch.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{ContextProvider, ProviderError};
use crate::aggregate::group_by_location;
use crate::gitlab::ReviewSource;
use crate::models::ContextItem;
use crate::render::{load_snippets, render_review};
use crate::vcs::{CommandRunner, resolve_branch_context};

pub const ITEM_NAME: &str = "GitLab MR Comments";
pub const ITEM_DESCRIPTION: &str = "Comments from the Merge Request for this branch.";

/// Resolves the branch, finds its open merge request, and renders the
/// grouped discussion.
pub struct GitlabCommentsProvider {
    runner: Box<dyn CommandRunner>,
    source: Box<dyn ReviewSource>,
    workspace_root: PathBuf,
    snippets: bool,
    title: String,
    display: String,
}

impl GitlabCommentsProvider {
    pub fn new(
        runner: Box<dyn CommandRunner>,
        source: Box<dyn ReviewSource>,
        workspace_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            source,
            workspace_root: workspace_root.into(),
            snippets: false,
            title: "gitlab_mr".to_string(),
            display: ITEM_NAME.to_string(),
        }
    }

    /// Embed anchored source ranges from the workspace.
    pub fn with_snippets(mut self, enabled: bool) -> Self {
        self.snippets = enabled;
        self
    }

    pub fn with_labels(mut self, title: impl Into<String>, display: impl Into<String>) -> Self {
        self.title = title.into();
        self.display = display.into();
        self
    }

    /// Run the pipeline and return the rendered document.
    pub async fn render(&self) -> Result<String, ProviderError> {
        let context = resolve_branch_context(self.runner.as_ref()).await;
        let lookup = self.source.find_open_review(&context).await;

        let review = lookup.review();
        let groups = match review {
            Some(review) => group_by_location(self.source.fetch_comments(review).await?),
            None => Vec::new(),
        };

        let snippets = if self.snippets {
            load_snippets(&self.workspace_root, &groups).await
        } else {
            HashMap::new()
        };

        Ok(render_review(&context, review, &groups, &snippets))
    }
}

#[async_trait]
impl ContextProvider for GitlabCommentsProvider {
    fn title(&self) -> &str {
        &self.title
    }

    fn display_title(&self) -> &str {
        &self.display
    }

    fn description(&self) -> &str {
        "Get GitLab comments for this branch's Merge Request"
    }

    async fn context_items(&self, _query: &str) -> Result<Vec<ContextItem>, ProviderError> {
        let content = self.render().await?;
        Ok(vec![ContextItem {
            name: ITEM_NAME.to_string(),
            content,
            description: ITEM_DESCRIPTION.to_string(),
        }])
    }
}
