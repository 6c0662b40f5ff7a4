//! Context providers: the surface the host tool calls.
//!
//! Each provider runs one pipeline end to end and returns rendered
//! [`ContextItem`]s. Collaborators (git runner, API sources, rich-text
//! converter) are injected at construction.

pub mod gitlab;
pub mod jira;

use async_trait::async_trait;
use thiserror::Error;

use crate::gitlab::GitlabError;
use crate::jira::JiraError;
use crate::models::{ContextItem, SubmenuItem};

pub use gitlab::GitlabCommentsProvider;
pub use jira::JiraProvider;

/// Errors that escape a provider. Everything else degrades to a
/// smaller document.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("GitLab: {0}")]
    Gitlab(#[from] GitlabError),

    #[error("Jira: {0}")]
    Jira(#[from] JiraError),
}

/// A named source of markdown context.
#[async_trait]
pub trait ContextProvider: Send + Sync {
    /// Stable identifier (e.g. `gitlab_mr`).
    fn title(&self) -> &str;

    /// Human-readable name.
    fn display_title(&self) -> &str;

    fn description(&self) -> &str;

    /// Produce context items. `query` is the selected submenu id, or empty.
    async fn context_items(&self, query: &str) -> Result<Vec<ContextItem>, ProviderError>;

    /// Selectable entries, for providers that offer a submenu.
    async fn submenu_items(&self) -> Vec<SubmenuItem> {
        Vec::new()
    }
}
