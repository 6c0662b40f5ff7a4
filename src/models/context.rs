//! Output contract handed to the host tool.

use serde::{Deserialize, Serialize};

/// A rendered context item: one markdown document plus its labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextItem {
    pub name: String,
    /// Markdown content.
    pub content: String,
    pub description: String,
}

/// A selectable entry in a provider's submenu (e.g. a candidate issue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmenuItem {
    pub id: String,
    pub title: String,
    pub description: String,
}
