//! Branch context and merge request comment types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the local checkout says about the current branch and its remote.
///
/// Built once per invocation from git output. Empty strings and `None`
/// mean the value could not be determined; downstream lookups treat a
/// missing `remote_branch` or `project` as "no review found".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchContext {
    /// Local branch name (`git branch --show-current`).
    pub branch_name: String,
    /// Remote the branch tracks (e.g. `origin`).
    pub remote_name: String,
    /// Branch name on the remote, parsed from the tracking display.
    pub remote_branch: Option<String>,
    /// Hosting-provider project path (e.g. `group/repo`).
    pub project: Option<String>,
}

/// An open merge request matched to the current branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Project-scoped merge request number.
    pub iid: u64,
    pub project_id: u64,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}

/// Inclusive, 1-based line range of the code a comment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

/// Code location a comment is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    pub file_path: String,
    pub line: Option<u32>,
    /// Head commit SHA the position was recorded against.
    pub commit: String,
    pub line_range: Option<LineRange>,
}

/// A single review comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    /// Author-supplied markdown, rendered verbatim.
    pub body: String,
    /// Provider timestamp, kept as the provider formats it.
    pub created_at: String,
    pub author: Author,
    pub resolved: bool,
    pub anchor: Option<Anchor>,
}

impl Comment {
    /// The grouping key for this comment.
    pub fn location(&self) -> Location {
        match &self.anchor {
            Some(anchor) => Location::File(anchor.file_path.clone()),
            None => Location::General,
        }
    }

    /// Anchor line number, if the comment has one.
    pub fn line(&self) -> Option<u32> {
        self.anchor.as_ref().and_then(|a| a.line)
    }
}

/// Grouping key: a file path or the general (unanchored) bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    File(String),
    General,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::File(path) => write!(f, "{path}"),
            Location::General => write!(f, "general"),
        }
    }
}

/// Comments sharing one location, in render order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationGroup {
    pub location: Location,
    pub comments: Vec<Comment>,
}
