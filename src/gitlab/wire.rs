//! GitLab API response shapes and their conversion to domain types.

use serde::Deserialize;

use crate::models::{Anchor, Author, Comment, LineRange, Review};

/// Note type GitLab assigns to comments on a diff line.
pub const DIFF_NOTE: &str = "DiffNote";

#[derive(Debug, Clone, Deserialize)]
pub struct MergeRequest {
    pub iid: u64,
    pub project_id: u64,
    #[serde(default)]
    pub state: String,
}

impl From<MergeRequest> for Review {
    fn from(mr: MergeRequest) -> Self {
        Review {
            iid: mr.iid,
            project_id: mr.project_id,
            state: mr.state,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Note {
    pub id: u64,
    #[serde(rename = "type", default)]
    pub note_type: Option<String>,
    #[serde(default)]
    pub system: bool,
    #[serde(default)]
    pub resolvable: bool,
    #[serde(default)]
    pub resolved: Option<bool>,
    pub body: String,
    pub created_at: String,
    pub author: NoteAuthor,
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NoteAuthor {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub new_path: Option<String>,
    #[serde(default)]
    pub old_path: Option<String>,
    #[serde(default)]
    pub new_line: Option<u32>,
    #[serde(default)]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub line_range: Option<PositionRange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionRange {
    pub start: RangePoint,
    pub end: RangePoint,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RangePoint {
    #[serde(default)]
    pub new_line: Option<u32>,
}

impl Note {
    /// Whether this note is part of the review discussion.
    ///
    /// Only diff discussion counts. System events (pushes, label changes,
    /// approvals) and overview threads are dropped.
    pub fn is_review_discussion(&self) -> bool {
        !self.system && self.note_type.as_deref() == Some(DIFF_NOTE)
    }

    /// Line numbers come from the head side only. A comment on a removed
    /// line keeps its file but has no line or range.
    fn anchor(&self) -> Option<Anchor> {
        let position = self.position.as_ref()?;
        let file_path = position.new_path.clone().or_else(|| position.old_path.clone())?;
        let line = position.new_line;

        let line_range = position
            .line_range
            .as_ref()
            .and_then(|range| match (range.start.new_line, range.end.new_line) {
                (Some(start), Some(end)) => Some(LineRange {
                    start: start.min(end),
                    end: start.max(end),
                }),
                _ => None,
            })
            .or_else(|| line.map(|l| LineRange { start: l, end: l }));

        Some(Anchor {
            file_path,
            line,
            commit: position.head_sha.clone().unwrap_or_default(),
            line_range,
        })
    }
}

impl From<Note> for Comment {
    fn from(note: Note) -> Self {
        let anchor = note.anchor();
        Comment {
            id: note.id,
            body: note.body,
            created_at: note.created_at,
            author: Author {
                name: note.author.name,
            },
            resolved: note.resolved.unwrap_or(false),
            anchor,
        }
    }
}
