//! Merge request comment document.

use std::collections::HashMap;

use super::{Document, Snippet};
use crate::models::{BranchContext, Comment, Location, LocationGroup, Review};

pub const REVIEW_TITLE: &str = "# GitLab Merge Request Comments";

/// Placeholder for branch context values that could not be resolved.
const UNKNOWN: &str = "unknown";

/// Render the merge request document.
///
/// Block order: title, branch/project metadata, merge request number
/// (when a review was found), then one section per location group.
/// `snippets` maps comment ids to source excerpts; comments without an
/// entry are rendered without one.
pub fn render_review(
    context: &BranchContext,
    review: Option<&Review>,
    groups: &[LocationGroup],
    snippets: &HashMap<u64, Snippet>,
) -> String {
    let mut doc = Document::new(REVIEW_TITLE);

    doc.push(format!(
        "Branch: {}\nProject: {}",
        context.remote_branch.as_deref().unwrap_or(UNKNOWN),
        context.project.as_deref().unwrap_or(UNKNOWN),
    ));

    if let Some(review) = review {
        doc.push(format!("Merge Request: {}", review.iid));
    }

    for group in groups {
        match &group.location {
            Location::File(path) => doc.push(format!("## File {path}")),
            Location::General => doc.push("## Comments"),
        }
        for comment in &group.comments {
            doc.push(format_comment(comment, snippets.get(&comment.id)));
        }
    }

    doc.finish()
}

/// One comment subsection: heading, optional position, optional snippet, body.
fn format_comment(comment: &Comment, snippet: Option<&Snippet>) -> String {
    let mut parts = vec![format!(
        "### {} on {}{}",
        comment.author.name,
        comment.created_at,
        if comment.resolved { " (Resolved)" } else { "" }
    )];

    if let Some(anchor) = &comment.anchor {
        if let Some(line) = anchor.line {
            parts.push(format!("line: {line}\ncommit: {}", anchor.commit));
        }
    }

    if let Some(snippet) = snippet {
        parts.push(snippet.to_markdown());
    }

    parts.push(comment.body.clone());
    parts.join(super::BLOCK_SEPARATOR)
}
