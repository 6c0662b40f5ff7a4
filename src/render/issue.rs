//! Issue document: description then comments in feed order.

use super::Document;
use crate::jira::RichTextConverter;
use crate::models::Issue;

const NO_DESCRIPTION: &str = "No description";

/// Render an issue with its converted description and comments.
pub fn render_issue(issue: &Issue, converter: &dyn RichTextConverter) -> String {
    let mut doc = Document::new(format!("# Jira Issue {}: {}", issue.key, issue.summary));

    doc.push("## Description");
    let description = issue
        .description
        .as_ref()
        .map(|d| converter.convert(d))
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());
    doc.push(description);

    if !issue.comments.is_empty() {
        doc.push("## Comments");
        for comment in &issue.comments {
            doc.push(format!(
                "### {} on {}\n\n{}",
                comment.author,
                comment.created,
                converter.convert(&comment.body)
            ));
        }
    }

    doc.finish()
}
