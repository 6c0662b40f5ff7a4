//! Source snippets for anchored comments, read from the local workspace.
//!
//! Best effort: a file that is missing, unreadable, outside the
//! workspace, or shorter than the anchored range yields no snippet.

use std::collections::HashMap;
use std::path::{Component, Path};

use crate::models::{Anchor, LocationGroup};

/// A fenced excerpt of workspace source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Fence info string (the file extension, possibly empty).
    pub language: String,
    pub text: String,
}

impl Snippet {
    /// Render as a fenced code block.
    ///
    /// The fence is one backtick longer than any backtick run in the text.
    pub fn to_markdown(&self) -> String {
        let longest_run = self
            .text
            .split(|c| c != '`')
            .map(str::len)
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest_run.max(2) + 1);
        format!("{fence}{}\n{}\n{fence}", self.language, self.text)
    }
}

/// Load snippets for every anchored comment with a line range, keyed by comment id.
pub async fn load_snippets(workspace_root: &Path, groups: &[LocationGroup]) -> HashMap<u64, Snippet> {
    let mut snippets = HashMap::new();

    for comment in groups.iter().flat_map(|g| &g.comments) {
        let Some(anchor) = &comment.anchor else {
            continue;
        };
        if let Some(snippet) = load_snippet(workspace_root, anchor).await {
            snippets.insert(comment.id, snippet);
        }
    }

    snippets
}

/// Read the anchor's inclusive line range from the workspace copy of its file.
pub async fn load_snippet(workspace_root: &Path, anchor: &Anchor) -> Option<Snippet> {
    let range = anchor.line_range?;
    let relative = Path::new(&anchor.file_path);
    if !is_workspace_relative(relative) {
        tracing::debug!(path = %anchor.file_path, "skipping snippet outside workspace");
        return None;
    }

    let content = match tokio::fs::read_to_string(workspace_root.join(relative)).await {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(path = %anchor.file_path, "skipping snippet: {e}");
            return None;
        }
    };

    let text = slice_lines(&content, range.start, range.end)?;
    let language = relative
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_string();

    Some(Snippet { language, text })
}

/// Lines `start..=end` (1-based). The end is clamped to the file length.
fn slice_lines(content: &str, start: u32, end: u32) -> Option<String> {
    if start == 0 || end < start {
        return None;
    }
    let lines: Vec<&str> = content
        .lines()
        .skip(start as usize - 1)
        .take((end - start) as usize + 1)
        .collect();
    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn is_workspace_relative(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, Comment, LineRange, Location};

    fn anchor(path: &str, start: u32, end: u32) -> Anchor {
        Anchor {
            file_path: path.to_string(),
            line: Some(end),
            commit: "abc".into(),
            line_range: Some(LineRange { start, end }),
        }
    }

    #[test]
    fn slice_inclusive_range() {
        let content = "one\ntwo\nthree\nfour\n";
        assert_eq!(slice_lines(content, 2, 3).as_deref(), Some("two\nthree"));
        assert_eq!(slice_lines(content, 4, 4).as_deref(), Some("four"));
    }

    #[test]
    fn slice_clamps_end() {
        assert_eq!(slice_lines("a\nb", 2, 10).as_deref(), Some("b"));
    }

    #[test]
    fn slice_out_of_range() {
        assert_eq!(slice_lines("a\nb", 5, 6), None);
        assert_eq!(slice_lines("a\nb", 0, 1), None);
        assert_eq!(slice_lines("a\nb", 2, 1), None);
    }

    #[test]
    fn workspace_relative_paths() {
        assert!(is_workspace_relative(Path::new("src/a.rs")));
        assert!(is_workspace_relative(Path::new("./a.rs")));
        assert!(!is_workspace_relative(Path::new("../a.rs")));
        assert!(!is_workspace_relative(Path::new("/etc/passwd")));
        assert!(!is_workspace_relative(Path::new("")));
    }

    #[test]
    fn fence_outgrows_backticks_in_text() {
        let snippet = Snippet {
            language: "md".into(),
            text: "```rust\nfn x() {}\n```".into(),
        };
        let rendered = snippet.to_markdown();
        assert!(rendered.starts_with("````md\n"));
        assert!(rendered.ends_with("\n````"));

        let plain = Snippet {
            language: String::new(),
            text: "x".into(),
        };
        assert_eq!(plain.to_markdown(), "```\nx\n```");
    }

    #[tokio::test]
    async fn loads_snippet_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/a.ts"), "l1\nl2\nl3\nl4\n").unwrap();

        let snippet = load_snippet(dir.path(), &anchor("src/a.ts", 2, 3)).await.unwrap();
        assert_eq!(snippet.language, "ts");
        assert_eq!(snippet.text, "l2\nl3");
    }

    #[tokio::test]
    async fn missing_file_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_snippet(dir.path(), &anchor("gone.rs", 1, 2)).await.is_none());
        assert!(load_snippet(dir.path(), &anchor("../escape.rs", 1, 2)).await.is_none());
    }

    #[tokio::test]
    async fn load_snippets_keys_by_comment_id() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.rs"), "fn a() {}\n").unwrap();

        let make = |id, anchor| Comment {
            id,
            body: String::new(),
            created_at: String::new(),
            author: Author { name: "Ada".into() },
            resolved: false,
            anchor,
        };
        let groups = vec![
            LocationGroup {
                location: Location::File("a.rs".into()),
                comments: vec![make(1, Some(anchor("a.rs", 1, 1))), make(2, Some(anchor("b.rs", 1, 1)))],
            },
            LocationGroup {
                location: Location::General,
                comments: vec![make(3, None)],
            },
        ];

        let snippets = load_snippets(dir.path(), &groups).await;
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[&1].text, "fn a() {}");
    }
}
