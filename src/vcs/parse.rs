//! Parsers for git command output.
//!
//! All text scraping of `git` output lives here so it can be replaced by
//! structured queries without touching the rest of the pipeline.

use regex::Regex;

/// Marker git prints in front of the checked-out branch.
const CURRENT_BRANCH_MARKER: char = '*';

/// Find the `git branch -vv` line for the checked-out branch.
pub fn current_branch_line(verbose: &str) -> Option<&str> {
    verbose
        .lines()
        .find(|line| line.starts_with(CURRENT_BRANCH_MARKER))
}

/// Extract the remote branch name from a `git branch -vv` line.
///
/// Matches `[<remote>/<branch>]`. The tracking display may carry an
/// `: ahead 1, behind 2` (or `: gone`) suffix inside the brackets; git
/// ref names cannot contain `:`, so the name ends there.
pub fn remote_branch(line: &str, remote: &str) -> Option<String> {
    if remote.is_empty() {
        return None;
    }

    let pattern = format!(r"\[{}/([^\]:]+)(?::[^\]]*)?\]", regex::escape(remote));
    let re = Regex::new(&pattern).ok()?;
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

/// Extract the hosting project path from a remote URL.
///
/// Strips a trailing `.git`, then:
/// - URL-style remotes (`https://host/group/repo`, `ssh://git@host:22/group/repo`)
///   yield the URL path;
/// - SCP-style remotes (`git@host:group/repo`) yield the text after the last `:`.
///
/// Local-path remotes have no project and return `None`.
pub fn project_path(url: &str) -> Option<String> {
    let url = url.trim().trim_end_matches('/');
    if url.is_empty() {
        return None;
    }
    let url = url.strip_suffix(".git").unwrap_or(url);

    let path = if url.contains("://") {
        let parsed = reqwest::Url::parse(url).ok()?;
        parsed.path().trim_matches('/').to_string()
    } else {
        let (_, path) = url.rsplit_once(':')?;
        path.trim_matches('/').to_string()
    };

    if path.is_empty() { None } else { Some(path) }
}
