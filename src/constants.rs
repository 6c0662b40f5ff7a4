//! App-wide constants.
//!
//! Centralises the tool name, config paths, environment variable names,
//! and default provider endpoints so a rename only requires changing this file.

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "reviewdoc";

/// Crate version, as reported by `reviewdoc version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local config filename (e.g. `.reviewdoc.toml` in the workspace root).
pub const CONFIG_FILENAME: &str = ".reviewdoc.toml";

/// Directory name under `~/.config/` for global config.
pub const CONFIG_DIR: &str = "reviewdoc";

/// GitLab host used when none is configured.
pub const DEFAULT_GITLAB_DOMAIN: &str = "gitlab.com";

/// JQL used to list candidate issues when no query is configured.
pub const DEFAULT_ISSUE_QUERY: &str =
    "assignee = currentUser() AND resolution = Unresolved order by updated DESC";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_LOG: &str = "REVIEWDOC_LOG";
pub const ENV_GITLAB_TOKEN: &str = "REVIEWDOC_GITLAB_TOKEN";
pub const ENV_GITLAB_TOKEN_FALLBACK: &str = "GITLAB_TOKEN";
pub const ENV_GITLAB_DOMAIN: &str = "REVIEWDOC_GITLAB_DOMAIN";
pub const ENV_GITLAB_URL: &str = "REVIEWDOC_GITLAB_URL";
pub const ENV_JIRA_INSTANCE: &str = "REVIEWDOC_JIRA_INSTANCE";
pub const ENV_JIRA_EMAIL: &str = "REVIEWDOC_JIRA_EMAIL";
pub const ENV_JIRA_TOKEN: &str = "REVIEWDOC_JIRA_TOKEN";
pub const ENV_JIRA_TOKEN_FALLBACK: &str = "JIRA_API_TOKEN";
pub const ENV_JIRA_QUERY: &str = "REVIEWDOC_JIRA_QUERY";
pub const ENV_SNIPPETS: &str = "REVIEWDOC_SNIPPETS";
