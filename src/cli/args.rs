//! Clap argument types.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Render merge request and issue discussions as markdown context.
#[derive(Parser, Debug)]
#[command(name = "reviewdoc", version = reviewdoc::constants::VERSION)]
pub struct Cli {
    /// Log debug output to stderr (overrides REVIEWDOC_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Render the comments of the open merge request for the current branch.
    Gitlab(GitlabArgs),

    /// Render a Jira issue with its comments.
    Jira(JiraArgs),

    /// List candidate Jira issues.
    Issues(IssuesArgs),

    /// Print version information.
    Version,
}

/// Arguments for the `gitlab` subcommand.
#[derive(Parser, Debug)]
pub struct GitlabArgs {
    /// Path inside the workspace repository (default: current directory).
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Embed the commented source lines from the workspace.
    #[arg(long, default_value_t = false)]
    pub snippets: bool,

    /// Output format.
    #[arg(long, default_value = "markdown")]
    pub format: ItemFormat,
}

/// Arguments for the `jira` subcommand.
#[derive(Parser, Debug)]
pub struct JiraArgs {
    /// Issue id or key (e.g. `PROJ-123`).
    pub issue: String,

    /// Directory to load `.reviewdoc.toml` from.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Output format.
    #[arg(long, default_value = "markdown")]
    pub format: ItemFormat,
}

/// Arguments for the `issues` subcommand.
#[derive(Parser, Debug)]
pub struct IssuesArgs {
    /// JQL query (default: unresolved issues assigned to you, recently updated first).
    #[arg(long)]
    pub query: Option<String>,

    /// Directory to load `.reviewdoc.toml` from.
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Output format.
    #[arg(long, default_value = "text")]
    pub format: ListFormat,
}

/// Output format for rendered documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ItemFormat {
    /// The markdown content only.
    Markdown,
    /// Context items (`name`, `content`, `description`) as JSON.
    Json,
}

/// Output format for issue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Text,
    /// Submenu items (`id`, `title`, `description`) as JSON.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_gitlab_defaults() {
        let cli = Cli::parse_from(["reviewdoc", "gitlab"]);
        match cli.command {
            Command::Gitlab(args) => {
                assert_eq!(args.path, PathBuf::from("."));
                assert!(!args.snippets);
                assert_eq!(args.format, ItemFormat::Markdown);
            }
            other => panic!("expected gitlab, got {other:?}"),
        }
    }

    #[test]
    fn parse_gitlab_flags() {
        let cli = Cli::parse_from([
            "reviewdoc", "-v", "gitlab", "--path", "/repo", "--snippets", "--format", "json",
        ]);
        assert!(cli.verbose);
        match cli.command {
            Command::Gitlab(args) => {
                assert_eq!(args.path, PathBuf::from("/repo"));
                assert!(args.snippets);
                assert_eq!(args.format, ItemFormat::Json);
            }
            other => panic!("expected gitlab, got {other:?}"),
        }
    }

    #[test]
    fn parse_jira_issue() {
        let cli = Cli::parse_from(["reviewdoc", "jira", "PROJ-7"]);
        match cli.command {
            Command::Jira(args) => assert_eq!(args.issue, "PROJ-7"),
            other => panic!("expected jira, got {other:?}"),
        }
    }

    #[test]
    fn parse_issues_query() {
        let cli = Cli::parse_from(["reviewdoc", "issues", "--query", "project = X", "--format", "json"]);
        match cli.command {
            Command::Issues(args) => {
                assert_eq!(args.query.as_deref(), Some("project = X"));
                assert_eq!(args.format, ListFormat::Json);
            }
            other => panic!("expected issues, got {other:?}"),
        }
    }

    #[test]
    fn jira_requires_issue() {
        assert!(Cli::try_parse_from(["reviewdoc", "jira"]).is_err());
    }
}
