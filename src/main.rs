//! reviewdoc — render review discussions as markdown context.
//!
//! Entry point and error handling boundary. Uses `anyhow` for
//! ergonomic error propagation and user-facing messages.

mod cli;

use reviewdoc::config::Config;
use reviewdoc::constants;
use reviewdoc::env::Env;
use reviewdoc::gitlab::GitlabClient;
use reviewdoc::jira::{AdfMarkdown, JiraClient};
use reviewdoc::providers::{ContextProvider, GitlabCommentsProvider, JiraProvider};
use reviewdoc::vcs::GitCli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::args::{Cli, Command, GitlabArgs, IssuesArgs, JiraArgs};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match cli.command {
        Command::Gitlab(args) => run_gitlab(args).await,
        Command::Jira(args) => run_jira(args).await,
        Command::Issues(args) => run_issues(args).await,
        Command::Version => run_version(),
    }
}

/// Install the stderr log subscriber.
///
/// `--verbose` enables debug output for this crate; otherwise the filter
/// comes from `REVIEWDOC_LOG`, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(format!("{}=debug", constants::APP_NAME))
    } else {
        EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Print version information.
fn run_version() -> Result<()> {
    use colored::Colorize;

    println!("{} {}", constants::APP_NAME.bold(), constants::VERSION.green().bold());
    Ok(())
}

/// Render the merge request comments for the workspace's current branch.
async fn run_gitlab(args: GitlabArgs) -> Result<()> {
    let runner = GitCli::discover(&args.path).await;
    let workspace_root = runner.repo_root().to_path_buf();

    let config = Config::load(Some(workspace_root.as_path()), &Env::real())
        .context("failed to load configuration")?;
    let client = GitlabClient::from_config(&config.gitlab).context("GitLab is not configured")?;

    let provider = GitlabCommentsProvider::new(Box::new(runner), Box::new(client), workspace_root)
        .with_snippets(args.snippets || config.render.snippets())
        .with_labels(&config.gitlab.title, &config.gitlab.display);

    let items = provider
        .context_items("")
        .await
        .context("failed to render merge request comments")?;

    cli::print_items(&items, args.format)
}

fn jira_provider(config: &Config) -> Result<JiraProvider> {
    let client = JiraClient::from_config(&config.jira).context("Jira is not configured")?;
    Ok(JiraProvider::new(Box::new(client), Box::new(AdfMarkdown))
        .with_query(config.jira.query())
        .with_labels(&config.jira.title, &config.jira.display))
}

/// Render one Jira issue.
async fn run_jira(args: JiraArgs) -> Result<()> {
    let config =
        Config::load(Some(args.path.as_path()), &Env::real()).context("failed to load configuration")?;
    let provider = jira_provider(&config)?;

    let items = provider
        .context_items(&args.issue)
        .await
        .with_context(|| format!("failed to render issue {}", args.issue))?;

    cli::print_items(&items, args.format)
}

/// List candidate Jira issues.
async fn run_issues(args: IssuesArgs) -> Result<()> {
    let config =
        Config::load(Some(args.path.as_path()), &Env::real()).context("failed to load configuration")?;
    let mut provider = jira_provider(&config)?;
    if let Some(query) = args.query {
        provider = provider.with_query(query);
    }

    let items = provider.submenu_items().await;
    cli::print_submenu(&items, args.format)
}
