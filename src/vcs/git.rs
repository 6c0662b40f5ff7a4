//! Git CLI wrapper for resolving branch context.
//!
//! Shells out to `git` via `tokio::process::Command`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::parse;
use crate::models::BranchContext;

/// Runs a command in a fixed working directory and returns its stdout.
///
/// Implementations must fail closed: a command that cannot be spawned or
/// exits non-zero yields an empty string, never an error.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program args..` and return trimmed stdout.
    async fn run(&self, program: &str, args: &[&str]) -> String;
}

/// [`CommandRunner`] that executes real processes in a repository root.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Bind to the top level of the repository containing `start_dir`.
    ///
    /// Falls back to `start_dir` itself when it is not inside a git
    /// repository, so later commands simply come back empty.
    pub async fn discover(start_dir: &Path) -> Self {
        let probe = Self::new(start_dir);
        let toplevel = probe.run("git", &["rev-parse", "--show-toplevel"]).await;
        if toplevel.is_empty() {
            probe
        } else {
            Self::new(toplevel)
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }
}

#[async_trait]
impl CommandRunner for GitCli {
    async fn run(&self, program: &str, args: &[&str]) -> String {
        let output = match tokio::process::Command::new(program)
            .args(args)
            .current_dir(&self.repo_root)
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                tracing::debug!("failed to run {program}: {e}");
                return String::new();
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(
                "{program} {} failed (exit {}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            );
            return String::new();
        }

        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}

/// Resolve the current branch, its remote, and the hosting project.
///
/// Steps:
/// 1. `git branch -vv` for the checked-out branch's tracking display
/// 2. `git branch --show-current` for the local branch name
/// 3. `git config branch.<name>.remote` for the tracked remote
/// 4. remote branch parsed from the tracking display
/// 5. `git remote get-url <remote>` for the project path
pub async fn resolve_branch_context(runner: &dyn CommandRunner) -> BranchContext {
    let verbose = runner.run("git", &["branch", "-vv"]).await;
    let current_line = parse::current_branch_line(&verbose).unwrap_or_default();

    let branch_name = runner.run("git", &["branch", "--show-current"]).await;

    let remote_name = if branch_name.is_empty() {
        String::new()
    } else {
        let key = format!("branch.{branch_name}.remote");
        runner.run("git", &["config", &key]).await
    };

    let remote_branch = parse::remote_branch(current_line, &remote_name);

    let project = if remote_name.is_empty() {
        None
    } else {
        let url = runner.run("git", &["remote", "get-url", &remote_name]).await;
        parse::project_path(&url)
    };

    let context = BranchContext {
        branch_name,
        remote_name,
        remote_branch,
        project,
    };
    tracing::debug!(?context, "resolved branch context");
    context
}
