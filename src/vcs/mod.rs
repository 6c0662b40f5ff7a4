//! Version-control context resolution.
//!
//! Discovers the current branch, the remote it tracks, and the hosting
//! project path by shelling out to `git`. Resolution never fails: fields
//! that cannot be determined come back empty or `None`.

pub mod git;
pub mod parse;

pub use git::{CommandRunner, GitCli, resolve_branch_context};
