//! Shared types used across all modules.
//!
//! This module defines the core data structures for branch context,
//! review comments, issues, and the host output contract. Other modules
//! import from here rather than reaching into each other's internals.

pub mod context;
pub mod issue;
pub mod review;

pub use context::{ContextItem, SubmenuItem};
pub use issue::{Issue, IssueComment, IssueSummary};
pub use review::{Anchor, Author, BranchContext, Comment, LineRange, Location, LocationGroup, Review};
