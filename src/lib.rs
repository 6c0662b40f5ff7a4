//! reviewdoc — render review discussions as markdown context (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod aggregate;
pub mod config;
pub mod constants;
pub mod env;
pub mod gitlab;
pub mod jira;
pub mod models;
pub mod providers;
pub mod render;
pub mod vcs;
