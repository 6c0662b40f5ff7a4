//! Merge request lookup against the GitLab REST API.
//!
//! Provides the [`ReviewSource`] abstraction so the comment pipeline can
//! be driven by the real [`client::GitlabClient`] or a test double.

pub mod client;
pub mod wire;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BranchContext, Comment, Review};

pub use client::GitlabClient;

/// Errors from GitLab API calls that are not captured as a lookup outcome.
#[derive(Error, Debug)]
pub enum GitlabError {
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("API request failed: {0}")]
    Request(String),

    #[error("API request failed with HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode API response: {0}")]
    Decode(String),
}

/// Error payload captured from a failed lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiFailure {
    /// HTTP status, when the server answered at all.
    pub status: Option<u16>,
    /// Provider error body (JSON when parseable, else a string).
    pub payload: serde_json::Value,
}

/// Outcome of looking up the open merge request for a branch.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewLookup {
    Found(Review),
    NotFound,
    /// The provider rejected or failed the request; treated as "no review".
    Failed(ApiFailure),
}

impl ReviewLookup {
    pub fn review(&self) -> Option<&Review> {
        match self {
            ReviewLookup::Found(review) => Some(review),
            _ => None,
        }
    }
}

/// Source of merge requests and their comment feeds.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Find the first open merge request whose source branch is the
    /// context's remote branch. Never errors: failures are captured.
    async fn find_open_review(&self, context: &BranchContext) -> ReviewLookup;

    /// Fetch the review's discussion comments, oldest first.
    async fn fetch_comments(&self, review: &Review) -> Result<Vec<Comment>, GitlabError>;
}
