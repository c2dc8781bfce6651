//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{CommentRecord, PostRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Read access to comments and their author snapshots.
#[async_trait]
pub trait CommentsRepo: Send + Sync {
    /// Number of comments on a post.
    ///
    /// Aggregate queries always return a row (zero included), so this has no
    /// not-found case.
    async fn count_for_post(&self, post_id: i64) -> Result<i64, RepoError>;

    /// Comments on a post joined with their author snapshots, newest first.
    /// `limit` caps the result when present.
    async fn list_for_post(
        &self,
        post_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<CommentRecord>, RepoError>;
}

/// Read access to raw post rows for feed pages.
#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Most recent posts by non-deleted authors, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError>;
}
