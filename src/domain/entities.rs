//! Domain entities mirrored from persistent storage.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Raw feed row for a single post, as selected by the serving layer.
///
/// `comment_count` and `comments` are deliberately absent here: they are
/// derived per request by the feed assembler and live on [`FeedEntry`], never
/// on the persisted post itself.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct PostRecord {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    pub mime: String,
    pub created_at: OffsetDateTime,
    /// Account name of the post author, joined in by the feed query.
    pub account_name: String,
}

/// Author snapshot taken at comment time.
///
/// Denormalized by value into [`CommentRecord`] so a cached comment list
/// round-trips without a second per-comment user lookup. Not re-resolved
/// later; renames or bans after the comment was written do not surface here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub id: i64,
    pub account_name: String,
    pub authority: bool,
    pub deleted: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A comment joined with its author snapshot. Immutable once created.
///
/// The serde field names are part of the cache contract: an entry written by
/// one process must reconstruct field-for-field in another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub author: AuthorRecord,
}

/// Fully hydrated feed entry produced by the assembler.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub id: i64,
    pub user_id: i64,
    pub body: String,
    pub mime: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub account_name: String,
    pub comment_count: i64,
    /// Oldest-first; truncated mode carries at most the 3 most recent.
    pub comments: Vec<CommentRecord>,
    /// Echoed verbatim from the request that triggered assembly.
    pub csrf_token: String,
}
