//! Feed-assembly error taxonomy.

use thiserror::Error;

use crate::application::repos::RepoError;
use crate::cache::CacheError;

/// Failure of a feed-assembly stage.
///
/// There are no retries at this level: the first error aborts the whole
/// batch and surfaces to the caller with no partial results. Write-back
/// failures are treated exactly like read failures: a cache that silently
/// diverges from what was computed is worse than a failed request.
#[derive(Debug, Error)]
pub enum FeedError {
    /// A cached payload could not be decoded.
    #[error("malformed cache payload under `{key}`: {message}")]
    CacheDecode { key: String, message: String },
    /// Transport failure talking to the cache.
    #[error(transparent)]
    Cache(#[from] CacheError),
    /// Relational query failure.
    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl FeedError {
    pub fn cache_decode(key: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::CacheDecode {
            key: key.into(),
            message: message.to_string(),
        }
    }
}
