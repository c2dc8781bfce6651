//! Cache-aside hydration of a post's comment list.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::application::error::FeedError;
use crate::application::repos::CommentsRepo;
use crate::cache::{CacheClient, comment_list_key};
use crate::domain::entities::CommentRecord;

/// Comments shown per post on feed views; detail views request the full list.
pub const TRUNCATED_COMMENT_LIMIT: u32 = 3;

/// Hydrates the ordered comment list for a single post, cache first.
pub struct CommentHydrator {
    cache: Arc<dyn CacheClient>,
    comments: Arc<dyn CommentsRepo>,
    ttl: Duration,
}

impl CommentHydrator {
    pub fn new(
        cache: Arc<dyn CacheClient>,
        comments: Arc<dyn CommentsRepo>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            comments,
            ttl,
        }
    }

    /// Chronologically ordered (oldest-first) comments for one post, each
    /// carrying its embedded author snapshot.
    ///
    /// The cached payload is the newest-first JSON list, written back on a
    /// miss in both modes. A full-mode result therefore lands under the same
    /// key a later truncated-mode read consults, and that read can observe
    /// more than [`TRUNCATED_COMMENT_LIMIT`] comments until the entry
    /// expires. Known cross-mode interaction; callers must not re-truncate.
    pub async fn hydrate(&self, post_id: i64, full: bool) -> Result<Vec<CommentRecord>, FeedError> {
        let key = comment_list_key(post_id);

        let mut comments = match self.cache.get(&key).await? {
            Some(payload) => {
                metrics::counter!("attimo_comment_list_cache_hit_total").increment(1);
                serde_json::from_slice::<Vec<CommentRecord>>(&payload)
                    .map_err(|err| FeedError::cache_decode(key.clone(), err))?
            }
            None => {
                metrics::counter!("attimo_comment_list_cache_miss_total").increment(1);
                debug!(post_id, full, "comment list cache miss, querying store");
                let limit = (!full).then_some(TRUNCATED_COMMENT_LIMIT);
                let fetched = self.comments.list_for_post(post_id, limit).await?;
                let payload = serde_json::to_vec(&fetched)
                    .map_err(|err| FeedError::cache_decode(key.clone(), err))?;
                self.cache.set(&key, Bytes::from(payload), self.ttl).await?;
                fetched
            }
        };

        // Stored newest-first, presented oldest-first, wherever it came from.
        comments.reverse();
        Ok(comments)
    }
}
