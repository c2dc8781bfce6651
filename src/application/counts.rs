//! Batched cache-aside resolution of per-post comment counts.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tracing::debug;

use crate::application::error::FeedError;
use crate::application::repos::CommentsRepo;
use crate::cache::{CacheClient, comment_count_key};

/// Resolves comment counts for a batch of posts, cache first.
///
/// One multi-key cache round trip covers the whole batch; only the misses
/// fall through to a per-post aggregate query, and each store-resolved value
/// is written back immediately under the same key with the standard TTL.
pub struct CommentCountResolver {
    cache: Arc<dyn CacheClient>,
    comments: Arc<dyn CommentsRepo>,
    ttl: Duration,
}

impl CommentCountResolver {
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

    /// Map each post identifier to its non-negative comment count.
    ///
    /// The first cache or store error fails the whole batch; no partial
    /// mapping is ever returned.
    pub async fn resolve(&self, post_ids: &[i64]) -> Result<HashMap<i64, i64>, FeedError> {
        let keys: Vec<String> = post_ids.iter().map(|id| comment_count_key(*id)).collect();
        let cached = self.cache.get_multi(&keys).await?;

        let mut counts = HashMap::with_capacity(post_ids.len());
        for (post_id, key) in post_ids.iter().copied().zip(&keys) {
            if let Some(payload) = cached.get(key) {
                metrics::counter!("attimo_comment_count_cache_hit_total").increment(1);
                counts.insert(post_id, decode_count(key, payload)?);
                continue;
            }

            metrics::counter!("attimo_comment_count_cache_miss_total").increment(1);
            debug!(post_id, "comment count cache miss, querying store");
            let count = self.comments.count_for_post(post_id).await?;
            self.cache
                .set(key, Bytes::from(count.to_string()), self.ttl)
                .await?;
            counts.insert(post_id, count);
        }

        Ok(counts)
    }
}

fn decode_count(key: &str, payload: &[u8]) -> Result<i64, FeedError> {
    let text =
        std::str::from_utf8(payload).map_err(|err| FeedError::cache_decode(key, err))?;
    text.parse::<i64>()
        .map_err(|err| FeedError::cache_decode(key, err))
}
