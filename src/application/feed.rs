//! Feed assembly: counts plus hydrated comments over an ordered post batch.

use std::sync::Arc;
use std::time::Duration;

use crate::application::comments::CommentHydrator;
use crate::application::counts::CommentCountResolver;
use crate::application::error::FeedError;
use crate::application::repos::CommentsRepo;
use crate::cache::CacheClient;
use crate::domain::entities::{FeedEntry, PostRecord};

/// The boundary the serving layer calls: turns raw post rows into fully
/// hydrated feed entries, preserving input order.
pub struct FeedAssembler {
    counts: CommentCountResolver,
    hydrator: CommentHydrator,
}

impl FeedAssembler {
    pub fn new(
        cache: Arc<dyn CacheClient>,
        comments: Arc<dyn CommentsRepo>,
        ttl: Duration,
    ) -> Self {
        Self {
            counts: CommentCountResolver::new(cache.clone(), comments.clone(), ttl),
            hydrator: CommentHydrator::new(cache, comments, ttl),
        }
    }

    /// Assemble hydrated entries for `posts`, echoing `csrf_token` onto each.
    ///
    /// Counts resolve once for the whole batch through a single multi-key
    /// cache read. Comment lists hydrate per post, sequentially and in input
    /// order, which keeps cache population ordering predictable; output order
    /// mirrors input order. The first error from either stage aborts the
    /// batch and no partial feed is returned.
    pub async fn assemble(
        &self,
        posts: Vec<PostRecord>,
        csrf_token: &str,
        full: bool,
    ) -> Result<Vec<FeedEntry>, FeedError> {
        let post_ids: Vec<i64> = posts.iter().map(|post| post.id).collect();
        let counts = self.counts.resolve(&post_ids).await?;

        let mut entries = Vec::with_capacity(posts.len());
        for post in posts {
            let comments = self.hydrator.hydrate(post.id, full).await?;
            let comment_count = counts.get(&post.id).copied().unwrap_or_default();
            entries.push(FeedEntry {
                id: post.id,
                user_id: post.user_id,
                body: post.body,
                mime: post.mime,
                created_at: post.created_at,
                account_name: post.account_name,
                comment_count,
                comments,
                csrf_token: csrf_token.to_string(),
            });
        }

        Ok(entries)
    }
}
