use async_trait::async_trait;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::entities::PostRecord;

use super::PostgresRepositories;
use super::util::map_sqlx_error;

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_recent(&self, limit: u32) -> Result<Vec<PostRecord>, RepoError> {
        let posts = sqlx::query_as::<_, PostRecord>(
            "SELECT p.id, p.user_id, p.body, p.mime, p.created_at, u.account_name \
             FROM posts p JOIN users u ON p.user_id = u.id \
             WHERE u.deleted = FALSE \
             ORDER BY p.created_at DESC LIMIT $1",
        )
        .bind(i64::from(limit))
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;
        Ok(posts)
    }
}
