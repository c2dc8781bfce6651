use async_trait::async_trait;
use sqlx::QueryBuilder;
use time::OffsetDateTime;

use crate::application::repos::{CommentsRepo, RepoError};
use crate::domain::entities::{AuthorRecord, CommentRecord};

use super::PostgresRepositories;
use super::util::map_sqlx_error;

/// Joined comments/users row, flattened the way the store returns it.
#[derive(sqlx::FromRow)]
struct CommentRow {
    c_id: i64,
    post_id: i64,
    user_id: i64,
    body: String,
    c_created_at: OffsetDateTime,
    u_id: i64,
    account_name: String,
    authority: bool,
    deleted: bool,
    u_created_at: OffsetDateTime,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        CommentRecord {
            id: row.c_id,
            post_id: row.post_id,
            user_id: row.user_id,
            body: row.body,
            created_at: row.c_created_at,
            author: AuthorRecord {
                id: row.u_id,
                account_name: row.account_name,
                authority: row.authority,
                deleted: row.deleted,
                created_at: row.u_created_at,
            },
        }
    }
}

#[async_trait]
impl CommentsRepo for PostgresRepositories {
    async fn count_for_post(&self, post_id: i64) -> Result<i64, RepoError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = $1")
                .bind(post_id)
                .fetch_one(self.pool())
                .await
                .map_err(map_sqlx_error)?;
        Ok(count)
    }

    async fn list_for_post(
        &self,
        post_id: i64,
        limit: Option<u32>,
    ) -> Result<Vec<CommentRecord>, RepoError> {
        let mut qb = QueryBuilder::new(
            "SELECT c.id AS c_id, c.post_id, c.user_id, c.body, \
             c.created_at AS c_created_at, \
             u.id AS u_id, u.account_name, u.authority, u.deleted, \
             u.created_at AS u_created_at \
             FROM comments c JOIN users u ON c.user_id = u.id \
             WHERE c.post_id = ",
        );
        qb.push_bind(post_id);
        qb.push(" ORDER BY c.created_at DESC");
        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(limit));
        }

        let rows = qb
            .build_query_as::<CommentRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CommentRecord::from).collect())
    }
}
