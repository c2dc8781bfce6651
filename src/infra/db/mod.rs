//! Postgres-backed repository implementations.

mod comments;
mod posts;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::infra::error::InfraError;

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open the shared connection pool. One pool per process; request
    /// handlers clone the repository handle instead of opening connections.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, InfraError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|err| InfraError::database(err.to_string()))?;
        Ok(Self::new(pool))
    }

    pub async fn run_migrations(&self) -> Result<(), InfraError> {
        sqlx::migrate!("./migrations")
            .run(self.pool())
            .await
            .map_err(|err| InfraError::database(err.to_string()))
    }
}
