use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use crate::errors::RepoError;
use crate::repository::Repositories;

/// Owned database handle. Acquire once, pass it down, close it on the way out.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, RepoError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connected to database");
        Ok(Self::new(pool))
    }

    /// PostgreSQL-backed repositories sharing this handle's pool.
    pub fn repositories(&self) -> Repositories {
        Repositories::postgres(&self.pool)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for open connections to be returned, then closes the pool.
    pub async fn close(self) {
        self.pool.close().await;
        info!("Database connection closed");
    }
}
