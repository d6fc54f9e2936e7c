//! MySQL-backed quote store.
//!
//! Pool sizing matches the deployed service: at most 10 open connections,
//! each recycled after 3 minutes.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::{Quote, QuoteStore};

const MAX_CONNECTIONS: u32 = 10;
const CONN_MAX_LIFETIME: Duration = Duration::from_secs(3 * 60);

/// Quote store backed by a MySQL connection pool.
pub struct MysqlQuoteStore {
    pool: MySqlPool,
}

impl MysqlQuoteStore {
    /// Connect to MySQL and configure the connection pool.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .max_lifetime(CONN_MAX_LIFETIME)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create the quotes table if it does not exist.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS quotes (
                id BIGINT AUTO_INCREMENT PRIMARY KEY,
                message TEXT NOT NULL,
                author_id BIGINT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        info!("quotes schema ensured");
        Ok(())
    }
}

#[async_trait]
impl QuoteStore for MysqlQuoteStore {
    async fn quote_by_id(&self, id: i64) -> StoreResult<Quote> {
        sqlx::query_as::<_, Quote>("SELECT id, message, author_id FROM quotes WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn random_quote(&self) -> StoreResult<Quote> {
        sqlx::query_as::<_, Quote>(
            "SELECT id, message, author_id FROM quotes ORDER BY RAND() LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)
    }
}
