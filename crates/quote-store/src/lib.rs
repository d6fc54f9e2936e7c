//! quote-store — persistence for quotations.
//!
//! Defines the [`Quote`] domain type and the [`QuoteStore`] trait with the
//! two read-only queries the service needs, plus two adapters:
//!
//! - [`MysqlQuoteStore`] — sqlx/MySQL, the production backend
//! - [`MemoryQuoteStore`] — in-memory map for tests and local runs

pub mod error;
pub mod memory;
pub mod mysql;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryQuoteStore;
pub use mysql::MysqlQuoteStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A quotation attributed to an author owned by the remote author service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quote {
    pub id: i64,
    pub message: String,
    pub author_id: i64,
}

/// Read-only access to the quote table.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    /// Fetch a quote by primary key.
    async fn quote_by_id(&self, id: i64) -> StoreResult<Quote>;

    /// Fetch a uniformly random quote.
    async fn random_quote(&self) -> StoreResult<Quote>;
}
