//! Product persistence port.

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

use async_trait::async_trait;
use thiserror::Error;

use siphon_core::Product;

/// Persistence-side failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProductStoreError {
    #[error("database error: {0}")]
    Database(String),
}

/// Product persistence consumed by the transform worker.
///
/// Rows are keyed by `(id, batch_id)`: each batch accumulates its own
/// history, and replaying the same batch overwrites in place rather than
/// duplicating — the worker relies on this for at-least-once delivery.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert or update every product of one batch.
    async fn upsert_batch(&self, products: &[Product]) -> Result<(), ProductStoreError>;
}
