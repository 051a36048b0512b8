//! Postgres-backed product store.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use siphon_core::Product;

use super::{ProductStore, ProductStoreError};

/// Product store backed by PostgreSQL.
///
/// Upserts against the composite primary key `(id, batch_id)`; the SQLx pool
/// handles thread-safe connection management.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to the database at `url`.
    ///
    /// Fails while the database is still starting up; callers run this
    /// through the retry executor.
    pub async fn connect(url: &str) -> Result<Self, ProductStoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(url)
            .await
            .map_err(|e| ProductStoreError::Database(e.to_string()))?;
        Ok(Self::new(pool))
    }

    /// Create the products table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), ProductStoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id       BIGINT NOT NULL,
                name     TEXT   NOT NULL,
                price    BIGINT NOT NULL,
                batch_id TEXT   NOT NULL,
                PRIMARY KEY (id, batch_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| ProductStoreError::Database(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn upsert_batch(&self, products: &[Product]) -> Result<(), ProductStoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| ProductStoreError::Database(e.to_string()))?;

        for product in products {
            sqlx::query(
                r#"
                INSERT INTO products (id, name, price, batch_id)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (id, batch_id) DO UPDATE
                SET name = EXCLUDED.name, price = EXCLUDED.price
                "#,
            )
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price)
            .bind(&product.batch_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| ProductStoreError::Database(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| ProductStoreError::Database(e.to_string()))
    }
}
