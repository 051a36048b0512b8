//! In-memory product store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use siphon_core::Product;

use super::{ProductStore, ProductStoreError};

/// In-memory product store.
///
/// Intended for tests/dev. Upserts by `(id, batch_id)` like the Postgres
/// store, so replaying a batch leaves one row per product id.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    rows: RwLock<HashMap<(i64, String), Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows belonging to one batch, ordered by product id.
    pub fn batch(&self, batch_id: &str) -> Vec<Product> {
        let rows = self.rows.read().expect("lock poisoned");
        let mut products: Vec<Product> = rows
            .values()
            .filter(|p| p.batch_id == batch_id)
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn upsert_batch(&self, products: &[Product]) -> Result<(), ProductStoreError> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| ProductStoreError::Database("lock poisoned".to_string()))?;
        for product in products {
            rows.insert((product.id, product.batch_id.clone()), product.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use siphon_core::{ObjectKey, Record, transform_batch};

    #[tokio::test]
    async fn replaying_a_batch_overwrites_instead_of_duplicating() {
        let store = InMemoryProductStore::new();
        let batch = ObjectKey::at(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let products = transform_batch(&[Record::new(1, "Apple", 100)], &batch);

        store.upsert_batch(&products).await.unwrap();
        store.upsert_batch(&products).await.unwrap();

        let rows = store.batch(batch.as_str());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 110);
    }

    #[tokio::test]
    async fn batches_are_isolated_by_key() {
        let store = InMemoryProductStore::new();
        let first = ObjectKey::at(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let second = ObjectKey::at(DateTime::from_timestamp(1_700_000_001, 0).unwrap());

        let records = vec![Record::new(1, "Apple", 100)];
        store
            .upsert_batch(&transform_batch(&records, &first))
            .await
            .unwrap();
        store
            .upsert_batch(&transform_batch(&records, &second))
            .await
            .unwrap();

        assert_eq!(store.batch(first.as_str()).len(), 1);
        assert_eq!(store.batch(second.as_str()).len(), 1);
    }
}
