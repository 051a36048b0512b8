//! In-memory object store.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use siphon_core::ObjectKey;

use super::{ObjectStore, StorageError};

/// In-memory object store.
///
/// Intended for tests/dev. Mirrors the service's conflict behavior: creating
/// a bucket that this store already holds yields `BucketAlreadyOwnedByYou`
/// (same-owner semantics).
#[derive(Debug, Default)]
pub struct InMemoryObjectStore {
    inner: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    buckets: HashSet<String>,
    objects: HashMap<(String, String), Vec<u8>>,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store with `bucket` pre-provisioned.
    pub fn with_bucket(bucket: &str) -> Self {
        let store = Self::new();
        store
            .inner
            .write()
            .expect("lock poisoned")
            .buckets
            .insert(bucket.to_string());
        store
    }

    pub fn bucket_exists(&self, bucket: &str) -> bool {
        self.inner
            .read()
            .expect("lock poisoned")
            .buckets
            .contains(bucket)
    }

    /// Uploaded body, if any.
    pub fn object(&self, bucket: &str, key: &ObjectKey) -> Option<Vec<u8>> {
        self.inner
            .read()
            .expect("lock poisoned")
            .objects
            .get(&(bucket.to_string(), key.as_str().to_string()))
            .cloned()
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| StorageError::Service("lock poisoned".to_string()))?;
        if !state.buckets.insert(bucket.to_string()) {
            return Err(StorageError::BucketAlreadyOwnedByYou(bucket.to_string()));
        }
        Ok(())
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &ObjectKey,
        body: Vec<u8>,
    ) -> Result<(), StorageError> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| StorageError::Service("lock poisoned".to_string()))?;
        if !state.buckets.contains(bucket) {
            return Err(StorageError::Service(format!("no such bucket: {bucket}")));
        }
        state
            .objects
            .insert((bucket.to_string(), key.as_str().to_string()), body);
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        self.inner
            .read()
            .map_err(|_| StorageError::Service("lock poisoned".to_string()))?
            .objects
            .get(&(bucket.to_string(), key.as_str().to_string()))
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn second_create_reports_owned_conflict() {
        let store = InMemoryObjectStore::new();
        store.create_bucket("etl-bucket").await.unwrap();
        assert_eq!(
            store.create_bucket("etl-bucket").await,
            Err(StorageError::BucketAlreadyOwnedByYou("etl-bucket".into()))
        );
    }

    #[tokio::test]
    async fn put_requires_an_existing_bucket() {
        let store = InMemoryObjectStore::new();
        let key = ObjectKey::now();
        let err = store
            .put_object("missing", &key, b"[]".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Service(_)));

        store.create_bucket("etl-bucket").await.unwrap();
        store
            .put_object("etl-bucket", &key, b"[]".to_vec())
            .await
            .unwrap();
        assert_eq!(store.object("etl-bucket", &key), Some(b"[]".to_vec()));
    }

    #[tokio::test]
    async fn get_round_trips_and_reports_missing_keys() {
        let store = InMemoryObjectStore::with_bucket("etl-bucket");
        let key = ObjectKey::now();
        assert_eq!(
            store.get_object("etl-bucket", &key).await,
            Err(StorageError::ObjectNotFound(key.to_string()))
        );

        store
            .put_object("etl-bucket", &key, b"[1]".to_vec())
            .await
            .unwrap();
        assert_eq!(
            store.get_object("etl-bucket", &key).await,
            Ok(b"[1]".to_vec())
        );
    }
}
