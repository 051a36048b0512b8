//! Object storage port.
//!
//! The trait is the seam: the pipeline talks to [`ObjectStore`], and the
//! backend is either the real S3 client or the in-memory store used in
//! tests and local development.

pub mod in_memory;
pub mod s3;

pub use in_memory::InMemoryObjectStore;
pub use s3::S3ObjectStore;

use async_trait::async_trait;
use thiserror::Error;

use siphon_core::ObjectKey;

/// Storage-side failure, classified where the service gives us enough to
/// classify.
///
/// The two bucket-conflict variants are the named error codes the service
/// returns for "create on an existing bucket"; everything else collapses
/// into [`StorageError::Service`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The bucket exists and is owned by the caller.
    #[error("bucket '{0}' already owned by caller")]
    BucketAlreadyOwnedByYou(String),

    /// The bucket exists under another owner.
    #[error("bucket '{0}' already exists")]
    BucketAlreadyExists(String),

    /// No object under the requested key.
    #[error("no such key: {0}")]
    ObjectNotFound(String),

    /// Any other service or transport failure.
    #[error("storage service error: {0}")]
    Service(String),
}

impl StorageError {
    /// True for exactly the two recognized bucket-conflict codes.
    pub fn is_bucket_conflict(&self) -> bool {
        matches!(
            self,
            Self::BucketAlreadyOwnedByYou(_) | Self::BucketAlreadyExists(_)
        )
    }
}

/// Object storage operations consumed by the extract pipeline.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Create the named bucket. Not idempotent: creating an existing bucket
    /// yields one of the conflict variants.
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// Upload `body` under `key`. An existing object under the same key is
    /// overwritten.
    async fn put_object(&self, bucket: &str, key: &ObjectKey, body: Vec<u8>)
    -> Result<(), StorageError>;

    /// Download the object under `key`; `ObjectNotFound` if there is none.
    async fn get_object(&self, bucket: &str, key: &ObjectKey) -> Result<Vec<u8>, StorageError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_classification_covers_exactly_two_codes() {
        assert!(StorageError::BucketAlreadyOwnedByYou("b".into()).is_bucket_conflict());
        assert!(StorageError::BucketAlreadyExists("b".into()).is_bucket_conflict());
        assert!(!StorageError::Service("access denied".into()).is_bucket_conflict());
        assert!(!StorageError::ObjectNotFound("data-0.json".into()).is_bucket_conflict());
    }
}
