//! S3-backed object store.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;

use siphon_core::ObjectKey;

use super::{ObjectStore, StorageError};

/// Object store backed by aws-sdk-s3.
///
/// The client is expected to be configured for the target endpoint with
/// path-style addressing (see [`crate::aws::AwsClients`]).
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
}

impl S3ObjectStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn create_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.client
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_bucket_already_owned_by_you() => {
                    StorageError::BucketAlreadyOwnedByYou(bucket.to_string())
                }
                Some(e) if e.is_bucket_already_exists() => {
                    StorageError::BucketAlreadyExists(bucket.to_string())
                }
                _ => StorageError::Service(DisplayErrorContext(&err).to_string()),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &ObjectKey,
        body: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key.as_str())
            .body(body.into())
            .send()
            .await
            .map(|_| ())
            .map_err(|err| StorageError::Service(DisplayErrorContext(&err).to_string()))
    }

    async fn get_object(&self, bucket: &str, key: &ObjectKey) -> Result<Vec<u8>, StorageError> {
        let out = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key.as_str())
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_no_such_key() => StorageError::ObjectNotFound(key.to_string()),
                _ => StorageError::Service(DisplayErrorContext(&err).to_string()),
            })?;
        out.body
            .collect()
            .await
            .map(|data| data.into_bytes().to_vec())
            .map_err(|err| StorageError::Service(err.to_string()))
    }
}
