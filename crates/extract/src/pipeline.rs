//! The extract pipeline: bucket → upload → queue → notification.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use siphon_core::{Notification, ObjectKey, Record, encode_payload};
use siphon_infra::{MessageQueue, ObjectStore, QueueError, QueueUrl, StorageError, retry};

use crate::config::ExtractConfig;

/// Failure of the extract run.
///
/// There is no compensation across steps: a queue failure after a successful
/// upload leaves the uploaded object in place with no notification.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("payload encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractReport {
    pub bucket: String,
    pub key: ObjectKey,
    pub queue_url: QueueUrl,
}

/// One-shot extract run over an object store and a message queue.
///
/// Strictly linear: the notification only ever references a key whose upload
/// was acknowledged, because the key reaches the publish step through the
/// successful upload and nothing else.
pub struct ExtractPipeline<'a, S, Q> {
    config: &'a ExtractConfig,
    store: &'a S,
    queue: &'a Q,
}

impl<'a, S, Q> ExtractPipeline<'a, S, Q>
where
    S: ObjectStore,
    Q: MessageQueue,
{
    pub fn new(config: &'a ExtractConfig, store: &'a S, queue: &'a Q) -> Self {
        Self {
            config,
            store,
            queue,
        }
    }

    /// Run all steps in order, returning what was provisioned and uploaded.
    pub async fn run(&self, records: &[Record]) -> Result<ExtractReport, ExtractError> {
        self.ensure_bucket().await?;
        let key = self.upload(records).await?;
        let queue_url = self.publish(&key).await?;
        Ok(ExtractReport {
            bucket: self.config.bucket.clone(),
            key,
            queue_url,
        })
    }

    /// Create the bucket, treating "already there" as success.
    ///
    /// The retry executor treats a conflict like any other failure, so an
    /// existing bucket surfaces here only after the budget is spent; the
    /// classification happens on the final error, not inside the executor.
    async fn ensure_bucket(&self) -> Result<(), ExtractError> {
        let bucket = &self.config.bucket;
        match retry(&self.config.retry, || self.store.create_bucket(bucket)).await {
            Ok(()) => {
                info!(bucket = %bucket, "bucket created");
                Ok(())
            }
            Err(err) if err.is_bucket_conflict() => {
                info!(bucket = %bucket, "bucket already exists, continuing");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Serialize the payload and upload it under a fresh time-based key.
    async fn upload(&self, records: &[Record]) -> Result<ObjectKey, ExtractError> {
        let bucket = &self.config.bucket;
        let key = ObjectKey::now();
        let body = encode_payload(records)?;
        retry(&self.config.retry, || {
            self.store.put_object(bucket, &key, body.clone())
        })
        .await?;
        info!(bucket = %bucket, key = %key, records = records.len(), "payload uploaded");
        Ok(key)
    }

    /// Provision the queue (idempotent by name) and publish the notification.
    async fn publish(&self, key: &ObjectKey) -> Result<QueueUrl, ExtractError> {
        let queue_url = retry(&self.config.retry, || {
            self.queue.create_queue(&self.config.queue)
        })
        .await?;
        let body = Notification::new(&self.config.bucket, key).encode()?;
        retry(&self.config.retry, || {
            self.queue.send_message(&queue_url, body.clone())
        })
        .await?;
        info!(queue_url = %queue_url, key = %key, "notification published");
        Ok(queue_url)
    }
}
