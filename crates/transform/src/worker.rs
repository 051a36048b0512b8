//! The transform/load worker: receive → fetch → transform → upsert → delete.

use thiserror::Error;
use tracing::{info, warn};

use siphon_core::{KeyError, Notification, ObjectKey, Record, transform_batch};
use siphon_infra::{
    MessageQueue, ObjectStore, ProductStore, ProductStoreError, QueueError, QueueUrl,
    StorageError, retry,
};

use crate::config::TransformConfig;

/// Failure while processing one message.
///
/// The worker logs these and keeps polling; the message stays on the queue
/// and is delivered again (at-least-once, the upsert makes replays safe).
#[derive(Debug, Error)]
pub enum TransformError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Store(#[from] ProductStoreError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("payload decoding failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Long-polling transform/load worker over a queue, an object store and a
/// product store.
pub struct TransformWorker<'a, Q, S, P> {
    config: &'a TransformConfig,
    queue: &'a Q,
    store: &'a S,
    products: &'a P,
}

impl<'a, Q, S, P> TransformWorker<'a, Q, S, P>
where
    Q: MessageQueue,
    S: ObjectStore,
    P: ProductStore,
{
    pub fn new(config: &'a TransformConfig, queue: &'a Q, store: &'a S, products: &'a P) -> Self {
        Self {
            config,
            queue,
            store,
            products,
        }
    }

    /// Resolve the queue handle, waiting for the extract side to provision
    /// it. The worker never creates the queue itself.
    pub async fn wait_for_queue(&self) -> Result<QueueUrl, TransformError> {
        let url = retry(&self.config.startup, || {
            self.queue.get_queue_url(&self.config.queue)
        })
        .await?;
        Ok(url)
    }

    /// Receive and process at most one message.
    ///
    /// Returns `Ok(true)` when a message was handled and deleted, `Ok(false)`
    /// when the queue was empty. On error the message is left on the queue.
    pub async fn process_next(&self, url: &QueueUrl) -> Result<bool, TransformError> {
        let Some(message) = self
            .queue
            .receive_message(url, self.config.receive_wait)
            .await?
        else {
            return Ok(false);
        };

        let notification: Notification = serde_json::from_str(&message.body)?;
        let batch: ObjectKey = notification.key.parse()?;
        let raw = self.store.get_object(&notification.bucket, &batch).await?;
        let records: Vec<Record> = serde_json::from_slice(&raw)?;

        let products = transform_batch(&records, &batch);
        self.products.upsert_batch(&products).await?;

        // Only a fully loaded batch takes its message off the queue.
        self.queue.delete_message(url, &message.receipt).await?;
        info!(batch = %batch, rows = products.len(), "batch loaded");
        Ok(true)
    }

    /// Poll forever, backing off briefly on an empty queue or a failure.
    pub async fn run(&self) -> Result<(), TransformError> {
        let url = self.wait_for_queue().await?;
        info!(queue_url = %url, "worker started, polling");
        loop {
            match self.process_next(&url).await {
                Ok(true) => {}
                Ok(false) => tokio::time::sleep(self.config.idle_backoff).await,
                Err(err) => {
                    warn!(error = %err, "message processing failed, backing off");
                    tokio::time::sleep(self.config.error_backoff).await;
                }
            }
        }
    }
}
