//! Message queue port.

pub mod in_memory;
pub mod sqs;

pub use in_memory::InMemoryMessageQueue;
pub use sqs::SqsMessageQueue;

use core::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque handle to a provisioned queue, as returned by the queue service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueUrl(String);

impl QueueUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueueUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Token identifying one received delivery; required to delete the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReceiptHandle(String);

impl ReceiptHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One delivery pulled off a queue.
///
/// The message stays on the queue until it is deleted via its receipt; a
/// consumer that fails mid-processing sees it again (at-least-once).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub body: String,
    pub receipt: ReceiptHandle,
}

/// Queue-side failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    /// No queue behind the given name or handle.
    #[error("queue not found: {0}")]
    NotFound(String),

    /// Any other service or transport failure.
    #[error("queue service error: {0}")]
    Service(String),
}

/// Message queue operations consumed by the ETL steps.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Create the named queue, or fetch it if it already exists. Idempotent
    /// by name; returns the queue's handle either way.
    async fn create_queue(&self, name: &str) -> Result<QueueUrl, QueueError>;

    /// Resolve the handle of an existing queue; `NotFound` until someone has
    /// created it.
    async fn get_queue_url(&self, name: &str) -> Result<QueueUrl, QueueError>;

    /// Publish `body` to the queue behind `url`.
    async fn send_message(&self, url: &QueueUrl, body: String) -> Result<(), QueueError>;

    /// Receive at most one message, waiting up to `wait` for one to arrive.
    async fn receive_message(
        &self,
        url: &QueueUrl,
        wait: Duration,
    ) -> Result<Option<ReceivedMessage>, QueueError>;

    /// Delete a received message so it is not delivered again.
    async fn delete_message(&self, url: &QueueUrl, receipt: &ReceiptHandle)
    -> Result<(), QueueError>;
}
