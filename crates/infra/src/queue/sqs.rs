//! SQS-backed message queue.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;

use super::{MessageQueue, QueueError, QueueUrl, ReceiptHandle, ReceivedMessage};

/// How long a received message stays invisible to other consumers.
const VISIBILITY_TIMEOUT_SECS: i32 = 30;

/// Message queue backed by aws-sdk-sqs.
#[derive(Debug, Clone)]
pub struct SqsMessageQueue {
    client: Client,
}

impl SqsMessageQueue {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MessageQueue for SqsMessageQueue {
    async fn create_queue(&self, name: &str) -> Result<QueueUrl, QueueError> {
        let out = self
            .client
            .create_queue()
            .queue_name(name)
            .send()
            .await
            .map_err(|err| QueueError::Service(DisplayErrorContext(&err).to_string()))?;
        // CreateQueue returns the URL of the (possibly pre-existing) queue.
        out.queue_url()
            .map(QueueUrl::new)
            .ok_or_else(|| QueueError::Service(format!("no queue url returned for '{name}'")))
    }

    async fn get_queue_url(&self, name: &str) -> Result<QueueUrl, QueueError> {
        let out = self
            .client
            .get_queue_url()
            .queue_name(name)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_queue_does_not_exist() => QueueError::NotFound(name.to_string()),
                _ => QueueError::Service(DisplayErrorContext(&err).to_string()),
            })?;
        out.queue_url()
            .map(QueueUrl::new)
            .ok_or_else(|| QueueError::Service(format!("no queue url returned for '{name}'")))
    }

    async fn send_message(&self, url: &QueueUrl, body: String) -> Result<(), QueueError> {
        self.client
            .send_message()
            .queue_url(url.as_str())
            .message_body(body)
            .send()
            .await
            .map(|_| ())
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_queue_does_not_exist() => QueueError::NotFound(url.to_string()),
                _ => QueueError::Service(DisplayErrorContext(&err).to_string()),
            })
    }

    async fn receive_message(
        &self,
        url: &QueueUrl,
        wait: Duration,
    ) -> Result<Option<ReceivedMessage>, QueueError> {
        let out = self
            .client
            .receive_message()
            .queue_url(url.as_str())
            .max_number_of_messages(1)
            .wait_time_seconds(wait.as_secs().min(20) as i32)
            .visibility_timeout(VISIBILITY_TIMEOUT_SECS)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_queue_does_not_exist() => QueueError::NotFound(url.to_string()),
                _ => QueueError::Service(DisplayErrorContext(&err).to_string()),
            })?;

        let Some(message) = out.messages().first() else {
            return Ok(None);
        };
        let body = message
            .body()
            .ok_or_else(|| QueueError::Service("message without body".to_string()))?;
        let receipt = message
            .receipt_handle()
            .ok_or_else(|| QueueError::Service("message without receipt handle".to_string()))?;
        Ok(Some(ReceivedMessage {
            body: body.to_string(),
            receipt: ReceiptHandle::new(receipt),
        }))
    }

    async fn delete_message(
        &self,
        url: &QueueUrl,
        receipt: &ReceiptHandle,
    ) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(url.as_str())
            .receipt_handle(receipt.as_str())
            .send()
            .await
            .map(|_| ())
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_queue_does_not_exist() => QueueError::NotFound(url.to_string()),
                _ => QueueError::Service(DisplayErrorContext(&err).to_string()),
            })
    }
}
