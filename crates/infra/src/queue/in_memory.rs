//! In-memory message queue.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;

use super::{MessageQueue, QueueError, QueueUrl, ReceiptHandle, ReceivedMessage};

/// In-memory message queue.
///
/// Intended for tests/dev. `create_queue` is idempotent by name, and sent
/// bodies are kept in publish order so tests can inspect them. Receiving
/// does not remove a message; it stays queued until deleted by receipt, so
/// a consumer that fails sees the same message again.
#[derive(Debug, Default)]
pub struct InMemoryMessageQueue {
    queues: RwLock<HashMap<String, QueueState>>,
}

#[derive(Debug, Default)]
struct QueueState {
    next_id: u64,
    messages: VecDeque<(u64, String)>,
}

impl InMemoryMessageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn url_for(name: &str) -> QueueUrl {
        QueueUrl::new(format!("mem://queue/{name}"))
    }

    /// Bodies still queued under the named queue, in publish order.
    pub fn messages(&self, name: &str) -> Vec<String> {
        self.queues
            .read()
            .expect("lock poisoned")
            .get(Self::url_for(name).as_str())
            .map(|state| state.messages.iter().map(|(_, body)| body.clone()).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageQueue for InMemoryMessageQueue {
    async fn create_queue(&self, name: &str) -> Result<QueueUrl, QueueError> {
        let url = Self::url_for(name);
        let mut queues = self
            .queues
            .write()
            .map_err(|_| QueueError::Service("lock poisoned".to_string()))?;
        queues.entry(url.as_str().to_string()).or_default();
        Ok(url)
    }

    async fn get_queue_url(&self, name: &str) -> Result<QueueUrl, QueueError> {
        let url = Self::url_for(name);
        let queues = self
            .queues
            .read()
            .map_err(|_| QueueError::Service("lock poisoned".to_string()))?;
        if queues.contains_key(url.as_str()) {
            Ok(url)
        } else {
            Err(QueueError::NotFound(name.to_string()))
        }
    }

    async fn send_message(&self, url: &QueueUrl, body: String) -> Result<(), QueueError> {
        let mut queues = self
            .queues
            .write()
            .map_err(|_| QueueError::Service("lock poisoned".to_string()))?;
        match queues.get_mut(url.as_str()) {
            Some(state) => {
                let id = state.next_id;
                state.next_id += 1;
                state.messages.push_back((id, body));
                Ok(())
            }
            None => Err(QueueError::NotFound(url.to_string())),
        }
    }

    async fn receive_message(
        &self,
        url: &QueueUrl,
        _wait: Duration,
    ) -> Result<Option<ReceivedMessage>, QueueError> {
        let queues = self
            .queues
            .read()
            .map_err(|_| QueueError::Service("lock poisoned".to_string()))?;
        match queues.get(url.as_str()) {
            Some(state) => Ok(state.messages.front().map(|(id, body)| ReceivedMessage {
                body: body.clone(),
                receipt: ReceiptHandle::new(id.to_string()),
            })),
            None => Err(QueueError::NotFound(url.to_string())),
        }
    }

    async fn delete_message(
        &self,
        url: &QueueUrl,
        receipt: &ReceiptHandle,
    ) -> Result<(), QueueError> {
        let mut queues = self
            .queues
            .write()
            .map_err(|_| QueueError::Service("lock poisoned".to_string()))?;
        match queues.get_mut(url.as_str()) {
            Some(state) => {
                state.messages.retain(|(id, _)| id.to_string() != receipt.as_str());
                Ok(())
            }
            None => Err(QueueError::NotFound(url.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_is_idempotent_and_returns_the_same_handle() {
        let queue = InMemoryMessageQueue::new();
        let first = queue.create_queue("etl-queue").await.unwrap();
        queue.send_message(&first, "one".to_string()).await.unwrap();

        let second = queue.create_queue("etl-queue").await.unwrap();
        assert_eq!(first, second);
        // Re-creating does not drop queued messages.
        assert_eq!(queue.messages("etl-queue"), vec!["one".to_string()]);
    }

    #[tokio::test]
    async fn send_to_unknown_handle_is_not_found() {
        let queue = InMemoryMessageQueue::new();
        let stale = QueueUrl::new("mem://queue/missing");
        assert_eq!(
            queue.send_message(&stale, "x".to_string()).await,
            Err(QueueError::NotFound(stale.to_string()))
        );
    }

    #[tokio::test]
    async fn url_lookup_requires_a_provisioned_queue() {
        let queue = InMemoryMessageQueue::new();
        assert_eq!(
            queue.get_queue_url("etl-queue").await,
            Err(QueueError::NotFound("etl-queue".to_string()))
        );

        let created = queue.create_queue("etl-queue").await.unwrap();
        assert_eq!(queue.get_queue_url("etl-queue").await, Ok(created));
    }

    #[tokio::test]
    async fn received_message_stays_until_deleted() {
        let queue = InMemoryMessageQueue::new();
        let url = queue.create_queue("etl-queue").await.unwrap();
        queue.send_message(&url, "one".to_string()).await.unwrap();

        let first = queue
            .receive_message(&url, Duration::ZERO)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.body, "one");

        // Not deleted, so a second receive sees the same delivery.
        let again = queue
            .receive_message(&url, Duration::ZERO)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again, first);

        queue.delete_message(&url, &first.receipt).await.unwrap();
        assert_eq!(queue.receive_message(&url, Duration::ZERO).await, Ok(None));
        assert!(queue.messages("etl-queue").is_empty());
    }
}
