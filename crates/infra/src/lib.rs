//! Infrastructure layer: retry execution, object storage, message queue and
//! product persistence adapters, AWS client wiring.

pub mod aws;
pub mod object_store;
pub mod product_store;
pub mod queue;
pub mod retry;

pub use aws::{AwsClients, AwsConnection};
pub use object_store::{InMemoryObjectStore, ObjectStore, S3ObjectStore, StorageError};
pub use product_store::{
    InMemoryProductStore, PostgresProductStore, ProductStore, ProductStoreError,
};
pub use queue::{
    InMemoryMessageQueue, MessageQueue, QueueError, QueueUrl, ReceiptHandle, ReceivedMessage,
    SqsMessageQueue,
};
pub use retry::{RetryPolicy, retry};
