use anyhow::Context;

use siphon_infra::{AwsClients, PostgresProductStore, S3ObjectStore, SqsMessageQueue, retry};
use siphon_transform::{TransformConfig, TransformWorker};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    siphon_observability::init();

    let config = TransformConfig::from_env();
    let clients = AwsClients::connect(&config.connection).await;
    let store = S3ObjectStore::new(clients.s3);
    let queue = SqsMessageQueue::new(clients.sqs);

    let products = retry(&config.startup, || {
        PostgresProductStore::connect(&config.database_url)
    })
    .await
    .context("database not ready")?;
    products.ensure_schema().await.context("schema setup failed")?;

    TransformWorker::new(&config, &queue, &store, &products)
        .run()
        .await
        .context("worker stopped")?;
    Ok(())
}
