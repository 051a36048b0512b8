use anyhow::Context;

use siphon_extract::{ExtractConfig, ExtractPipeline, sample_records};
use siphon_infra::{AwsClients, S3ObjectStore, SqsMessageQueue};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    siphon_observability::init();

    let config = ExtractConfig::from_env();
    let clients = AwsClients::connect(&config.connection).await;
    let store = S3ObjectStore::new(clients.s3);
    let queue = SqsMessageQueue::new(clients.sqs);

    let records = sample_records();
    let report = ExtractPipeline::new(&config, &store, &queue)
        .run(&records)
        .await
        .context("extract failed")?;

    tracing::debug!(bucket = %report.bucket, key = %report.key, queue_url = %report.queue_url, "extract complete");
    Ok(())
}
