//! AWS client construction.

use aws_config::Region;
use aws_sdk_s3::config::Credentials;

/// Connection parameters for an S3/SQS-compatible endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AwsConnection {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

/// The service clients the extract step talks to.
#[derive(Debug, Clone)]
pub struct AwsClients {
    pub s3: aws_sdk_s3::Client,
    pub sqs: aws_sdk_sqs::Client,
}

impl AwsClients {
    /// Build both clients against one endpoint with static credentials.
    ///
    /// S3 uses path-style addressing: virtual-hosted bucket hostnames do not
    /// resolve against a local emulator.
    pub async fn connect(conn: &AwsConnection) -> Self {
        let shared = aws_config::ConfigLoader::default()
            .region(Region::new(conn.region.clone()))
            .endpoint_url(conn.endpoint.clone())
            .credentials_provider(Credentials::new(
                conn.access_key.clone(),
                conn.secret_key.clone(),
                None,
                None,
                "static",
            ))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        Self {
            s3: aws_sdk_s3::Client::from_conf(s3_config),
            sqs: aws_sdk_sqs::Client::new(&shared),
        }
    }
}
