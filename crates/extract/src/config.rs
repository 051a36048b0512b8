//! Extract-step configuration.

use siphon_infra::{AwsConnection, RetryPolicy};

/// Everything the extract step needs to run.
///
/// Defaults target a local emulator; `from_env` overrides each connection
/// parameter and resource name individually so nothing reads globals deeper
/// in the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    pub connection: AwsConnection,
    pub bucket: String,
    pub queue: String,
    pub retry: RetryPolicy,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            connection: AwsConnection {
                endpoint: "http://localstack:4566".to_string(),
                region: "ap-northeast-1".to_string(),
                access_key: "test".to_string(),
                secret_key: "test".to_string(),
            },
            bucket: "etl-bucket".to_string(),
            queue: "etl-queue".to_string(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ExtractConfig {
    /// Build from `SIPHON_*` environment variables, falling back to the
    /// emulator defaults for anything unset.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            connection: AwsConnection {
                endpoint: env_or("SIPHON_ENDPOINT", base.connection.endpoint),
                region: env_or("SIPHON_REGION", base.connection.region),
                access_key: env_or("SIPHON_ACCESS_KEY", base.connection.access_key),
                secret_key: env_or("SIPHON_SECRET_KEY", base.connection.secret_key),
            },
            bucket: env_or("SIPHON_BUCKET", base.bucket),
            queue: env_or("SIPHON_QUEUE", base.queue),
            retry: base.retry,
        }
    }
}

fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}
