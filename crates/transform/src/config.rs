//! Transform-worker configuration.

use std::time::Duration;

use siphon_infra::{AwsConnection, RetryPolicy};

/// Everything the transform worker needs to run.
///
/// Defaults target the same local emulator setup as the extract step, plus
/// the compose-network database. `from_env` overrides each value from
/// `SIPHON_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    pub connection: AwsConnection,
    pub queue: String,
    pub database_url: String,
    /// Budget for waiting on resources provisioned elsewhere (the queue
    /// created by the extract step, the database accepting connections).
    pub startup: RetryPolicy,
    /// Long-poll window per receive call.
    pub receive_wait: Duration,
    /// Pause when the queue is empty.
    pub idle_backoff: Duration,
    /// Pause after a failed message before polling again.
    pub error_backoff: Duration,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            connection: AwsConnection {
                endpoint: "http://localstack:4566".to_string(),
                region: "ap-northeast-1".to_string(),
                access_key: "test".to_string(),
                secret_key: "test".to_string(),
            },
            queue: "etl-queue".to_string(),
            database_url: "postgres://etluser:etlpass@db/etldb".to_string(),
            startup: RetryPolicy::new(60, Duration::from_secs(1)),
            receive_wait: Duration::from_secs(10),
            idle_backoff: Duration::from_secs(1),
            error_backoff: Duration::from_secs(2),
        }
    }
}

impl TransformConfig {
    /// Build from `SIPHON_*` environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let base = Self::default();
        Self {
            connection: AwsConnection {
                endpoint: env_or("SIPHON_ENDPOINT", base.connection.endpoint),
                region: env_or("SIPHON_REGION", base.connection.region),
                access_key: env_or("SIPHON_ACCESS_KEY", base.connection.access_key),
                secret_key: env_or("SIPHON_SECRET_KEY", base.connection.secret_key),
            },
            queue: env_or("SIPHON_QUEUE", base.queue),
            database_url: env_or("SIPHON_DATABASE_URL", base.database_url),
            startup: base.startup,
            receive_wait: base.receive_wait,
            idle_backoff: base.idle_backoff,
            error_backoff: base.error_backoff,
        }
    }
}

fn env_or(key: &str, fallback: String) -> String {
    std::env::var(key).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_the_compose_network() {
        let config = TransformConfig::default();
        assert_eq!(config.connection.endpoint, "http://localstack:4566");
        assert_eq!(config.queue, "etl-queue");
        assert_eq!(config.database_url, "postgres://etluser:etlpass@db/etldb");
        assert_eq!(config.startup.max_attempts, 60);
        assert_eq!(config.receive_wait, Duration::from_secs(10));
    }
}
