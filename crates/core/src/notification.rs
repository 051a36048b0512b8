//! Downstream notification message.

use serde::{Deserialize, Serialize};

use crate::key::ObjectKey;

/// Message published to the queue after an upload has been acknowledged.
///
/// Consumers resolve `bucket`/`key` back to the uploaded object, so the
/// `key` field must match the storage key byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub bucket: String,
    pub key: String,
}

impl Notification {
    pub fn new(bucket: impl Into<String>, key: &ObjectKey) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.as_str().to_string(),
        }
    }

    /// Serialize to the wire shape: `{"bucket":...,"key":...}`.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn wire_shape_is_bucket_then_key() {
        let key = ObjectKey::at(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
        let body = Notification::new("etl-bucket", &key).encode().unwrap();
        assert_eq!(
            body,
            r#"{"bucket":"etl-bucket","key":"data-1700000000.json"}"#
        );
    }

    #[test]
    fn key_field_matches_object_key_exactly() {
        let key = ObjectKey::now();
        let notification = Notification::new("etl-bucket", &key);
        assert_eq!(notification.key, key.as_str());
    }
}
