//! Time-based object keys.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a string does not parse as an object key.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid object key: {0}")]
pub struct KeyError(String);

/// Storage key of an uploaded payload: `data-<unix-seconds>.json`.
///
/// Uniqueness is assumed from timestamp granularity; two keys minted within
/// the same second collide. Callers that need a stronger scheme can pick the
/// timestamp themselves via [`ObjectKey::at`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Key for the current wall-clock second.
    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    /// Key for an explicit instant (whole seconds).
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(format!("data-{}.json", instant.timestamp()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<ObjectKey> for String {
    fn from(value: ObjectKey) -> Self {
        value.0
    }
}

impl FromStr for ObjectKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let seconds = s
            .strip_prefix("data-")
            .and_then(|rest| rest.strip_suffix(".json"))
            .ok_or_else(|| KeyError(s.to_string()))?;
        if seconds.is_empty() || !seconds.chars().all(|c| c.is_ascii_digit() || c == '-') {
            return Err(KeyError(s.to_string()));
        }
        seconds
            .parse::<i64>()
            .map_err(|_| KeyError(s.to_string()))?;
        Ok(Self(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn key_uses_whole_seconds() {
        let instant = DateTime::from_timestamp(1_700_000_000, 123_456_789).unwrap();
        assert_eq!(ObjectKey::at(instant).as_str(), "data-1700000000.json");
    }

    #[test]
    fn parse_rejects_foreign_keys() {
        assert!("data-abc.json".parse::<ObjectKey>().is_err());
        assert!("other-123.json".parse::<ObjectKey>().is_err());
        assert!("data-.json".parse::<ObjectKey>().is_err());
    }

    proptest! {
        #[test]
        fn key_round_trips_for_any_timestamp(secs in -8_000_000_000i64..8_000_000_000i64) {
            let instant = DateTime::from_timestamp(secs, 0).unwrap();
            let key = ObjectKey::at(instant);
            let parsed: ObjectKey = key.as_str().parse().unwrap();
            prop_assert_eq!(parsed, key);
        }
    }
}
