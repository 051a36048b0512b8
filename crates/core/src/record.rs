//! Extracted records and payload encoding.

use serde::{Deserialize, Serialize};

/// A single unit of extracted data.
///
/// Constructed in memory, serialized once as part of a payload, and
/// discarded after upload. Nothing in this program persists records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// Serialize an ordered payload of records to a UTF-8 JSON document.
///
/// Non-ASCII text is emitted as-is (no `\u` escaping).
pub fn encode_payload(records: &[Record]) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_preserves_record_order() {
        let records = vec![Record::new(2, "Banana", 50), Record::new(1, "Apple", 100)];
        let json = encode_payload(&records).unwrap();
        let decoded: Vec<Record> = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, records);
    }

    #[test]
    fn payload_does_not_escape_non_ascii() {
        let records = vec![Record::new(1, "りんご", 100)];
        let json = encode_payload(&records).unwrap();
        let text = String::from_utf8(json).unwrap();
        assert!(text.contains("りんご"), "expected raw UTF-8, got {text}");
        assert!(!text.contains("\\u"), "expected no escaping, got {text}");
    }
}
