//! Transformed products.

use serde::{Deserialize, Serialize};

use crate::key::ObjectKey;
use crate::record::Record;

/// A record after transformation, tagged with the batch it arrived in.
///
/// `batch_id` is the storage key of the uploaded payload, so every run of the
/// extract step accumulates its own history row per product id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub batch_id: String,
}

impl Product {
    /// Transform one record: price marked up by 10%, truncated to whole units.
    pub fn from_record(record: &Record, batch: &ObjectKey) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            price: record.price * 110 / 100,
            batch_id: batch.as_str().to_string(),
        }
    }
}

/// Transform a full payload, preserving record order.
pub fn transform_batch(records: &[Record], batch: &ObjectKey) -> Vec<Product> {
    records
        .iter()
        .map(|record| Product::from_record(record, batch))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn batch() -> ObjectKey {
        ObjectKey::at(DateTime::from_timestamp(1_700_000_000, 0).unwrap())
    }

    #[test]
    fn markup_adds_ten_percent() {
        let batch = batch();
        let products = transform_batch(
            &[Record::new(1, "Apple", 100), Record::new(2, "Banana", 50)],
            &batch,
        );
        assert_eq!(products[0].price, 110);
        assert_eq!(products[1].price, 55);
        assert_eq!(products[0].batch_id, "data-1700000000.json");
    }

    #[test]
    fn markup_truncates_fractions() {
        let product = Product::from_record(&Record::new(1, "Cherry", 9), &batch());
        // 9.9 truncated, not rounded.
        assert_eq!(product.price, 9);
    }

    #[test]
    fn batch_preserves_order_and_names() {
        let batch = batch();
        let records = vec![Record::new(2, "Banana", 50), Record::new(1, "りんご", 100)];
        let products = transform_batch(&records, &batch);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, 2);
        assert_eq!(products[1].name, "りんご");
    }
}
