//! Fixed sample data.

use siphon_core::Record;

/// Stand-in for the real extraction source. A production deployment would
/// scrape or pull these from upstream; this step ships a fixed payload.
pub fn sample_records() -> Vec<Record> {
    vec![Record::new(1, "Apple", 100), Record::new(2, "Banana", 50)]
}
