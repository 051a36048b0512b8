//! `siphon-transform` — transform/load worker of the ETL pipeline.
//!
//! Long-polls the queue for notifications left by the extract step, fetches
//! the referenced payload from storage, applies the price markup and upserts
//! the rows into the product store keyed by `(id, batch_id)` — the batch id
//! being the storage key of the payload.

pub mod config;
pub mod worker;

pub use config::TransformConfig;
pub use worker::{TransformError, TransformWorker};
