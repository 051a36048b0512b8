//! `siphon-extract` — one-shot extract step of the ETL pipeline.
//!
//! Ensures the bucket exists, uploads a JSON payload under a time-based key,
//! ensures the queue exists and publishes a notification referencing the
//! uploaded object. Control flow is strictly linear; each external call runs
//! through the bounded retry executor.

pub mod config;
pub mod pipeline;
pub mod sample;

pub use config::ExtractConfig;
pub use pipeline::{ExtractError, ExtractPipeline, ExtractReport};
pub use sample::sample_records;
