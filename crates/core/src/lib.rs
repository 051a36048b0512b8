//! `siphon-core` — domain types for the ETL steps.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod key;
pub mod notification;
pub mod product;
pub mod record;

pub use key::{KeyError, ObjectKey};
pub use notification::Notification;
pub use product::{Product, transform_batch};
pub use record::{Record, encode_payload};
