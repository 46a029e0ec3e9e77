//! Input helpers.
//!
//! - CSV ingest of pain-log entries, grouped by period (`ingest`)

pub mod ingest;

pub use ingest::*;
