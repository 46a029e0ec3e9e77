//! `painlog-summary` library crate.
//!
//! Turns per-region pain-log statistics into tone- and audience-specific
//! summaries using an external text generator, with rule-based validation,
//! bounded retries and a deterministic fallback.
//!
//! The binary (`painsum`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes or reaching the network
//! - the generator sits behind a trait and can be stubbed

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod fallback;
pub mod generate;
pub mod io;
pub mod prompt;
pub mod report;
pub mod stats;
pub mod validate;
