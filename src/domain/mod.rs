//! Domain types used throughout the summary pipeline.
//!
//! This module defines:
//!
//! - raw pain-log input (`Entry`) and derived statistics (`RegionStat`, `DateRange`)
//! - the tone/audience enumerations (`Tone`, `Audience`)
//! - validator and orchestrator outputs (`ValidationVerdict`, `GenerationOutcome`)
//! - per-request configuration (`GenerationOptions`, `SummaryRequest`)

pub mod types;

pub use types::*;
