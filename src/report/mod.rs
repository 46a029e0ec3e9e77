//! Terminal formatting for statistics, verdicts and summaries.

pub mod format;

pub use format::*;
