//! Shared "summary pipeline" logic used by every subcommand.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV ingest -> region statistics -> prompt/validation/generation -> outcome
//!
//! The subcommands then only decide what to print.

use chrono::Utc;
use serde::Serialize;

use crate::cli::{DataArgs, RequestArgs};
use crate::domain::{GenerationOptions, GenerationOutcome, RegionStat, SummaryRequest};
use crate::error::{AppError, SummaryError};
use crate::generate::{Orchestrator, TextGenerator};
use crate::io::ingest::{IngestedEntries, load_entries};
use crate::stats::summarize;

/// Load and group the pain log named by `data`.
pub fn load(data: &DataArgs) -> Result<IngestedEntries, AppError> {
    let asof = data.asof.unwrap_or_else(|| Utc::now().date_naive());
    let ingest = load_entries(&data.csv, asof)?;
    tracing::info!(
        rows_read = ingest.rows_read,
        rows_used = ingest.rows_used,
        skipped = ingest.row_errors.len(),
        periods = ingest.periods.len(),
        "loaded pain log"
    );
    Ok(ingest)
}

/// Statistics + summary request for one region/period.
pub fn request_for(args: &RequestArgs) -> Result<(IngestedEntries, RegionStat, SummaryRequest), AppError> {
    let ingest = load(&args.data)?;
    if !ingest.entries_by_period.contains_key(&args.period) {
        tracing::warn!(period = %args.period, "period not present in input; treating it as empty");
    }
    let stat = summarize(&args.period, &ingest.entries_by_period, &args.region);
    let request = SummaryRequest::from_stat(&stat, args.tone, args.audience);
    Ok((ingest, stat, request))
}

/// Everything a `summarize` run produced.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRun {
    pub stat: RegionStat,
    #[serde(flatten)]
    pub outcome: GenerationOutcome,
}

/// Drive the orchestrator for one statistic.
pub async fn run_summary<G: TextGenerator>(
    generator: G,
    stat: RegionStat,
    request: &SummaryRequest,
    options: GenerationOptions,
) -> Result<SummaryRun, SummaryError> {
    let outcome = Orchestrator::new(generator, options).produce(request).await?;
    Ok(SummaryRun { stat, outcome })
}
