//! Deterministic template summaries.
//!
//! Used when the generator cannot produce acceptable text. Performs no I/O and
//! cannot fail.

use crate::domain::{SummaryRequest, format_score};

/// Severity label for a median score.
///
/// Finer-grained than the validator's consistency bands.
pub fn severity_band(median_score: f64) -> &'static str {
    if median_score <= 2.0 {
        "mild"
    } else if median_score <= 4.0 {
        "moderate"
    } else if median_score <= 6.0 {
        "moderate to severe"
    } else if median_score <= 8.0 {
        "severe"
    } else {
        "very severe"
    }
}

/// Fixed-text summary for the given statistics.
pub fn fallback(period: &str, region: &str, frequency: usize, median_score: f64) -> String {
    let period = period.to_lowercase();
    let region = region.to_lowercase();

    if frequency == 0 {
        return format!(
            "No pain entries have been logged for your {region} during {period} yet. \
             This means nothing has been recorded, not that there was no pain."
        );
    }

    let entry_word = if frequency == 1 { "entry" } else { "entries" };
    format!(
        "During {period}, you recorded {frequency} pain {entry_word} for your {region}, \
         with a median pain level of {}/10 ({}). \
         This summary is based only on the entries you logged.",
        format_score(median_score),
        severity_band(median_score)
    )
}

pub fn fallback_for(request: &SummaryRequest) -> String {
    fallback(&request.period, &request.region, request.frequency, request.median_score)
}
