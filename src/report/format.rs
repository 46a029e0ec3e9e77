//! Formatted terminal output.
//!
//! We keep formatting code in one place so the statistics, validation and
//! generation code stays free of presentation concerns.

use crate::domain::{GenerationOutcome, Provenance, RegionStat, ValidationVerdict, format_score};
use crate::io::ingest::IngestedEntries;

/// One-paragraph ingest summary (rows read/used + first few row errors).
pub fn format_ingest_summary(ingest: &IngestedEntries) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Rows: read={} used={} skipped={}\n",
        ingest.rows_read,
        ingest.rows_used,
        ingest.row_errors.len()
    ));
    for err in ingest.row_errors.iter().take(5) {
        out.push_str(&format!("  line {}: {}\n", err.line, err.message));
    }
    if ingest.row_errors.len() > 5 {
        out.push_str(&format!("  ... and {} more\n", ingest.row_errors.len() - 5));
    }
    out
}

/// Table of region statistics.
pub fn format_stats_table(stats: &[RegionStat]) -> String {
    let mut out = String::new();
    out.push_str(
        format!(
            "{:<16} {:<20} {:>7} {:>7} {:<12} {:<12}\n",
            "period", "region", "count", "median", "first", "last"
        )
        .trim_end(),
    );
    out.push('\n');

    out.push_str(
        format!(
            "{:-<16} {:-<20} {:-<7} {:-<7} {:-<12} {:-<12}\n",
            "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for s in stats {
        let (first, last) = match &s.date_range {
            Some(r) => (r.start.format("%Y-%m-%d").to_string(), r.end.format("%Y-%m-%d").to_string()),
            None => ("-".to_string(), "-".to_string()),
        };
        let median = if s.is_empty() { "-".to_string() } else { format_score(s.median_score) };
        out.push_str(
            format!(
                "{:<16} {:<20} {:>7} {:>7} {:<12} {:<12}\n",
                truncate(&s.period, 16),
                truncate(&s.region, 20),
                s.frequency,
                median,
                first,
                last,
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Validator verdict as a short report.
pub fn format_verdict(verdict: &ValidationVerdict) -> String {
    let mut out = String::new();
    out.push_str(if verdict.is_valid() { "Verdict: valid\n" } else { "Verdict: invalid\n" });
    for e in &verdict.errors {
        out.push_str(&format!("  error:   {e}\n"));
    }
    for w in &verdict.warnings {
        out.push_str(&format!("  warning: {w}\n"));
    }
    out
}

/// Summary text followed by a provenance line.
pub fn format_outcome(outcome: &GenerationOutcome) -> String {
    let mut out = String::new();
    out.push_str(outcome.text.trim_end());
    out.push_str("\n\n");
    match &outcome.provenance {
        Provenance::Generated { attempt, warnings } => {
            out.push_str(&format!("(generated, attempt {attempt})\n"));
            for w in warnings {
                out.push_str(&format!("  warning: {w}\n"));
            }
        }
        Provenance::Fallback { attempts, reason } => {
            out.push_str(&format!("(fallback after {attempts} attempt(s): {reason})\n"));
        }
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
