//! Per-region statistics over a period.
//!
//! Everything here is a pure function of its inputs. A missing period key is
//! the same as a period with no entries.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::domain::{DateRange, EntriesByPeriod, Entry, RegionStat};

/// Frequency, median severity and covered dates for `region` within `period`.
///
/// Region matching is exact and case-sensitive.
pub fn summarize(period: &str, entries_by_period: &EntriesByPeriod, region: &str) -> RegionStat {
    let matches: Vec<&Entry> = entries_by_period
        .get(period)
        .map(|entries| entries.iter().filter(|e| e.region == region).collect())
        .unwrap_or_default();

    if matches.is_empty() {
        return RegionStat {
            region: region.to_string(),
            period: period.to_string(),
            frequency: 0,
            median_score: 0.0,
            total_entries: 0,
            date_range: None,
        };
    }

    let mut severities: Vec<f64> = matches.iter().map(|e| e.severity).collect();
    let median_score = median(&mut severities);

    // Non-empty, so both folds produce a value.
    let date_range = matches
        .iter()
        .map(|e| e.timestamp)
        .min()
        .zip(matches.iter().map(|e| e.timestamp).max())
        .map(|(start, end)| DateRange { start, end });

    RegionStat {
        region: region.to_string(),
        period: period.to_string(),
        frequency: matches.len(),
        median_score,
        total_entries: matches.len(),
        date_range,
    }
}

/// Distinct region labels logged in `period`, sorted.
pub fn regions_in_period(period: &str, entries_by_period: &EntriesByPeriod) -> Vec<String> {
    let regions: BTreeSet<&str> = entries_by_period
        .get(period)
        .map(|entries| entries.iter().map(|e| e.region.as_str()).collect())
        .unwrap_or_default();
    regions.into_iter().map(str::to_string).collect()
}

/// Statistics for every region logged in `period`, sorted by region.
///
/// Regions are independent, so they are summarized in parallel.
pub fn summarize_regions(period: &str, entries_by_period: &EntriesByPeriod) -> Vec<RegionStat> {
    regions_in_period(period, entries_by_period)
        .par_iter()
        .map(|region| summarize(period, entries_by_period, region))
        .collect()
}

/// Textbook median. Sorts `values` in place; returns 0 for an empty slice.
pub fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}
