//! CSV ingest of pain-log entries.
//!
//! This module turns an exported pain log into the period → entries map the
//! statistics engine reads.
//!
//! - **Strict schema** for required columns (`region`, `severity`, `timestamp`; exit code 2)
//! - **Row-level validation**: bad rows are skipped and reported, not fatal
//! - **Deterministic grouping**: by the `period` column when present, otherwise
//!   into fixed windows ending at the as-of date

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use csv::StringRecord;

use crate::domain::{EntriesByPeriod, Entry};
use crate::error::AppError;

/// Rolling windows used when the CSV has no `period` column.
pub const PERIOD_WINDOWS: [(&str, i64); 3] = [("Last Week", 7), ("Last Month", 30), ("Last 3 Months", 90)];
pub const ALL_TIME: &str = "All Time";

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: grouped entries + row errors.
#[derive(Debug, Clone)]
pub struct IngestedEntries {
    pub entries_by_period: EntriesByPeriod,
    /// Period labels in presentation order.
    pub periods: Vec<String>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

/// Load a pain-log CSV from disk.
pub fn load_entries(path: &Path, asof: NaiveDate) -> Result<IngestedEntries, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_entries(file, asof)
}

/// Parse a pain-log CSV from any reader.
pub fn read_entries<R: Read>(source: R, asof: NaiveDate) -> Result<IngestedEntries, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    for name in ["region", "severity", "timestamp"] {
        if !header_map.contains_key(name) {
            return Err(AppError::new(2, format!("Missing required column: `{name}`")));
        }
    }
    let has_period = header_map.contains_key("period");

    let mut rows: Vec<(Option<String>, Entry)> = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header line, and lines are 1-based.
        let line = idx + 2;
        rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        match parse_row(&record, &header_map, has_period) {
            Ok(row) => rows.push(row),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    let rows_used = rows.len();
    if rows_used == 0 {
        return Err(AppError::new(3, "No valid pain entries remain after validation."));
    }

    let (entries_by_period, periods) = if has_period {
        group_by_label(rows)
    } else {
        group_by_window(rows.into_iter().map(|(_, e)| e).collect(), asof)
    };

    Ok(IngestedEntries {
        entries_by_period,
        periods,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Bucket entries into the rolling windows ending at `asof` (inclusive).
///
/// Windows overlap: an entry from yesterday is in every window. Entries dated
/// after `asof` are left out entirely.
pub fn group_by_window(entries: Vec<Entry>, asof: NaiveDate) -> (EntriesByPeriod, Vec<String>) {
    let cutoff = (asof + Duration::days(1)).and_time(NaiveTime::MIN).and_utc();
    let in_range: Vec<Entry> = entries.into_iter().filter(|e| e.timestamp < cutoff).collect();

    let mut map = EntriesByPeriod::new();
    let mut periods = Vec::new();
    for (label, days) in PERIOD_WINDOWS {
        let start = cutoff - Duration::days(days);
        let window: Vec<Entry> = in_range.iter().filter(|e| e.timestamp >= start).cloned().collect();
        map.insert(label.to_string(), window);
        periods.push(label.to_string());
    }
    map.insert(ALL_TIME.to_string(), in_range);
    periods.push(ALL_TIME.to_string());

    (map, periods)
}

fn group_by_label(rows: Vec<(Option<String>, Entry)>) -> (EntriesByPeriod, Vec<String>) {
    let mut map = EntriesByPeriod::new();
    let mut periods = Vec::new();
    for (period, entry) in rows {
        // parse_row guarantees a label when the column exists.
        let period = period.unwrap_or_else(|| ALL_TIME.to_string());
        if !map.contains_key(&period) {
            periods.push(period.clone());
        }
        map.entry(period).or_default().push(entry);
    }
    (map, periods)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_row(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
    has_period: bool,
) -> Result<(Option<String>, Entry), String> {
    let region = get_required(record, header_map, "region")?.to_string();

    let raw_severity = get_required(record, header_map, "severity")?;
    let severity = raw_severity
        .parse::<f64>()
        .map_err(|_| format!("Invalid severity '{raw_severity}'"))?;
    if !(severity.is_finite() && (0.0..=10.0).contains(&severity)) {
        return Err(format!("Severity {severity} is outside 0-10"));
    }

    let timestamp = parse_timestamp(get_required(record, header_map, "timestamp")?)?;

    let period = if has_period {
        Some(get_required(record, header_map, "period")?.to_string())
    } else {
        None
    };

    Ok((
        period,
        Entry {
            region,
            severity,
            timestamp,
        },
    ))
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// RFC 3339 instants, or bare `YYYY-MM-DD` dates (taken as midnight UTC).
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN).and_utc());
    }
    Err(format!(
        "Invalid timestamp '{s}'. Expected RFC 3339 (2025-03-03T08:00:00Z) or YYYY-MM-DD."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    fn asof() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap()
    }

    #[test]
    fn groups_by_period_column_in_first_seen_order() {
        let csv = "\u{feff}Period,Region,Severity,Timestamp\n\
                   Last Week,Neck,4,2025-03-28T09:00:00Z\n\
                   Last Month,Neck,6,2025-03-10\n\
                   Last Week,Knee,2.5,2025-03-29T18:30:00+02:00\n";
        let ingest = read_entries(csv.as_bytes(), asof()).unwrap();

        assert_eq!(ingest.periods, ["Last Week", "Last Month"]);
        assert_eq!(ingest.rows_read, 3);
        assert_eq!(ingest.rows_used, 3);
        let week = &ingest.entries_by_period["Last Week"];
        assert_eq!(week.len(), 2);
        assert_eq!(week[1].severity, 2.5);
        assert_eq!(week[1].timestamp, Utc.with_ymd_and_hms(2025, 3, 29, 16, 30, 0).unwrap());
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = "region,severity,timestamp\n\
                   Neck,4,2025-03-28\n\
                   Neck,eleven,2025-03-28\n\
                   Neck,12,2025-03-28\n\
                   ,3,2025-03-28\n\
                   Neck,3,yesterday\n";
        let ingest = read_entries(csv.as_bytes(), asof()).unwrap();

        assert_eq!(ingest.rows_read, 5);
        assert_eq!(ingest.rows_used, 1);
        let lines: Vec<usize> = ingest.row_errors.iter().map(|e| e.line).collect();
        assert_eq!(lines, [3, 4, 5, 6]);
        assert!(ingest.row_errors[1].message.contains("outside 0-10"));
    }

    #[test]
    fn missing_column_is_a_schema_error() {
        let err = read_entries("region,timestamp\nNeck,2025-03-28\n".as_bytes(), asof()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`severity`"));
    }

    #[test]
    fn no_usable_rows_is_a_data_error() {
        let err = read_entries("region,severity,timestamp\nNeck,x,2025-03-28\n".as_bytes(), asof()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn windows_overlap_and_exclude_future_entries() {
        let csv = "region,severity,timestamp\n\
                   Neck,4,2025-03-31T23:00:00Z\n\
                   Neck,5,2025-03-25\n\
                   Neck,6,2025-03-10\n\
                   Neck,7,2024-06-01\n\
                   Neck,8,2025-04-01T00:00:00Z\n";
        let ingest = read_entries(csv.as_bytes(), asof()).unwrap();

        assert_eq!(ingest.periods, ["Last Week", "Last Month", "Last 3 Months", "All Time"]);
        let count = |p: &str| ingest.entries_by_period[p].len();
        assert_eq!(count("Last Week"), 2);
        assert_eq!(count("Last Month"), 3);
        assert_eq!(count("Last 3 Months"), 3);
        assert_eq!(count("All Time"), 4);
    }

    #[test]
    fn load_entries_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "region,severity,timestamp").unwrap();
        writeln!(file, "Lower Back,7,2025-03-30").unwrap();
        file.flush().unwrap();

        let ingest = load_entries(file.path(), asof()).unwrap();
        assert_eq!(ingest.entries_by_period["Last Week"][0].region, "Lower Back");

        let err = load_entries(Path::new("/definitely/not/here.csv"), asof()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
