//! Shared domain types.
//!
//! Inputs are read-only; derived values (`RegionStat`, verdicts, outcomes) are
//! built once and never mutated afterwards.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single pain-log measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub region: String,
    /// Severity on a 0–10 scale.
    pub severity: f64,
    pub timestamp: DateTime<Utc>,
}

impl Entry {
    pub fn new(region: impl Into<String>, severity: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            region: region.into(),
            severity,
            timestamp,
        }
    }
}

/// Entries grouped under an opaque period label (e.g. "Last Week").
pub type EntriesByPeriod = HashMap<String, Vec<Entry>>;

/// Earliest and latest timestamp among the entries that produced a statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Long human form, e.g. `March 3, 2025`.
    pub fn start_label(&self) -> String {
        self.start.format("%B %-d, %Y").to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format("%B %-d, %Y").to_string()
    }
}

/// Statistics for one region within one period.
///
/// `frequency == 0` means nothing was logged; it never means "logged zero pain".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionStat {
    pub region: String,
    pub period: String,
    pub frequency: usize,
    /// Median severity (0–10); 0 when `frequency == 0`.
    pub median_score: f64,
    pub total_entries: usize,
    pub date_range: Option<DateRange>,
}

impl RegionStat {
    pub fn is_empty(&self) -> bool {
        self.frequency == 0
    }
}

/// Emotional register of the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Compassionate,
    Encouraging,
    Neutral,
    Professional,
    Reassuring,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Compassionate,
        Tone::Encouraging,
        Tone::Neutral,
        Tone::Professional,
        Tone::Reassuring,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tone::Compassionate => "compassionate",
            Tone::Encouraging => "encouraging",
            Tone::Neutral => "neutral",
            Tone::Professional => "professional",
            Tone::Reassuring => "reassuring",
        }
    }
}

/// Who will read the generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Audience {
    Patient,
    Caregiver,
    Clinician,
    Family,
    Researcher,
}

impl Audience {
    pub const ALL: [Audience; 5] = [
        Audience::Patient,
        Audience::Caregiver,
        Audience::Clinician,
        Audience::Family,
        Audience::Researcher,
    ];

    /// Phrase used when addressing the reader in prompts.
    pub fn reader(self) -> &'static str {
        match self {
            Audience::Patient => "the person who logged the entries",
            Audience::Caregiver => "a caregiver supporting the person who logged the entries",
            Audience::Clinician => "a clinician reviewing the person's self-reported log",
            Audience::Family => "a family member of the person who logged the entries",
            Audience::Researcher => "a researcher reviewing de-identified self-reported data",
        }
    }
}

/// Outcome of running the rule-based validator over a candidate summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationVerdict {
    /// Valid iff there are no blocking errors. Warnings never block.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Where the returned text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum Provenance {
    /// Accepted from the generator on the given attempt (1-indexed).
    Generated { attempt: u32, warnings: Vec<String> },
    /// Deterministic fallback after `attempts` generator calls.
    Fallback { attempts: u32, reason: String },
}

/// Final text plus how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationOutcome {
    pub text: String,
    pub provenance: Provenance,
}

impl GenerationOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self.provenance, Provenance::Fallback { .. })
    }
}

/// Retry/validation knobs for one summary request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub fallback_enabled: bool,
    pub validation_enabled: bool,
    /// Upper bound on the whole request, including backoff waits.
    pub deadline: Option<Duration>,
    /// Add up to `base_delay / 4` of random delay to each backoff.
    pub jitter: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
            fallback_enabled: true,
            validation_enabled: true,
            deadline: None,
            jitter: false,
        }
    }
}

/// Everything needed to build a prompt, validate output and fall back.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRequest {
    pub period: String,
    pub region: String,
    pub frequency: usize,
    pub median_score: f64,
    pub tone: Tone,
    pub audience: Audience,
    pub date_range: Option<DateRange>,
}

impl SummaryRequest {
    pub fn from_stat(stat: &RegionStat, tone: Tone, audience: Audience) -> Self {
        Self {
            period: stat.period.clone(),
            region: stat.region.clone(),
            frequency: stat.frequency,
            median_score: stat.median_score,
            tone,
            audience,
            date_range: stat.date_range,
        }
    }
}

/// Shortest exact rendering of a score: `7`, `6.5`, `3.125`.
pub fn format_score(score: f64) -> String {
    format!("{score}")
}
