//! Command-line parsing for the pain-log summarizer.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! statistics, prompt and generation code.

use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::{Audience, GenerationOptions, Tone};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "painsum", version, about = "Pain-log statistics and validated natural-language summaries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print per-region statistics for one or all periods.
    Stats(StatsArgs),
    /// Print the exact prompt that would be sent to the generator (no network).
    Prompt(RequestArgs),
    /// Print the deterministic fallback summary (no network).
    Fallback(RequestArgs),
    /// Generate a validated summary via the configured text-generation service.
    Summarize(SummarizeArgs),
    /// Run the output validator over a candidate summary.
    Validate(ValidateArgs),
}

/// Where the pain log comes from.
#[derive(Debug, Args, Clone)]
pub struct DataArgs {
    /// Pain-log CSV (`region,severity,timestamp[,period]`).
    #[arg(long, value_name = "CSV")]
    pub csv: PathBuf,

    /// As-of date for rolling windows when the CSV has no `period` column (default: today, UTC).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub asof: Option<NaiveDate>,
}

#[derive(Debug, Args, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Only this period (default: every period in the input).
    #[arg(long)]
    pub period: Option<String>,

    /// Only this region (exact, case-sensitive).
    #[arg(long)]
    pub region: Option<String>,
}

/// One region within one period, plus how to phrase it.
#[derive(Debug, Args, Clone)]
pub struct RequestArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Period label, e.g. "Last Week".
    #[arg(short = 'p', long)]
    pub period: String,

    /// Region label (exact, case-sensitive), e.g. "Lower Back".
    #[arg(short = 'r', long)]
    pub region: String,

    #[arg(long, value_enum, default_value_t = Tone::Compassionate)]
    pub tone: Tone,

    #[arg(long, value_enum, default_value_t = Audience::Patient)]
    pub audience: Audience,
}

#[derive(Debug, Args, Clone)]
pub struct SummarizeArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Maximum generator calls before falling back.
    #[arg(long, default_value_t = 3)]
    pub max_attempts: u32,

    /// Base backoff between attempts, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    pub base_delay_ms: u64,

    /// Fail instead of returning the template summary when attempts run out.
    #[arg(long)]
    pub no_fallback: bool,

    /// Accept any non-blank generator output without validation.
    #[arg(long)]
    pub no_validation: bool,

    /// Overall deadline for the request, in milliseconds.
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Add a small random delay to each backoff.
    #[arg(long)]
    pub jitter: bool,

    /// Print a JSON object (statistics, text, provenance) instead of plain text.
    #[arg(long)]
    pub json: bool,
}

impl SummarizeArgs {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
            fallback_enabled: !self.no_fallback,
            validation_enabled: !self.no_validation,
            deadline: self.deadline_ms.map(Duration::from_millis),
            jitter: self.jitter,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ValidateArgs {
    /// Candidate summary text.
    #[arg(long)]
    pub text: String,

    #[arg(short = 'r', long)]
    pub region: String,

    #[arg(long)]
    pub frequency: usize,

    #[arg(long)]
    pub median: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarize_defaults_match_generation_defaults() {
        let cli = Cli::parse_from([
            "painsum", "summarize", "--csv", "log.csv", "--period", "Last Week", "--region", "Lower Back",
        ]);
        let Command::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        assert_eq!(args.options(), GenerationOptions::default());
        assert_eq!(args.request.tone, Tone::Compassionate);
        assert_eq!(args.request.audience, Audience::Patient);
    }

    #[test]
    fn summarize_flags_override_options() {
        let cli = Cli::parse_from([
            "painsum",
            "summarize",
            "--csv",
            "log.csv",
            "-p",
            "Last Month",
            "-r",
            "Neck",
            "--tone",
            "professional",
            "--audience",
            "clinician",
            "--max-attempts",
            "5",
            "--base-delay-ms",
            "250",
            "--no-fallback",
            "--no-validation",
            "--deadline-ms",
            "8000",
            "--asof",
            "2025-03-31",
        ]);
        let Command::Summarize(args) = cli.command else {
            panic!("expected summarize");
        };
        let opts = args.options();
        assert_eq!(opts.max_attempts, 5);
        assert_eq!(opts.base_delay, Duration::from_millis(250));
        assert!(!opts.fallback_enabled);
        assert!(!opts.validation_enabled);
        assert_eq!(opts.deadline, Some(Duration::from_secs(8)));
        assert_eq!(args.request.tone, Tone::Professional);
        assert_eq!(args.request.audience, Audience::Clinician);
        assert_eq!(args.request.data.asof, NaiveDate::from_ymd_opt(2025, 3, 31));
    }
}
