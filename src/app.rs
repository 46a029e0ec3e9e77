//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - installs logging
//! - parses CLI arguments
//! - loads the pain log and computes statistics
//! - prints prompts, verdicts, fallback text or generated summaries

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, RequestArgs, StatsArgs, SummarizeArgs, ValidateArgs};
use crate::error::AppError;
use crate::generate::HttpGenerator;

pub mod pipeline;

/// Entry point for the `painsum` binary.
pub fn run() -> Result<(), AppError> {
    init_tracing();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Stats(args) => handle_stats(args),
        Command::Prompt(args) => handle_prompt(args),
        Command::Fallback(args) => handle_fallback(args),
        Command::Summarize(args) => handle_summarize(args),
        Command::Validate(args) => handle_validate(args),
    }
}

/// Log to stderr so stdout stays clean for summaries and JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("painlog_summary=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_stats(args: StatsArgs) -> Result<(), AppError> {
    let ingest = pipeline::load(&args.data)?;

    let periods: Vec<String> = match &args.period {
        Some(p) => vec![p.clone()],
        None => ingest.periods.clone(),
    };

    let mut stats = Vec::new();
    for period in &periods {
        match &args.region {
            Some(region) => stats.push(crate::stats::summarize(period, &ingest.entries_by_period, region)),
            None => stats.extend(crate::stats::summarize_regions(period, &ingest.entries_by_period)),
        }
    }

    print!("{}", crate::report::format_ingest_summary(&ingest));
    println!();
    print!("{}", crate::report::format_stats_table(&stats));
    Ok(())
}

fn handle_prompt(args: RequestArgs) -> Result<(), AppError> {
    let (_, _, request) = pipeline::request_for(&args)?;
    print!("{}", crate::prompt::build_prompt_for(&request));
    Ok(())
}

fn handle_fallback(args: RequestArgs) -> Result<(), AppError> {
    let (_, _, request) = pipeline::request_for(&args)?;
    println!("{}", crate::fallback::fallback_for(&request));
    Ok(())
}

fn handle_validate(args: ValidateArgs) -> Result<(), AppError> {
    let verdict = crate::validate::validate(&args.text, &args.region, args.frequency, args.median);
    print!("{}", crate::report::format_verdict(&verdict));
    if verdict.is_valid() {
        Ok(())
    } else {
        Err(AppError::new(3, "Summary failed validation."))
    }
}

fn handle_summarize(args: SummarizeArgs) -> Result<(), AppError> {
    let (_, stat, request) = pipeline::request_for(&args.request)?;
    let generator = HttpGenerator::from_env()?;
    tracing::info!(model = generator.model(), region = %request.region, period = %request.period, "generating summary");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::new(4, format!("Failed to start async runtime: {e}")))?;
    let run = runtime.block_on(pipeline::run_summary(generator, stat, &request, args.options()))?;

    if args.json {
        let json = serde_json::to_string_pretty(&run)
            .map_err(|e| AppError::new(4, format!("Failed to serialize summary: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_outcome(&run.outcome));
    }
    Ok(())
}
