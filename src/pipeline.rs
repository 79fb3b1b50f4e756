//! End-to-end orchestration: extract, parse, estimate, aggregate,
//! render, in that order, once per run.

use std::path::PathBuf;

use anyhow::Result;
use chrono_tz::Tz;
use tracing::{info, warn};

use crate::aggregate::{self, TimeBucket};
use crate::archive;
use crate::chart;
use crate::cli::Args;
use crate::display;
use crate::estimate::TokenEstimator;
use crate::parser;

/// Explicit pipeline configuration, assembled once from the CLI so the
/// pipeline itself carries no defaults or global state.
#[derive(Clone, Debug)]
pub struct Config {
    pub archive: PathBuf,
    pub entry_name: String,
    pub extract_to: PathBuf,
    /// SVG destination; terminal rendering when absent.
    pub output: Option<PathBuf>,
    pub chars_per_token: u32,
    pub bucket: TimeBucket,
    pub timezone: Tz,
    pub term_width: usize,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        // Unknown timezone names fall back to UTC with a warning
        // rather than aborting; the chart is still useful.
        let timezone = args.timezone.parse::<Tz>().unwrap_or_else(|_| {
            warn!("unrecognised timezone \"{}\", using UTC", args.timezone);
            Tz::UTC
        });

        Self {
            archive: args.archive.clone(),
            entry_name: args.entry.clone(),
            extract_to: args
                .extract_to
                .clone()
                .unwrap_or_else(archive::default_destination),
            output: args.output.clone(),
            chars_per_token: args.chars_per_token,
            bucket: args.bucket.into(),
            timezone,
            term_width: args.width,
        }
    }
}

/// Counts reported after a successful run.
#[derive(Debug)]
pub struct RunSummary {
    pub conversations: usize,
    pub messages: usize,
    pub skipped: usize,
    pub total_tokens: u64,
    pub buckets: usize,
    pub chart_path: Option<PathBuf>,
}

/// Run the whole pipeline. Any archive or top-level parse failure
/// aborts; per-message problems were already recovered by the parser.
pub fn run(config: &Config) -> Result<RunSummary> {
    info!(
        "extracting \"{}\" from {}",
        config.entry_name,
        config.archive.display()
    );
    let extracted = archive::extract_entry(&config.archive, &config.entry_name, &config.extract_to)?;

    let mut outcome = parser::parse_export(&extracted)?;

    let estimator = TokenEstimator::new(config.chars_per_token);
    for record in &mut outcome.records {
        record.tokens = estimator.estimate(&record.text);
    }

    let table = aggregate::aggregate(&outcome.records, config.bucket, config.timezone);
    info!(
        "aggregated {} tokens across {} buckets",
        table.total_tokens(),
        table.rows.len()
    );

    let chart_path = match &config.output {
        Some(path) => {
            chart::render_svg(&table, path, chart::DEFAULT_SIZE)?;
            Some(path.clone())
        }
        None => {
            print!("{}", display::render_table(&table, config.term_width));
            None
        }
    };

    Ok(RunSummary {
        conversations: outcome.conversations,
        messages: outcome.records.len(),
        skipped: outcome.skipped,
        total_tokens: table.total_tokens(),
        buckets: table.rows.len(),
        chart_path,
    })
}
