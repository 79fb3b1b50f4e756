use anyhow::{Context, Result};
use tracing::info;

use export_usage_chart::cli::Args;
use export_usage_chart::logging;
use export_usage_chart::pipeline::{self, Config};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level, args.log_file.as_deref()).context("initialise logging")?;

    let config = Config::from_args(&args);
    let summary = pipeline::run(&config)?;

    info!(
        "done: {} messages from {} conversations ({} skipped), ~{} tokens in {} buckets",
        summary.messages,
        summary.conversations,
        summary.skipped,
        summary.total_tokens,
        summary.buckets
    );
    Ok(())
}
