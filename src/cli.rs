use std::path::PathBuf;

use crate::aggregate::TimeBucket;
use crate::archive;
use crate::estimate;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketArg {
    /// One bar per calendar day
    Day,
    /// One bar per ISO week
    Week,
    /// One bar per calendar month
    Month,
}

impl From<BucketArg> for TimeBucket {
    fn from(arg: BucketArg) -> Self {
        match arg {
            BucketArg::Day => TimeBucket::Day,
            BucketArg::Week => TimeBucket::Week,
            BucketArg::Month => TimeBucket::Month,
        }
    }
}

#[derive(clap::Parser, Debug)]
#[command(
    name = "export-usage-chart",
    about = "Chart approximate token usage by role from a ChatGPT data-export archive"
)]
pub struct Args {
    /// Path to the export ZIP archive
    pub archive: PathBuf,

    /// Where to write the extracted conversation log
    /// [default: conversations.json under the system temp directory]
    #[arg(long, value_name = "PATH")]
    pub extract_to: Option<PathBuf>,

    /// Name of the conversation-log entry inside the archive
    #[arg(long, default_value = archive::DEFAULT_ENTRY)]
    pub entry: String,

    /// Write the chart to this SVG file instead of drawing it in the terminal
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Average characters per token assumed by the estimator
    #[arg(
        long,
        default_value_t = estimate::DEFAULT_CHARS_PER_TOKEN,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub chars_per_token: u32,

    /// Time bucket for aggregation: day|week|month
    #[arg(long, value_enum, default_value_t = BucketArg::Day)]
    pub bucket: BucketArg,

    /// IANA timezone used to assign messages to buckets
    #[arg(long, env = "EXPORT_CHART_TZ", default_value = "UTC")]
    pub timezone: String,

    /// Append pipeline progress and warnings to this plain-text file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log verbosity: error|warn|info|debug|trace
    #[arg(long, env = "EXPORT_CHART_LOG", default_value = "info")]
    pub log_level: String,

    /// Terminal chart width in columns
    #[arg(long, default_value_t = 80)]
    pub width: usize,
}

impl Args {
    pub fn parse() -> Self {
        <Args as clap::Parser>::parse()
    }
}
