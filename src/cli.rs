use clap::Parser;
use std::path::PathBuf;

/// Command-line interface for the ad performance report.
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Analyze an ad-campaign spreadsheet: summary metrics, per-ad performance and optimization suggestions",
    long_about = None
)]
pub struct Cli {
    /// Spreadsheet export to analyze (.xlsx, .xls or .csv).
    #[arg(value_name = "FILE")]
    pub input: PathBuf,
    /// Path to a TOML configuration file (defaults to ./ads-report.toml if present).
    #[arg(long, value_name = "FILE")]
    pub config_path: Option<PathBuf>,
    /// Report language: en or ar.
    #[arg(long)]
    pub lang: Option<String>,
    /// Worksheet to read instead of the first one.
    #[arg(long)]
    pub sheet: Option<String>,
    /// Directory for the CSV/JSON artefacts.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
    /// Print the report to the console only.
    #[arg(long)]
    pub no_files: bool,
    /// Print the full report as JSON on stdout instead of tables.
    #[arg(long)]
    pub json: bool,
    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
