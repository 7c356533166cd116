// Entry point and high-level CLI flow.
//
// The binary is the presentation layer over the library pipeline:
// - load the spreadsheet and echo the columns found,
// - run the analysis (any validation error stops here, localized),
// - print the summary, per-ad table, chart overview and suggestions,
// - write the CSV/JSON artefacts next to the report.
mod cli;

use ads_report::config::AppConfig;
use ads_report::i18n::{self, t, Lang};
use ads_report::output;
use ads_report::pipeline::Report;
use ads_report::reports::campaign_table;
use ads_report::{analyze, loader};
use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;
use tracing::{error, info};

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays the
/// report (or pure JSON with `--json`).
fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &Report, lang: Lang, preview_rows: usize) {
    println!("## {}\n", t(lang, "summary_header"));
    for entry in output::summary_entries(&report.summary) {
        let label = t(lang, &format!("metrics.{}", entry.key)).to_string();
        println!("- {}: {}", label, entry.formatted());
    }
    println!();

    println!("## {}\n", t(lang, "ad_performance_header"));
    let table = campaign_table(&report.campaigns, &report.capabilities);
    println!("{}\n", output::render_table(&table, preview_rows));

    println!("## {}\n", t(lang, "visual_insights_header"));
    for chart in &report.charts {
        let localized = i18n::localize_chart(lang, chart);
        let series: Vec<&str> = localized.series.iter().map(|s| s.name.as_str()).collect();
        println!("- {} ({})", localized.title, series.join(", "));
    }
    println!();
    output::preview_table_rows(&report.time_series, preview_rows);

    println!("## {}\n", t(lang, "suggestions_header"));
    if report.suggestions.is_empty() {
        println!("{}\n", t(lang, "no_suggestions"));
    } else {
        let table = i18n::suggestions_table(lang, &report.suggestions);
        println!("{}\n", output::render_table(&table, table.rows.len()));
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AppConfig::load(cli.config_path.as_deref())?;
    if let Some(lang) = &cli.lang {
        config.display.language = lang
            .parse::<Lang>()
            .map_err(anyhow::Error::msg)
            .context("invalid --lang")?;
    }
    if let Some(sheet) = cli.sheet {
        config.input.sheet = Some(sheet);
    }
    if let Some(dir) = cli.out_dir {
        config.output.directory = dir;
    }
    if cli.no_files {
        config.output.write_files = false;
    }
    let lang = config.display.language;

    let outcome = loader::load_table(&cli.input, config.input.sheet.as_deref()).and_then(|table| {
        if !cli.json {
            println!("# {}\n", t(lang, "title"));
            println!("**{}**: {}\n", t(lang, "columns_found"), table.headers.join(", "));
        }
        analyze(&table, &config.input.total_row_markers)
    });

    let report = match outcome {
        Ok(report) => report,
        Err(e) => {
            error!(kind = e.message_key(), "analysis failed: {}", e);
            eprintln!("{}", i18n::error_message(lang, &e));
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, lang, config.display.preview_rows);
    }

    if config.output.write_files {
        let written = output::write_artifacts(&config.output.directory, &report, lang)
            .with_context(|| {
                format!(
                    "failed to write reports to {}",
                    config.output.directory.display()
                )
            })?;
        for path in &written {
            info!(path = %path.display(), "written");
        }
        if !cli.json {
            println!(
                "(Full tables exported to {})",
                config.output.directory.display()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
