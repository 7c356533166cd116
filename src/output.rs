use crate::error::Result;
use crate::i18n::{self, Lang};
use crate::pipeline::Report;
use crate::reports::campaign_table;
use crate::types::{SummaryAggregate, TextTable};
use crate::util::{format_int, format_number};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style, Table, Tabled};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Currency,
    Percent,
    Seconds,
}

/// One headline number, keyed by a language-neutral metric key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub key: &'static str,
    pub unit: Unit,
    pub value: f64,
}

impl SummaryEntry {
    pub fn formatted(&self) -> String {
        match self.unit {
            Unit::Count => format_int(self.value.round() as i64),
            Unit::Currency => format!("${}", format_number(self.value, 2)),
            Unit::Percent => format!("{}%", format_number(self.value, 2)),
            Unit::Seconds => format!("{}s", format_number(self.value, 2)),
        }
    }
}

/// Summary metrics in display order; optional metrics appear only when
/// their source columns were present.
pub fn summary_entries(s: &SummaryAggregate) -> Vec<SummaryEntry> {
    let entry = |key: &'static str, unit: Unit, value: f64| SummaryEntry { key, unit, value };
    let mut out = vec![
        entry("total_impressions", Unit::Count, s.total_impressions),
        entry("total_clicks", Unit::Count, s.total_clicks),
        entry("total_cost", Unit::Currency, s.total_cost),
        entry("total_conversions", Unit::Count, s.total_conversions),
    ];
    if let Some(v) = s.total_video_views {
        out.push(entry("total_video_views", Unit::Count, v));
    }
    if let Some(v) = s.total_landing_page_views {
        out.push(entry("total_landing_page_views", Unit::Count, v));
    }
    out.push(entry("avg_ctr", Unit::Percent, s.avg_ctr));
    out.push(entry("avg_cpm", Unit::Currency, s.avg_cpm));
    out.push(entry("avg_conversion_rate", Unit::Percent, s.avg_conversion_rate));
    out.push(entry(
        "avg_cost_per_conversion",
        Unit::Currency,
        s.avg_cost_per_conversion,
    ));
    if let Some(v) = s.avg_6s_view_rate {
        out.push(entry("avg_6s_view_rate", Unit::Percent, v));
    }
    if let Some(v) = s.avg_play_time {
        out.push(entry("avg_play_time", Unit::Seconds, v));
    }
    if let Some(v) = s.avg_landing_page_view_rate {
        out.push(entry("avg_landing_page_view_rate", Unit::Percent, v));
    }
    if let Some(v) = s.avg_cost_per_landing_page_view {
        out.push(entry("avg_cost_per_landing_page_view", Unit::Currency, v));
    }
    out
}

/// Metric key → formatted value, as written to `summary.json`.
pub fn summary_map(s: &SummaryAggregate) -> BTreeMap<&'static str, String> {
    summary_entries(s)
        .into_iter()
        .map(|e| (e.key, e.formatted()))
        .collect()
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_table_csv(path: &Path, table: &TextTable) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&table.headers)?;
    for row in &table.rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

#[derive(Serialize)]
struct SummaryFile<'a> {
    language: Lang,
    rtl: bool,
    metrics: BTreeMap<&'static str, String>,
    raw: &'a SummaryAggregate,
}

/// Write the CSV and JSON artefacts of a report into `dir`.
pub fn write_artifacts(dir: &Path, report: &Report, lang: Lang) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join("campaign_summary.csv");
    write_table_csv(&path, &campaign_table(&report.campaigns, &report.capabilities))?;
    written.push(path);

    let path = dir.join("suggestions.csv");
    write_table_csv(&path, &i18n::suggestions_table(lang, &report.suggestions))?;
    written.push(path);

    let path = dir.join("time_series.csv");
    write_csv(&path, &report.time_series)?;
    written.push(path);

    let path = dir.join("summary.json");
    write_json(
        &path,
        &SummaryFile {
            language: lang,
            rtl: lang.is_rtl(),
            metrics: summary_map(&report.summary),
            raw: &report.summary,
        },
    )?;
    written.push(path);

    let path = dir.join("charts.json");
    let charts: Vec<_> = report
        .charts
        .iter()
        .map(|c| i18n::localize_chart(lang, c))
        .collect();
    write_json(&path, &charts)?;
    written.push(path);

    Ok(written)
}

/// Render the first `max_rows` rows as a markdown table.
pub fn render_table(table: &TextTable, max_rows: usize) -> String {
    if table.is_empty() {
        return "(no rows)".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().cloned());
    for row in table.rows.iter().take(max_rows) {
        builder.push_record(row.iter().cloned());
    }
    builder.build().with(Style::markdown()).to_string()
}

pub fn preview_table_rows<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}
