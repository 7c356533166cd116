use crate::error::{InvalidRow, ReportError, Result};
use crate::schema::{Column, ColumnMap};
use crate::types::{RawTable, Record};
use crate::util::{parse_datetime_flexible, parse_f64_safe};
use serde::Serialize;
use tracing::{debug, warn};

/// How many unparseable rows are echoed back to the user.
pub const INVALID_SAMPLE: usize = 5;

/// Placeholder the ad platform writes into empty date cells.
const DATE_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub total_rows: usize,
    pub total_rows_removed: usize,
    pub missing_dates: usize,
    pub coerced_cells: usize,
    pub kept_rows: usize,
}

/// Whether a campaign name marks the export's synthetic totals row.
///
/// Matches the configured markers exactly (after trimming) and the
/// generated `Total of <N> results` label for any `N`.
pub fn is_total_row(name: &str, markers: &[String]) -> bool {
    let name = name.trim();
    if markers.iter().any(|m| m.trim() == name) {
        return true;
    }
    name.strip_prefix("Total of ")
        .and_then(|rest| rest.strip_suffix(" results"))
        .map(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

/// Turn raw rows into typed records.
///
/// Rows are removed when they are the totals row or carry no date. Any
/// remaining date that cannot be parsed fails the whole batch with a sample
/// of offending rows. Unreadable or negative numeric cells become `None`.
pub fn normalize(
    table: &RawTable,
    map: &ColumnMap,
    total_row_markers: &[String],
) -> Result<(Vec<Record>, NormalizeReport)> {
    let mut report = NormalizeReport {
        total_rows: table.rows.len(),
        ..Default::default()
    };

    let idx = |c: Column| map.index(c);
    let cell = |row: &[String], c: Column| -> Option<String> {
        idx(c).map(|i| RawTable::cell(row, i).trim().to_string())
    };

    let mut records = Vec::new();
    let mut invalid: Vec<InvalidRow> = Vec::new();
    let mut invalid_count = 0usize;

    for (row_no, row) in table.rows.iter().enumerate() {
        let campaign = cell(row, Column::AdName).unwrap_or_default();
        if is_total_row(&campaign, total_row_markers) {
            report.total_rows_removed += 1;
            continue;
        }

        let raw_date = cell(row, Column::DateCreated).unwrap_or_default();
        if raw_date.is_empty() || raw_date == DATE_PLACEHOLDER {
            report.missing_dates += 1;
            continue;
        }
        let Some(created) = parse_datetime_flexible(&raw_date) else {
            invalid_count += 1;
            if invalid.len() < INVALID_SAMPLE {
                invalid.push(InvalidRow {
                    // 1-based, counting the header row.
                    row: row_no + 2,
                    campaign,
                    date: raw_date,
                });
            }
            continue;
        };

        let mut number = |c: Column| -> Option<f64> {
            let raw = cell(row, c)?;
            // Counters and costs are never negative.
            let parsed = parse_f64_safe(Some(&raw)).filter(|v| *v >= 0.0);
            if parsed.is_none() && !raw.is_empty() {
                report.coerced_cells += 1;
            }
            parsed
        };

        records.push(Record {
            created,
            impressions: number(Column::Impressions),
            clicks: number(Column::Clicks),
            cost: number(Column::Cost),
            conversions: number(Column::Conversions),
            video_views: number(Column::VideoViews),
            views_2s: number(Column::Views2s),
            views_6s: number(Column::Views6s),
            views_100pct: number(Column::Views100Pct),
            avg_play_time: number(Column::AvgPlayTime),
            landing_page_views: number(Column::LandingPageViews),
            landing_page_view_rate: number(Column::LandingPageViewRate),
            campaign,
        });
    }

    if !invalid.is_empty() {
        warn!(count = invalid_count, "unparseable creation dates");
        return Err(ReportError::DateParse { invalid });
    }
    if records.is_empty() {
        return Err(ReportError::EmptyDataset);
    }
    if report.missing_dates > 0 {
        warn!(rows = report.missing_dates, "dropped rows without a creation date");
    }
    if report.coerced_cells > 0 {
        warn!(cells = report.coerced_cells, "non-numeric cells treated as missing");
    }

    report.kept_rows = records.len();
    debug!(
        total = report.total_rows,
        kept = report.kept_rows,
        totals_removed = report.total_rows_removed,
        "rows normalized"
    );
    Ok((records, report))
}
