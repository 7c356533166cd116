//! Header validation: required columns, optional-column capabilities.
use crate::error::{ReportError, Result};
use crate::types::Capabilities;
use std::collections::HashMap;

/// Every column the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    DateCreated,
    AdName,
    Impressions,
    Clicks,
    Cost,
    Conversions,
    VideoViews,
    Views2s,
    Views6s,
    Views100Pct,
    AvgPlayTime,
    LandingPageViews,
    LandingPageViewRate,
}

pub const REQUIRED: [Column; 6] = [
    Column::DateCreated,
    Column::AdName,
    Column::Impressions,
    Column::Clicks,
    Column::Cost,
    Column::Conversions,
];

pub const OPTIONAL: [Column; 7] = [
    Column::VideoViews,
    Column::Views2s,
    Column::Views6s,
    Column::Views100Pct,
    Column::AvgPlayTime,
    Column::LandingPageViews,
    Column::LandingPageViewRate,
];

impl Column {
    /// Header as the ad platform exports it.
    pub fn display_name(&self) -> &'static str {
        match self {
            Column::DateCreated => "Date Created",
            Column::AdName => "Ad name",
            Column::Impressions => "Impressions",
            Column::Clicks => "Clicks (destination)",
            Column::Cost => "Cost",
            Column::Conversions => "Conversions",
            Column::VideoViews => "Video views",
            Column::Views2s => "2-second video views",
            Column::Views6s => "6-second video views",
            Column::Views100Pct => "Video views at 100%",
            Column::AvgPlayTime => "Average play time per video view",
            Column::LandingPageViews => "Landing page views (website)",
            Column::LandingPageViewRate => "Landing page view rate (website)",
        }
    }

    fn normalized(&self) -> String {
        normalize_header(self.display_name())
    }
}

pub fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase()
}

/// Resolved positions of the known columns in a document's header row.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    positions: HashMap<Column, usize>,
    pub capabilities: Capabilities,
}

impl ColumnMap {
    pub fn index(&self, col: Column) -> Option<usize> {
        self.positions.get(&col).copied()
    }

    /// Optional columns that were found, in canonical order.
    pub fn optional_present(&self) -> Vec<Column> {
        OPTIONAL
            .iter()
            .copied()
            .filter(|c| self.positions.contains_key(c))
            .collect()
    }
}

/// Match headers case- and whitespace-insensitively against the known
/// columns. Fails with the display names of every missing required column.
///
/// When a header appears twice the first occurrence wins.
pub fn validate(headers: &[String]) -> Result<ColumnMap> {
    let mut by_name: HashMap<String, usize> = HashMap::new();
    for (idx, h) in headers.iter().enumerate() {
        by_name.entry(normalize_header(h)).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED
        .iter()
        .filter(|c| !by_name.contains_key(&c.normalized()))
        .map(|c| c.display_name().to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ReportError::Schema { missing });
    }

    let mut positions = HashMap::new();
    for col in REQUIRED.iter().chain(OPTIONAL.iter()) {
        if let Some(idx) = by_name.get(&col.normalized()) {
            positions.insert(*col, *idx);
        }
    }

    let has = |c: Column| positions.contains_key(&c);
    let capabilities = Capabilities {
        video_views: has(Column::VideoViews),
        views_2s: has(Column::Views2s),
        views_6s: has(Column::Views6s),
        views_100pct: has(Column::Views100Pct),
        avg_play_time: has(Column::AvgPlayTime),
        landing_page_views: has(Column::LandingPageViews),
        landing_page_view_rate: has(Column::LandingPageViewRate),
    };

    tracing::debug!(
        columns = headers.len(),
        optional = positions.len() - REQUIRED.len(),
        "schema validated"
    );
    Ok(ColumnMap {
        positions,
        capabilities,
    })
}
