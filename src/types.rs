use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use tabled::Tabled;

/// Header row plus string cells, as read from the uploaded document.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    /// Cell text, with short rows padded by empty cells.
    pub fn cell(row: &[String], idx: usize) -> &str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }
}

/// Which optional columns the document carries. Derivation, aggregation and
/// suggestion rules branch on these flags instead of probing for columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub video_views: bool,
    pub views_2s: bool,
    pub views_6s: bool,
    pub views_100pct: bool,
    pub avg_play_time: bool,
    pub landing_page_views: bool,
    pub landing_page_view_rate: bool,
}

impl Capabilities {
    /// Both video counters are needed for the 6-second view rate and the
    /// video engagement chart.
    pub fn six_second_rate(&self) -> bool {
        self.video_views && self.views_6s
    }
}

/// One advertising line item after normalization. Numeric cells that could
/// not be read are `None` and are skipped by sums and means downstream.
#[derive(Debug, Clone)]
pub struct Record {
    pub created: NaiveDateTime,
    pub campaign: String,
    pub impressions: Option<f64>,
    pub clicks: Option<f64>,
    pub cost: Option<f64>,
    pub conversions: Option<f64>,
    pub video_views: Option<f64>,
    pub views_2s: Option<f64>,
    pub views_6s: Option<f64>,
    pub views_100pct: Option<f64>,
    pub avg_play_time: Option<f64>,
    pub landing_page_views: Option<f64>,
    pub landing_page_view_rate: Option<f64>,
}

impl Record {
    pub fn date(&self) -> NaiveDate {
        self.created.date()
    }
}

/// Outcome of a derived-ratio computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ratio {
    /// An input cell was missing; skipped when averaging.
    Missing,
    /// The denominator was zero; counts as 0 when averaging.
    Undefined,
    Value(f64),
}

impl Ratio {
    /// Divide `num` by `den`, scaling by `factor`, rounded to two decimals.
    pub fn compute(num: Option<f64>, den: Option<f64>, factor: f64) -> Self {
        match (num, den) {
            (Some(n), Some(d)) if d > 0.0 => Ratio::Value(crate::util::round2(n / d * factor)),
            (Some(_), Some(_)) => Ratio::Undefined,
            _ => Ratio::Missing,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Ratio::Value(v) => Some(*v),
            _ => None,
        }
    }

    /// Contribution to a mean: undefined ratios count as zero, missing ones
    /// are left out entirely.
    pub fn for_mean(&self) -> Option<f64> {
        match self {
            Ratio::Missing => None,
            Ratio::Undefined => Some(0.0),
            Ratio::Value(v) => Some(*v),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DerivedRecord {
    pub record: Record,
    pub ctr: Ratio,
    pub cpm: Ratio,
    pub conversion_rate: Ratio,
    pub cost_per_conversion: Ratio,
    /// `None` when the video columns are absent from the document.
    pub six_second_view_rate: Option<Ratio>,
    pub cost_per_landing_page_view: Option<Ratio>,
}

/// Whole-dataset totals and means. Optional metrics are `None` when their
/// source column is absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryAggregate {
    pub rows: usize,
    pub total_impressions: f64,
    pub total_clicks: f64,
    pub total_cost: f64,
    pub total_conversions: f64,
    pub total_video_views: Option<f64>,
    pub total_landing_page_views: Option<f64>,
    pub avg_ctr: f64,
    pub avg_cpm: f64,
    pub avg_conversion_rate: f64,
    pub avg_cost_per_conversion: f64,
    pub avg_6s_view_rate: Option<f64>,
    pub avg_play_time: Option<f64>,
    pub avg_landing_page_view_rate: Option<f64>,
    pub avg_cost_per_landing_page_view: Option<f64>,
}

/// Per-campaign aggregate. Means are `None` when every row of the group was
/// missing the inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignAggregate {
    pub campaign: String,
    pub rows: usize,
    pub impressions: f64,
    pub clicks: f64,
    pub cost: f64,
    pub conversions: f64,
    pub avg_ctr: Option<f64>,
    pub avg_cpm: Option<f64>,
    pub avg_conversion_rate: Option<f64>,
    pub avg_cost_per_conversion: Option<f64>,
    pub video_views: Option<f64>,
    pub views_6s: Option<f64>,
    pub avg_6s_view_rate: Option<f64>,
    pub avg_play_time: Option<f64>,
    pub landing_page_views: Option<f64>,
    pub avg_landing_page_view_rate: Option<f64>,
    pub avg_cost_per_landing_page_view: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct TimePoint {
    #[serde(rename = "Date")]
    #[tabled(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Impressions")]
    #[tabled(rename = "Impressions")]
    pub impressions: f64,
    #[serde(rename = "Clicks")]
    #[tabled(rename = "Clicks")]
    pub clicks: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn key(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    General,
    Campaign(String),
}

/// Which rule produced a suggestion; doubles as the message key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    LowCtr,
    HighCpm,
    LowConversionRate,
    HighCostPerConversion,
    Low6sViewRate,
    LowLandingPageViewRate,
    AdLowCtr,
    AdLow6sViewRate,
    AdLowLandingPageViewRate,
}

impl SuggestionKind {
    pub fn key(&self) -> &'static str {
        match self {
            SuggestionKind::LowCtr => "low_ctr",
            SuggestionKind::HighCpm => "high_cpm",
            SuggestionKind::LowConversionRate => "low_conversion_rate",
            SuggestionKind::HighCostPerConversion => "high_cost_per_conversion",
            SuggestionKind::Low6sViewRate => "low_6s_view_rate",
            SuggestionKind::LowLandingPageViewRate => "low_landing_page_view_rate",
            SuggestionKind::AdLowCtr => "ad_low_ctr",
            SuggestionKind::AdLow6sViewRate => "ad_low_6s_view_rate",
            SuggestionKind::AdLowLandingPageViewRate => "ad_low_landing_page_view_rate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub scope: Scope,
    pub kind: SuggestionKind,
    /// The offending rate, interpolated into per-campaign messages.
    pub value: f64,
    pub priority: Priority,
}

/// Header row plus formatted cells, ready for a terminal table or CSV.
/// Column sets depend on the document's capabilities, so the shape is
/// decided at runtime rather than by a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TextTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
