use crate::error::Result;
use crate::metrics::derive_all;
use crate::normalize::{normalize, NormalizeReport};
use crate::reports::{self, Chart};
use crate::schema;
use crate::suggestions::suggest;
use crate::types::{
    Capabilities, CampaignAggregate, RawTable, Suggestion, SummaryAggregate, TimePoint,
};
use serde::Serialize;
use tracing::info;

/// Everything the presentation layer needs from one uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub columns_found: Vec<String>,
    pub optional_columns: Vec<String>,
    pub capabilities: Capabilities,
    pub rows: NormalizeReport,
    pub summary: SummaryAggregate,
    pub campaigns: Vec<CampaignAggregate>,
    pub time_series: Vec<TimePoint>,
    pub charts: Vec<Chart>,
    pub suggestions: Vec<Suggestion>,
}

/// Run validation, normalization, derivation, aggregation and the
/// suggestion rules over one table. The first failing stage aborts the run
/// and nothing partial is returned.
pub fn analyze(table: &RawTable, total_row_markers: &[String]) -> Result<Report> {
    let map = schema::validate(&table.headers)?;
    let caps = map.capabilities;
    let (records, rows) = normalize(table, &map, total_row_markers)?;
    let derived = derive_all(records, &caps);

    let summary = reports::summarize(&derived, &caps);
    let campaigns = reports::by_campaign(&derived, &caps);
    let time_series = reports::time_series(&derived);
    let charts = reports::charts(&time_series, &campaigns, &caps);
    let suggestions = suggest(&summary, &campaigns);

    info!(
        rows = summary.rows,
        campaigns = campaigns.len(),
        suggestions = suggestions.len(),
        "analysis complete"
    );

    Ok(Report {
        columns_found: table.headers.clone(),
        optional_columns: map
            .optional_present()
            .iter()
            .map(|c| c.display_name().to_string())
            .collect(),
        capabilities: caps,
        rows,
        summary,
        campaigns,
        time_series,
        charts,
        suggestions,
    })
}
