use crate::types::{
    Capabilities, CampaignAggregate, DerivedRecord, Ratio, SummaryAggregate, TextTable, TimePoint,
};
use crate::util::{format_int, format_number, mean_present, round2, sum_present};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

fn mean_of<F>(rows: &[&DerivedRecord], f: F) -> Option<f64>
where
    F: Fn(&DerivedRecord) -> Option<Ratio>,
{
    mean_present(rows.iter().map(|r| f(r).and_then(|ratio| ratio.for_mean()))).map(round2)
}

fn sum_of<F>(rows: &[&DerivedRecord], f: F) -> f64
where
    F: Fn(&DerivedRecord) -> Option<f64>,
{
    round2(sum_present(rows.iter().map(|r| f(r))))
}

fn mean_raw<F>(rows: &[&DerivedRecord], f: F) -> Option<f64>
where
    F: Fn(&DerivedRecord) -> Option<f64>,
{
    mean_present(rows.iter().map(|r| f(r))).map(round2)
}

/// Whole-dataset totals and means.
///
/// Rate metrics are means of the per-row rates, not ratios of the totals.
/// Undefined per-row rates count as zero; a mean with nothing to average
/// reports zero.
pub fn summarize(data: &[DerivedRecord], caps: &Capabilities) -> SummaryAggregate {
    let rows: Vec<&DerivedRecord> = data.iter().collect();
    let rows = rows.as_slice();
    SummaryAggregate {
        rows: rows.len(),
        total_impressions: sum_of(rows, |r| r.record.impressions),
        total_clicks: sum_of(rows, |r| r.record.clicks),
        total_cost: sum_of(rows, |r| r.record.cost),
        total_conversions: sum_of(rows, |r| r.record.conversions),
        total_video_views: caps
            .video_views
            .then(|| sum_of(rows, |r| r.record.video_views)),
        total_landing_page_views: caps
            .landing_page_views
            .then(|| sum_of(rows, |r| r.record.landing_page_views)),
        avg_ctr: mean_of(rows, |r| Some(r.ctr)).unwrap_or(0.0),
        avg_cpm: mean_of(rows, |r| Some(r.cpm)).unwrap_or(0.0),
        avg_conversion_rate: mean_of(rows, |r| Some(r.conversion_rate)).unwrap_or(0.0),
        avg_cost_per_conversion: mean_of(rows, |r| Some(r.cost_per_conversion)).unwrap_or(0.0),
        avg_6s_view_rate: caps
            .six_second_rate()
            .then(|| mean_of(rows, |r| r.six_second_view_rate).unwrap_or(0.0)),
        avg_play_time: caps
            .avg_play_time
            .then(|| mean_raw(rows, |r| r.record.avg_play_time).unwrap_or(0.0)),
        avg_landing_page_view_rate: caps
            .landing_page_view_rate
            .then(|| mean_raw(rows, |r| r.record.landing_page_view_rate).unwrap_or(0.0)),
        avg_cost_per_landing_page_view: caps
            .landing_page_views
            .then(|| mean_of(rows, |r| r.cost_per_landing_page_view).unwrap_or(0.0)),
    }
}

/// One aggregate per distinct campaign name, ordered by name.
pub fn by_campaign(data: &[DerivedRecord], caps: &Capabilities) -> Vec<CampaignAggregate> {
    let mut groups: BTreeMap<&str, Vec<&DerivedRecord>> = BTreeMap::new();
    for r in data {
        groups.entry(r.record.campaign.as_str()).or_default().push(r);
    }

    groups
        .into_iter()
        .map(|(name, rows)| {
            let rows = rows.as_slice();
            CampaignAggregate {
                campaign: name.to_string(),
                rows: rows.len(),
                impressions: sum_of(rows, |r| r.record.impressions),
                clicks: sum_of(rows, |r| r.record.clicks),
                cost: sum_of(rows, |r| r.record.cost),
                conversions: sum_of(rows, |r| r.record.conversions),
                avg_ctr: mean_of(rows, |r| Some(r.ctr)),
                avg_cpm: mean_of(rows, |r| Some(r.cpm)),
                avg_conversion_rate: mean_of(rows, |r| Some(r.conversion_rate)),
                avg_cost_per_conversion: mean_of(rows, |r| Some(r.cost_per_conversion)),
                video_views: caps
                    .video_views
                    .then(|| sum_of(rows, |r| r.record.video_views)),
                views_6s: caps.views_6s.then(|| sum_of(rows, |r| r.record.views_6s)),
                avg_6s_view_rate: mean_of(rows, |r| r.six_second_view_rate),
                avg_play_time: caps
                    .avg_play_time
                    .then(|| mean_raw(rows, |r| r.record.avg_play_time))
                    .flatten(),
                landing_page_views: caps
                    .landing_page_views
                    .then(|| sum_of(rows, |r| r.record.landing_page_views)),
                avg_landing_page_view_rate: caps
                    .landing_page_view_rate
                    .then(|| mean_raw(rows, |r| r.record.landing_page_view_rate))
                    .flatten(),
                avg_cost_per_landing_page_view: mean_of(rows, |r| r.cost_per_landing_page_view),
            }
        })
        .collect()
}

/// Impressions and clicks summed per calendar day, oldest first.
pub fn time_series(data: &[DerivedRecord]) -> Vec<TimePoint> {
    let mut days: BTreeMap<NaiveDate, (Vec<Option<f64>>, Vec<Option<f64>>)> = BTreeMap::new();
    for r in data {
        let e = days.entry(r.record.date()).or_default();
        e.0.push(r.record.impressions);
        e.1.push(r.record.clicks);
    }
    days.into_iter()
        .map(|(date, (impressions, clicks))| TimePoint {
            date,
            impressions: sum_present(impressions),
            clicks: sum_present(clicks),
        })
        .collect()
}

fn count_cell(v: f64) -> String {
    format_int(v.round() as i64)
}

fn rate_cell(v: Option<f64>) -> String {
    v.map(|v| format_number(v, 2)).unwrap_or_default()
}

/// Campaign aggregates as a table whose columns mirror the capabilities.
pub fn campaign_table(rows: &[CampaignAggregate], caps: &Capabilities) -> TextTable {
    let mut headers: Vec<&str> = vec![
        "Ad name",
        "Impressions",
        "Clicks (destination)",
        "Cost",
        "Conversions",
        "CTR (destination)",
        "CPM",
        "Conversion rate (CVR)",
        "Cost per conversion",
    ];
    if caps.video_views {
        headers.push("Video views");
    }
    if caps.views_6s {
        headers.push("6-second video views");
    }
    if caps.six_second_rate() {
        headers.push("6-second view rate");
    }
    if caps.avg_play_time {
        headers.push("Average play time per video view");
    }
    if caps.landing_page_views {
        headers.push("Landing page views (website)");
    }
    if caps.landing_page_view_rate {
        headers.push("Landing page view rate (website)");
    }
    if caps.landing_page_views {
        headers.push("Cost per landing page view");
    }

    let body = rows
        .iter()
        .map(|c| {
            let mut cells = vec![
                c.campaign.clone(),
                count_cell(c.impressions),
                count_cell(c.clicks),
                format_number(c.cost, 2),
                count_cell(c.conversions),
                rate_cell(c.avg_ctr),
                rate_cell(c.avg_cpm),
                rate_cell(c.avg_conversion_rate),
                rate_cell(c.avg_cost_per_conversion),
            ];
            if let Some(v) = c.video_views {
                cells.push(count_cell(v));
            }
            if let Some(v) = c.views_6s {
                cells.push(count_cell(v));
            }
            if caps.six_second_rate() {
                cells.push(rate_cell(c.avg_6s_view_rate));
            }
            if caps.avg_play_time {
                cells.push(rate_cell(c.avg_play_time));
            }
            if let Some(v) = c.landing_page_views {
                cells.push(count_cell(v));
            }
            if caps.landing_page_view_rate {
                cells.push(rate_cell(c.avg_landing_page_view_rate));
            }
            if caps.landing_page_views {
                cells.push(rate_cell(c.avg_cost_per_landing_page_view));
            }
            cells
        })
        .collect();

    TextTable {
        headers: headers.into_iter().map(String::from).collect(),
        rows: body,
    }
}

// ---------------------------------------------------------------------------
// Chart datasets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    DualAxisLine,
    GroupedBar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label_key: &'static str,
    /// Plot against the secondary y axis.
    pub secondary_axis: bool,
    pub values: Vec<Option<f64>>,
}

/// Language-neutral chart data. Titles and labels are `chart_titles.*` and
/// `chart_labels.*` keys resolved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub id: &'static str,
    pub kind: ChartKind,
    pub x_label_key: &'static str,
    pub y_label_key: &'static str,
    pub y2_label_key: Option<&'static str>,
    pub categories: Vec<String>,
    pub series: Vec<Series>,
}

fn series(label_key: &'static str, values: Vec<Option<f64>>) -> Series {
    Series {
        label_key,
        secondary_axis: false,
        values,
    }
}

pub fn charts(
    points: &[TimePoint],
    campaigns: &[CampaignAggregate],
    caps: &Capabilities,
) -> Vec<Chart> {
    let mut out = Vec::new();
    let names: Vec<String> = campaigns.iter().map(|c| c.campaign.clone()).collect();

    if !points.is_empty() {
        out.push(Chart {
            id: "impressions_clicks",
            kind: ChartKind::DualAxisLine,
            x_label_key: "date",
            y_label_key: "impressions",
            y2_label_key: Some("clicks"),
            categories: points.iter().map(|p| p.date.to_string()).collect(),
            series: vec![
                series("impressions", points.iter().map(|p| Some(p.impressions)).collect()),
                Series {
                    label_key: "clicks",
                    secondary_axis: true,
                    values: points.iter().map(|p| Some(p.clicks)).collect(),
                },
            ],
        });
    }

    let mut rates = vec![
        series("ctr", campaigns.iter().map(|c| c.avg_ctr).collect()),
        series(
            "conversion_rate",
            campaigns.iter().map(|c| c.avg_conversion_rate).collect(),
        ),
    ];
    if caps.six_second_rate() {
        rates.push(series(
            "6s_view_rate",
            campaigns.iter().map(|c| c.avg_6s_view_rate).collect(),
        ));
    }
    if caps.landing_page_view_rate {
        rates.push(series(
            "landing_page_view_rate",
            campaigns
                .iter()
                .map(|c| c.avg_landing_page_view_rate)
                .collect(),
        ));
    }
    out.push(Chart {
        id: "performance_metrics",
        kind: ChartKind::GroupedBar,
        x_label_key: "ad_name",
        y_label_key: "percentage",
        y2_label_key: None,
        categories: names.clone(),
        series: rates,
    });

    if !campaigns.is_empty() {
        out.push(Chart {
            id: "cost_distribution",
            kind: ChartKind::Pie,
            x_label_key: "ad_name",
            y_label_key: "cost",
            y2_label_key: None,
            categories: names.clone(),
            series: vec![series("cost", campaigns.iter().map(|c| Some(c.cost)).collect())],
        });
    }

    if caps.six_second_rate() {
        out.push(Chart {
            id: "video_engagement",
            kind: ChartKind::GroupedBar,
            x_label_key: "ad_name",
            y_label_key: "count",
            y2_label_key: None,
            categories: names,
            series: vec![
                series("video_views", campaigns.iter().map(|c| c.video_views).collect()),
                series("6s_video_views", campaigns.iter().map(|c| c.views_6s).collect()),
            ],
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_all;
    use crate::types::Record;

    fn record(day: u32, campaign: &str, impressions: f64, clicks: f64, cost: f64, conv: f64) -> Record {
        Record {
            created: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            campaign: campaign.into(),
            impressions: Some(impressions),
            clicks: Some(clicks),
            cost: Some(cost),
            conversions: Some(conv),
            video_views: None,
            views_2s: None,
            views_6s: None,
            views_100pct: None,
            avg_play_time: None,
            landing_page_views: None,
            landing_page_view_rate: None,
        }
    }

    fn sample() -> Vec<DerivedRecord> {
        derive_all(
            vec![
                record(2, "A", 100.0, 1.0, 10.0, 1.0),
                record(1, "A", 200.0, 1.0, 20.0, 0.0),
                record(1, "B", 1000.0, 30.0, 5.0, 3.0),
            ],
            &Capabilities::default(),
        )
    }

    #[test]
    fn campaign_rates_are_means_of_row_rates() {
        let campaigns = by_campaign(&sample(), &Capabilities::default());
        assert_eq!(campaigns.len(), 2);
        let a = &campaigns[0];
        assert_eq!(a.campaign, "A");
        assert_eq!(a.rows, 2);
        assert_eq!(a.avg_ctr, Some(0.75));
        // 10/1 and the undefined 20/0 counted as 0.
        assert_eq!(a.avg_cost_per_conversion, Some(5.0));
        assert_eq!(campaigns[1].avg_ctr, Some(3.0));
    }

    #[test]
    fn summary_totals_match_campaign_totals() {
        let data = sample();
        let caps = Capabilities::default();
        let summary = summarize(&data, &caps);
        let campaigns = by_campaign(&data, &caps);
        let impressions: f64 = campaigns.iter().map(|c| c.impressions).sum();
        let clicks: f64 = campaigns.iter().map(|c| c.clicks).sum();
        let cost: f64 = campaigns.iter().map(|c| c.cost).sum();
        let conversions: f64 = campaigns.iter().map(|c| c.conversions).sum();
        assert_eq!(summary.total_impressions, impressions);
        assert_eq!(summary.total_clicks, clicks);
        assert_eq!(summary.total_cost, cost);
        assert_eq!(summary.total_conversions, conversions);
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.avg_ctr, 1.5);
        assert!(summary.total_video_views.is_none());
        assert!(summary.avg_6s_view_rate.is_none());
    }

    #[test]
    fn time_series_groups_by_day_in_order() {
        let points = time_series(&sample());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(points[0].impressions, 1200.0);
        assert_eq!(points[0].clicks, 31.0);
        assert_eq!(points[1].impressions, 100.0);
    }

    #[test]
    fn charts_skip_video_without_columns() {
        let data = sample();
        let caps = Capabilities::default();
        let campaigns = by_campaign(&data, &caps);
        let charts = charts(&time_series(&data), &campaigns, &caps);
        let ids: Vec<&str> = charts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["impressions_clicks", "performance_metrics", "cost_distribution"]);
        assert_eq!(charts[1].series.len(), 2);
    }

    #[test]
    fn campaign_table_mirrors_capabilities() {
        let data = sample();
        let caps = Capabilities {
            landing_page_views: true,
            ..Default::default()
        };
        let table = campaign_table(&by_campaign(&data, &caps), &caps);
        assert_eq!(table.headers.len(), 11);
        assert!(table.rows.iter().all(|r| r.len() == table.headers.len()));
        assert_eq!(table.rows[1][1], "1,000");
    }
}
