//! End-to-end pipeline tests over in-memory tables.

mod common;

use ads_report::types::{Priority, Scope, SuggestionKind};
use ads_report::{analyze, ReportError};

// ---------------------------------------------------------------------------
// Summary and per-campaign aggregates
// ---------------------------------------------------------------------------

#[test]
fn summary_uses_sums_and_means_of_row_rates() {
    let report = analyze(&common::core_table(), &common::markers()).unwrap();
    let s = &report.summary;
    assert_eq!(s.rows, 3);
    assert_eq!(s.total_impressions, 1300.0);
    assert_eq!(s.total_clicks, 32.0);
    assert_eq!(s.total_cost, 9.5);
    assert_eq!(s.total_conversions, 4.0);
    assert_eq!(s.avg_ctr, 1.5);
    assert_eq!(s.avg_cpm, 14.67);
    assert_eq!(s.avg_conversion_rate, 36.67);
    // 0 (undefined), 3.00 and 1.33
    assert_eq!(s.avg_cost_per_conversion, 1.44);
}

#[test]
fn summary_totals_equal_campaign_totals() {
    let report = analyze(&common::full_table(), &common::markers()).unwrap();
    let s = &report.summary;
    let impressions: f64 = report.campaigns.iter().map(|c| c.impressions).sum();
    let clicks: f64 = report.campaigns.iter().map(|c| c.clicks).sum();
    let cost: f64 = report.campaigns.iter().map(|c| c.cost).sum();
    let conversions: f64 = report.campaigns.iter().map(|c| c.conversions).sum();
    assert!((s.total_impressions - impressions).abs() < 1e-9);
    assert!((s.total_clicks - clicks).abs() < 1e-9);
    assert!((s.total_cost - cost).abs() < 1e-9);
    assert!((s.total_conversions - conversions).abs() < 1e-9);
    let video: f64 = report.campaigns.iter().filter_map(|c| c.video_views).sum();
    assert_eq!(s.total_video_views, Some(video));
}

#[test]
fn campaign_ctr_is_mean_of_row_ctrs() {
    let report = analyze(&common::core_table(), &common::markers()).unwrap();
    let names: Vec<&str> = report.campaigns.iter().map(|c| c.campaign.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(report.campaigns[0].avg_ctr, Some(0.75));
    assert_eq!(report.campaigns[0].avg_cost_per_conversion, Some(1.5));
}

#[test]
fn optional_columns_add_metrics() {
    let report = analyze(&common::full_table(), &common::markers()).unwrap();
    let s = &report.summary;
    assert_eq!(s.total_video_views, Some(1130.0));
    assert_eq!(s.total_landing_page_views, Some(25.0));
    // 5.00, 4.00, 33.33
    assert_eq!(s.avg_6s_view_rate, Some(14.11));
    assert_eq!(s.avg_play_time, Some(4.67));
    assert_eq!(s.avg_landing_page_view_rate, Some(60.0));
    // 2.50, 0 (undefined), 0.17
    assert_eq!(s.avg_cost_per_landing_page_view, Some(0.89));
    assert_eq!(
        report.optional_columns,
        vec![
            "Video views",
            "6-second video views",
            "Average play time per video view",
            "Landing page views (website)",
            "Landing page view rate (website)",
        ]
    );
    let ids: Vec<&str> = report.charts.iter().map(|c| c.id).collect();
    assert_eq!(
        ids,
        vec![
            "impressions_clicks",
            "performance_metrics",
            "cost_distribution",
            "video_engagement"
        ]
    );
    assert_eq!(report.charts[1].series.len(), 4);
}

#[test]
fn no_video_columns_means_no_video_output() {
    let report = analyze(&common::core_table(), &common::markers()).unwrap();
    let s = &report.summary;
    assert!(s.total_video_views.is_none());
    assert!(s.avg_6s_view_rate.is_none());
    assert!(report.charts.iter().all(|c| c.id != "video_engagement"));
    assert!(report
        .suggestions
        .iter()
        .all(|s| !matches!(s.kind, SuggestionKind::Low6sViewRate | SuggestionKind::AdLow6sViewRate)));
}

#[test]
fn time_series_is_daily_and_ordered() {
    let report = analyze(&common::full_table(), &common::markers()).unwrap();
    let dates: Vec<String> = report.time_series.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-05-01", "2024-05-02"]);
    assert_eq!(report.time_series[0].impressions, 1100.0);
    assert_eq!(report.time_series[0].clicks, 31.0);
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

#[test]
fn suggestions_general_first_then_campaigns() {
    let report = analyze(&common::full_table(), &common::markers()).unwrap();
    let got: Vec<(Scope, SuggestionKind, Priority)> = report
        .suggestions
        .iter()
        .map(|s| (s.scope.clone(), s.kind, s.priority))
        .collect();
    assert_eq!(
        got,
        vec![
            (Scope::General, SuggestionKind::HighCpm, Priority::Medium),
            (Scope::Campaign("A".into()), SuggestionKind::AdLowCtr, Priority::Medium),
            (Scope::Campaign("A".into()), SuggestionKind::AdLow6sViewRate, Priority::High),
        ]
    );
    assert_eq!(report.suggestions[2].value, 4.5);
}

#[test]
fn pipeline_is_deterministic() {
    let a = analyze(&common::full_table(), &common::markers()).unwrap();
    let b = analyze(&common::full_table(), &common::markers()).unwrap();
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.campaigns, b.campaigns);
    assert_eq!(a.suggestions, b.suggestions);
    assert_eq!(a.time_series, b.time_series);
}

// ---------------------------------------------------------------------------
// Row filtering and edge cases
// ---------------------------------------------------------------------------

#[test]
fn zero_impressions_never_crash() {
    let table = common::table(
        &common::CORE_HEADERS,
        &[
            &["2024-05-01", "A", "0", "0", "50", "0"],
            &["2024-05-01", "A", "100", "2", "5", "1"],
        ],
    );
    let report = analyze(&table, &common::markers()).unwrap();
    assert_eq!(report.summary.avg_ctr, 1.0);
    assert_eq!(report.summary.avg_cost_per_conversion, 2.5);
    assert!(report.summary.avg_cpm.is_finite());
}

#[test]
fn two_digit_years_land_in_the_right_century() {
    let table = common::table(
        &common::CORE_HEADERS,
        &[
            &["01/05/24", "A", "100", "1", "1", "1"],
            &["2/5/24 9:15 PM", "A", "100", "1", "1", "1"],
        ],
    );
    let report = analyze(&table, &common::markers()).unwrap();
    let dates: Vec<String> = report.time_series.iter().map(|p| p.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-05-01", "2024-05-02"]);
}

#[test]
fn total_row_is_excluded_and_clean_input_is_unchanged() {
    let clean = analyze(&common::core_table(), &common::markers()).unwrap();

    let mut with_total = common::core_table();
    with_total.rows.push(
        ["-", "Total of 51 results", "1300", "32", "9.5", "4"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let filtered = analyze(&with_total, &common::markers()).unwrap();
    assert_eq!(clean.summary, filtered.summary);
    assert_eq!(filtered.rows.total_rows_removed, 1);
    assert_eq!(clean.rows.total_rows_removed, 0);
}

#[test]
fn missing_required_columns_halt_before_normalizing() {
    let table = common::table(&["Date Created", "Ad name", "Cost"], &[&["2024-05-01", "A", "1"]]);
    match analyze(&table, &common::markers()) {
        Err(ReportError::Schema { missing }) => assert_eq!(
            missing,
            vec!["Impressions", "Clicks (destination)", "Conversions"]
        ),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn bad_dates_halt_with_sample() {
    let table = common::table(
        &common::CORE_HEADERS,
        &[
            &["2024-05-01", "A", "100", "1", "1", "1"],
            &["next tuesday", "B", "100", "1", "1", "1"],
        ],
    );
    match analyze(&table, &common::markers()) {
        Err(ReportError::DateParse { invalid }) => {
            assert_eq!(invalid.len(), 1);
            assert_eq!(invalid[0].campaign, "B");
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn only_placeholder_dates_is_empty() {
    let table = common::table(&common::CORE_HEADERS, &[&["-", "A", "100", "1", "1", "1"]]);
    assert!(matches!(
        analyze(&table, &common::markers()),
        Err(ReportError::EmptyDataset)
    ));
}

#[test]
fn unparseable_numbers_are_skipped_not_fatal() {
    let table = common::table(
        &common::CORE_HEADERS,
        &[
            &["2024-05-01", "A", "n/a", "1", "1", "1"],
            &["2024-05-01", "A", "100", "2", "1", "1"],
        ],
    );
    let report = analyze(&table, &common::markers()).unwrap();
    assert_eq!(report.summary.total_impressions, 100.0);
    // Only the second row has a CTR.
    assert_eq!(report.summary.avg_ctr, 2.0);
    assert_eq!(report.rows.coerced_cells, 1);
}

// ---------------------------------------------------------------------------
// Ratio bounds
// ---------------------------------------------------------------------------

fn messy_table() -> ads_report::types::RawTable {
    common::table(
        &[
            "Date Created",
            "Ad name",
            "Impressions",
            "Clicks (destination)",
            "Cost",
            "Conversions",
            "Video views",
            "6-second video views",
        ],
        &[
            &["2024-05-01", "A", "100", "-3", "-50", "1", "40", "-2"],
            &["2024-05-01", "A", "100", "5", "20", "0", "40", "10"],
            &["2024-05-02", "B", "0", "0", "10", "2", "0", "0"],
            &["2024-05-02", "B", "400", "40", "-1", "-2", "-5", "3"],
        ],
    )
}

#[test]
fn negative_cells_are_treated_as_missing() {
    let report = analyze(&messy_table(), &common::markers()).unwrap();
    assert_eq!(report.rows.coerced_cells, 6);
    assert_eq!(report.summary.total_clicks, 45.0);
    assert_eq!(report.summary.total_cost, 30.0);
    // 5.00, 0 (undefined) and 10.00; the row with no clicks is skipped.
    assert_eq!(report.summary.avg_ctr, 5.0);
    // 0 (undefined) and 5.00
    assert_eq!(report.summary.avg_cost_per_conversion, 2.5);
}

#[test]
fn rates_stay_in_percent_range_and_costs_non_negative() {
    use ads_report::{metrics, normalize, schema};

    let table = messy_table();
    let map = schema::validate(&table.headers).unwrap();
    let (records, _) = normalize::normalize(&table, &map, &common::markers()).unwrap();
    let derived = metrics::derive_all(records, &map.capabilities);

    let in_percent = |v: Option<f64>| v.map_or(true, |v| (0.0..=100.0).contains(&v));
    for row in &derived {
        assert!(in_percent(row.ctr.value()), "ctr {:?}", row.ctr);
        assert!(in_percent(row.conversion_rate.value()), "cvr {:?}", row.conversion_rate);
        let six = row.six_second_view_rate.and_then(|r| r.value());
        assert!(in_percent(six), "6s {six:?}");
        assert!(row.cost_per_conversion.value().map_or(true, |v| v >= 0.0));
    }

    let report = analyze(&table, &common::markers()).unwrap();
    let s = &report.summary;
    for v in [s.avg_ctr, s.avg_conversion_rate] {
        assert!((0.0..=100.0).contains(&v));
    }
    assert!(in_percent(s.avg_6s_view_rate));
    assert!(s.avg_cost_per_conversion >= 0.0);
    for c in &report.campaigns {
        assert!(in_percent(c.avg_ctr));
        assert!(in_percent(c.avg_conversion_rate));
        assert!(in_percent(c.avg_6s_view_rate));
        assert!(c.avg_cost_per_conversion.map_or(true, |v| v >= 0.0));
    }
}
