//! Threshold rules that turn aggregates into optimization suggestions.
//!
//! Rules run in a fixed order: the general rules against the summary, then
//! the per-campaign rules for each campaign in table order. Every matching
//! rule fires; nothing is deduplicated.
use crate::types::{
    CampaignAggregate, Priority, Scope, Suggestion, SuggestionKind, SummaryAggregate,
};

pub const LOW_CTR: f64 = 1.0;
pub const VERY_LOW_CTR: f64 = 0.5;
pub const HIGH_CPM: f64 = 10.0;
pub const LOW_CONVERSION_RATE: f64 = 2.0;
pub const VERY_LOW_CONVERSION_RATE: f64 = 1.0;
pub const HIGH_COST_PER_CONVERSION: f64 = 50.0;
pub const LOW_6S_VIEW_RATE: f64 = 10.0;
pub const VERY_LOW_6S_VIEW_RATE: f64 = 5.0;
pub const LOW_LANDING_PAGE_VIEW_RATE: f64 = 20.0;

fn tiered(value: f64, high_below: f64) -> Priority {
    if value < high_below {
        Priority::High
    } else {
        Priority::Medium
    }
}

fn general(kind: SuggestionKind, value: f64, priority: Priority) -> Suggestion {
    Suggestion {
        scope: Scope::General,
        kind,
        value,
        priority,
    }
}

pub fn general_suggestions(summary: &SummaryAggregate) -> Vec<Suggestion> {
    let mut out = Vec::new();
    if summary.avg_ctr < LOW_CTR {
        out.push(general(
            SuggestionKind::LowCtr,
            summary.avg_ctr,
            tiered(summary.avg_ctr, VERY_LOW_CTR),
        ));
    }
    if summary.avg_cpm > HIGH_CPM {
        out.push(general(SuggestionKind::HighCpm, summary.avg_cpm, Priority::Medium));
    }
    if summary.avg_conversion_rate < LOW_CONVERSION_RATE {
        out.push(general(
            SuggestionKind::LowConversionRate,
            summary.avg_conversion_rate,
            tiered(summary.avg_conversion_rate, VERY_LOW_CONVERSION_RATE),
        ));
    }
    if summary.avg_cost_per_conversion > HIGH_COST_PER_CONVERSION {
        out.push(general(
            SuggestionKind::HighCostPerConversion,
            summary.avg_cost_per_conversion,
            Priority::High,
        ));
    }
    if let Some(rate) = summary.avg_6s_view_rate.filter(|r| *r < LOW_6S_VIEW_RATE) {
        out.push(general(
            SuggestionKind::Low6sViewRate,
            rate,
            tiered(rate, VERY_LOW_6S_VIEW_RATE),
        ));
    }
    if let Some(rate) = summary
        .avg_landing_page_view_rate
        .filter(|r| *r < LOW_LANDING_PAGE_VIEW_RATE)
    {
        out.push(general(
            SuggestionKind::LowLandingPageViewRate,
            rate,
            Priority::High,
        ));
    }
    out
}

/// Rules for one campaign. A mean that could not be computed never fires.
pub fn campaign_suggestions(c: &CampaignAggregate) -> Vec<Suggestion> {
    let scope = || Scope::Campaign(c.campaign.clone());
    let mut out = Vec::new();
    if let Some(ctr) = c.avg_ctr.filter(|v| *v < LOW_CTR) {
        out.push(Suggestion {
            scope: scope(),
            kind: SuggestionKind::AdLowCtr,
            value: ctr,
            priority: tiered(ctr, VERY_LOW_CTR),
        });
    }
    if let Some(rate) = c.avg_6s_view_rate.filter(|v| *v < LOW_6S_VIEW_RATE) {
        out.push(Suggestion {
            scope: scope(),
            kind: SuggestionKind::AdLow6sViewRate,
            value: rate,
            priority: tiered(rate, VERY_LOW_6S_VIEW_RATE),
        });
    }
    if let Some(rate) = c
        .avg_landing_page_view_rate
        .filter(|v| *v < LOW_LANDING_PAGE_VIEW_RATE)
    {
        out.push(Suggestion {
            scope: scope(),
            kind: SuggestionKind::AdLowLandingPageViewRate,
            value: rate,
            priority: Priority::High,
        });
    }
    out
}

pub fn suggest(summary: &SummaryAggregate, campaigns: &[CampaignAggregate]) -> Vec<Suggestion> {
    let mut out = general_suggestions(summary);
    for c in campaigns {
        out.extend(campaign_suggestions(c));
    }
    tracing::debug!(count = out.len(), "suggestions generated");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn healthy_summary() -> SummaryAggregate {
        SummaryAggregate {
            rows: 10,
            total_impressions: 10_000.0,
            total_clicks: 300.0,
            total_cost: 50.0,
            total_conversions: 30.0,
            total_video_views: None,
            total_landing_page_views: None,
            avg_ctr: 3.0,
            avg_cpm: 5.0,
            avg_conversion_rate: 10.0,
            avg_cost_per_conversion: 1.67,
            avg_6s_view_rate: None,
            avg_play_time: None,
            avg_landing_page_view_rate: None,
            avg_cost_per_landing_page_view: None,
        }
    }

    fn campaign(name: &str, ctr: Option<f64>) -> CampaignAggregate {
        CampaignAggregate {
            campaign: name.into(),
            rows: 1,
            impressions: 100.0,
            clicks: 1.0,
            cost: 1.0,
            conversions: 0.0,
            avg_ctr: ctr,
            avg_cpm: Some(10.0),
            avg_conversion_rate: Some(0.0),
            avg_cost_per_conversion: Some(0.0),
            video_views: None,
            views_6s: None,
            avg_6s_view_rate: None,
            avg_play_time: None,
            landing_page_views: None,
            avg_landing_page_view_rate: None,
            avg_cost_per_landing_page_view: None,
        }
    }

    #[test]
    fn healthy_summary_yields_nothing() {
        assert!(general_suggestions(&healthy_summary()).is_empty());
    }

    #[test]
    fn general_rules_fire_in_table_order() {
        let mut s = healthy_summary();
        s.avg_ctr = 0.4;
        s.avg_cpm = 12.0;
        s.avg_conversion_rate = 1.5;
        s.avg_cost_per_conversion = 80.0;
        s.avg_6s_view_rate = Some(7.0);
        s.avg_landing_page_view_rate = Some(19.99);
        let out = general_suggestions(&s);
        let kinds: Vec<_> = out.iter().map(|s| (s.kind, s.priority)).collect();
        assert_eq!(
            kinds,
            vec![
                (SuggestionKind::LowCtr, Priority::High),
                (SuggestionKind::HighCpm, Priority::Medium),
                (SuggestionKind::LowConversionRate, Priority::Medium),
                (SuggestionKind::HighCostPerConversion, Priority::High),
                (SuggestionKind::Low6sViewRate, Priority::Medium),
                (SuggestionKind::LowLandingPageViewRate, Priority::High),
            ]
        );
        assert!(out.iter().all(|s| s.scope == Scope::General));
    }

    #[test]
    fn thresholds_are_strict() {
        let mut s = healthy_summary();
        s.avg_ctr = 1.0;
        s.avg_cpm = 10.0;
        s.avg_conversion_rate = 2.0;
        s.avg_cost_per_conversion = 50.0;
        assert!(general_suggestions(&s).is_empty());
    }

    #[test]
    fn campaign_rules_follow_campaign_order() {
        let campaigns = vec![
            campaign("A", Some(0.75)),
            campaign("B", Some(0.2)),
            campaign("C", Some(4.0)),
            campaign("D", None),
        ];
        let out = suggest(&healthy_summary(), &campaigns);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].scope, Scope::Campaign("A".into()));
        assert_eq!(out[0].priority, Priority::Medium);
        assert_eq!(out[0].value, 0.75);
        assert_eq!(out[1].scope, Scope::Campaign("B".into()));
        assert_eq!(out[1].priority, Priority::High);
    }

    #[test]
    fn optional_rules_need_their_metric() {
        let mut c = campaign("A", Some(2.0));
        c.avg_6s_view_rate = Some(3.0);
        c.avg_landing_page_view_rate = Some(25.0);
        let out = campaign_suggestions(&c);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind, SuggestionKind::AdLow6sViewRate);
        assert_eq!(out[0].priority, Priority::High);
    }
}
