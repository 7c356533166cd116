use crate::types::{Capabilities, DerivedRecord, Ratio, Record};

/// Attach the derived ratios to one record.
///
/// Ratios whose source columns are absent from the document stay `None`;
/// a zero denominator yields [`Ratio::Undefined`] rather than an infinity.
pub fn derive(record: Record, caps: &Capabilities) -> DerivedRecord {
    let ctr = Ratio::compute(record.clicks, record.impressions, 100.0);
    let cpm = Ratio::compute(record.cost, record.impressions, 1000.0);
    let conversion_rate = Ratio::compute(record.conversions, record.clicks, 100.0);
    let cost_per_conversion = Ratio::compute(record.cost, record.conversions, 1.0);
    let six_second_view_rate = caps
        .six_second_rate()
        .then(|| Ratio::compute(record.views_6s, record.video_views, 100.0));
    let cost_per_landing_page_view = caps
        .landing_page_views
        .then(|| Ratio::compute(record.cost, record.landing_page_views, 1.0));

    DerivedRecord {
        record,
        ctr,
        cpm,
        conversion_rate,
        cost_per_conversion,
        six_second_view_rate,
        cost_per_landing_page_view,
    }
}

pub fn derive_all(records: Vec<Record>, caps: &Capabilities) -> Vec<DerivedRecord> {
    records.into_iter().map(|r| derive(r, caps)).collect()
}
