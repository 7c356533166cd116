//! English/Arabic string resources.
//!
//! The pipeline only emits keys (metric keys, suggestion kinds, error
//! variants); everything user-facing is looked up here by dotted key.
use crate::error::ReportError;
use crate::reports::Chart;
use crate::types::{Scope, Suggestion, TextTable};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    En,
    Ar,
}

impl Lang {
    pub fn code(&self) -> &'static str {
        match self {
            Lang::En => "en",
            Lang::Ar => "ar",
        }
    }

    pub fn is_rtl(&self) -> bool {
        matches!(self, Lang::Ar)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Lang::En),
            "ar" | "arabic" => Ok(Lang::Ar),
            other => Err(format!("unsupported language '{other}' (expected en or ar)")),
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

static EN: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("title", "TikTok Ads Performance Analyzer"),
        ("columns_found", "Columns found"),
        ("missing_columns", "Missing required columns: {columns}"),
        ("invalid_dates", "Some dates in 'Date Created' could not be parsed. Please ensure all dates are valid (e.g., YYYY-MM-DD)."),
        ("invalid_rows", "Sample invalid rows:"),
        ("empty_data", "No valid data remains after filtering invalid dates."),
        ("unsupported_format", "Unsupported file type: {error}. Please upload an .xlsx, .xls or .csv file."),
        ("processing_error", "Error processing file: {error}"),
        ("processing_check", "Please check the file format and data, then try again."),
        ("summary_header", "Performance Summary"),
        ("ad_performance_header", "Ad Performance"),
        ("visual_insights_header", "Visual Insights"),
        ("suggestions_header", "Optimization Suggestions"),
        ("no_suggestions", "No specific optimization suggestions at this time."),
        ("metrics.total_impressions", "Total Impressions"),
        ("metrics.total_clicks", "Total Clicks"),
        ("metrics.total_cost", "Total Cost"),
        ("metrics.total_conversions", "Total Conversions"),
        ("metrics.total_video_views", "Total Video Views"),
        ("metrics.total_landing_page_views", "Total Landing Page Views"),
        ("metrics.avg_ctr", "Average CTR"),
        ("metrics.avg_cpm", "Average CPM"),
        ("metrics.avg_conversion_rate", "Average Conversion Rate"),
        ("metrics.avg_cost_per_conversion", "Average Cost per Conversion"),
        ("metrics.avg_6s_view_rate", "Average 6s Video View Rate"),
        ("metrics.avg_play_time", "Average Play Time per Video View"),
        ("metrics.avg_landing_page_view_rate", "Average Landing Page View Rate"),
        ("metrics.avg_cost_per_landing_page_view", "Average Cost per Landing Page View"),
        ("chart_titles.impressions_clicks", "Impressions and Clicks Over Time"),
        ("chart_titles.performance_metrics", "Performance Metrics by Ad"),
        ("chart_titles.cost_distribution", "Cost Distribution by Ad"),
        ("chart_titles.video_engagement", "Video Engagement by Ad"),
        ("chart_labels.date", "Date"),
        ("chart_labels.impressions", "Impressions"),
        ("chart_labels.clicks", "Clicks"),
        ("chart_labels.ad_name", "Ad Name"),
        ("chart_labels.percentage", "Percentage (%)"),
        ("chart_labels.cost", "Cost"),
        ("chart_labels.count", "Count"),
        ("chart_labels.ctr", "CTR (%)"),
        ("chart_labels.conversion_rate", "Conversion Rate (%)"),
        ("chart_labels.6s_view_rate", "6s Video View Rate (%)"),
        ("chart_labels.landing_page_view_rate", "Landing Page View Rate (%)"),
        ("chart_labels.video_views", "Video Views"),
        ("chart_labels.6s_video_views", "6s Video Views"),
        ("suggestions.low_ctr.issue", "Low campaign CTR"),
        ("suggestions.low_ctr.text", "Average CTR is below 1%. Test TikTok-native formats like Spark Ads or refine audience targeting."),
        ("suggestions.high_cpm.issue", "High CPM"),
        ("suggestions.high_cpm.text", "Average CPM exceeds $10. Consider CPC or oCPM bidding strategies."),
        ("suggestions.low_conversion_rate.issue", "Low conversion rate"),
        ("suggestions.low_conversion_rate.text", "Conversion rate is below 2%. Optimize landing pages for mobile and ensure clear CTAs."),
        ("suggestions.high_cost_per_conversion.issue", "High cost per conversion"),
        ("suggestions.high_cost_per_conversion.text", "Cost per conversion is high. Pause low-performing ads and reallocate budget."),
        ("suggestions.low_6s_view_rate.issue", "Low 6-second video view rate"),
        ("suggestions.low_6s_view_rate.text", "Average 6-second video view rate is below 10%. Improve video hooks in the first 3 seconds."),
        ("suggestions.low_landing_page_view_rate.issue", "Low landing page view rate"),
        ("suggestions.low_landing_page_view_rate.text", "Average landing page view rate is below 20%. Enhance ad creatives or landing page relevance."),
        ("suggestions.ad_low_ctr.issue", "Low ad CTR"),
        ("suggestions.ad_low_ctr.text", "Ad '{ad_name}': Low CTR ({ctr}%). Test new visuals or ad copy."),
        ("suggestions.ad_low_6s_view_rate.issue", "Low ad 6-second view rate"),
        ("suggestions.ad_low_6s_view_rate.text", "Ad '{ad_name}': Low 6-second view rate ({rate}%). Shorten intros or add engaging hooks."),
        ("suggestions.ad_low_landing_page_view_rate.issue", "Low ad landing page view rate"),
        ("suggestions.ad_low_landing_page_view_rate.text", "Ad '{ad_name}': Low landing page view rate ({rate}%). Ensure ad and landing page alignment."),
        ("suggestions_table.ad_name", "Ad Name"),
        ("suggestions_table.issue", "Issue"),
        ("suggestions_table.suggestion", "Suggestion"),
        ("suggestions_table.priority", "Priority"),
        ("suggestions_table.general", "General"),
        ("suggestions_table.high", "High"),
        ("suggestions_table.medium", "Medium"),
        ("suggestions_table.low", "Low"),
    ])
});

static AR: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("title", "محلل أداء إعلانات تيك توك"),
        ("columns_found", "الأعمدة الموجودة"),
        ("missing_columns", "الأعمدة المطلوبة المفقودة: {columns}"),
        ("invalid_dates", "تعذر تحليل بعض التواريخ في 'تاريخ الإنشاء'. يرجى التأكد من أن جميع التواريخ صالحة (مثل، YYYY-MM-DD)."),
        ("invalid_rows", "عينة من الصفوف غير الصالحة:"),
        ("empty_data", "لا توجد بيانات صالحة متبقية بعد تصفية التواريخ غير الصالحة."),
        ("unsupported_format", "نوع ملف غير مدعوم: {error}. يرجى رفع ملف xlsx أو xls أو csv."),
        ("processing_error", "خطأ في معالجة الملف: {error}"),
        ("processing_check", "يرجى التحقق من تنسيق الملف والبيانات، ثم حاول مرة أخرى."),
        ("summary_header", "ملخص الأداء"),
        ("ad_performance_header", "أداء الإعلان"),
        ("visual_insights_header", "رؤى بصرية"),
        ("suggestions_header", "اقتراحات التحسين"),
        ("no_suggestions", "لا توجد اقتراحات تحسين محددة في الوقت الحالي."),
        ("metrics.total_impressions", "إجمالي الانطباعات"),
        ("metrics.total_clicks", "إجمالي النقرات"),
        ("metrics.total_cost", "إجمالي التكلفة"),
        ("metrics.total_conversions", "إجمالي التحويلات"),
        ("metrics.total_video_views", "إجمالي مشاهدات الفيديو"),
        ("metrics.total_landing_page_views", "إجمالي مشاهدات صفحة الهبوط"),
        ("metrics.avg_ctr", "متوسط نسبة النقر إلى الظهور"),
        ("metrics.avg_cpm", "متوسط التكلفة لكل ألف ظهور"),
        ("metrics.avg_conversion_rate", "متوسط معدل التحويل"),
        ("metrics.avg_cost_per_conversion", "متوسط التكلفة لكل تحويل"),
        ("metrics.avg_6s_view_rate", "متوسط معدل مشاهدة الفيديو لمدة 6 ثوانٍ"),
        ("metrics.avg_play_time", "متوسط وقت التشغيل لكل مشاهدة فيديو"),
        ("metrics.avg_landing_page_view_rate", "متوسط معدل مشاهدة صفحة الهبوط"),
        ("metrics.avg_cost_per_landing_page_view", "متوسط التكلفة لكل مشاهدة صفحة هبوط"),
        ("chart_titles.impressions_clicks", "الانطباعات والنقرات عبر الزمن"),
        ("chart_titles.performance_metrics", "مقاييس الأداء حسب الإعلان"),
        ("chart_titles.cost_distribution", "توزيع التكلفة حسب الإعلان"),
        ("chart_titles.video_engagement", "تفاعل الفيديو حسب الإعلان"),
        ("chart_labels.date", "التاريخ"),
        ("chart_labels.impressions", "الانطباعات"),
        ("chart_labels.clicks", "النقرات"),
        ("chart_labels.ad_name", "اسم الإعلان"),
        ("chart_labels.percentage", "النسبة المئوية (%)"),
        ("chart_labels.cost", "التكلفة"),
        ("chart_labels.count", "العدد"),
        ("chart_labels.ctr", "نسبة النقر إلى الظهور (%)"),
        ("chart_labels.conversion_rate", "معدل التحويل (%)"),
        ("chart_labels.6s_view_rate", "معدل مشاهدة الفيديو لمدة 6 ثوانٍ (%)"),
        ("chart_labels.landing_page_view_rate", "معدل مشاهدة صفحة الهبوط (%)"),
        ("chart_labels.video_views", "مشاهدات الفيديو"),
        ("chart_labels.6s_video_views", "مشاهدات الفيديو لمدة 6 ثوانٍ"),
        ("suggestions.low_ctr.issue", "نسبة نقر إلى ظهور منخفضة للحملة"),
        ("suggestions.low_ctr.text", "متوسط نسبة النقر إلى الظهور أقل من 1%. جرب تنسيقات تيك توك الأصلية مثل Spark Ads أو قم بتحسين استهداف الجمهور."),
        ("suggestions.high_cpm.issue", "تكلفة مرتفعة لكل ألف ظهور"),
        ("suggestions.high_cpm.text", "متوسط التكلفة لكل ألف ظهور يتجاوز 10 دولارات. فكر في استراتيجيات العطاء بناءً على التكلفة لكل نقرة أو التكلفة المثلى لكل ألف ظهور."),
        ("suggestions.low_conversion_rate.issue", "معدل تحويل منخفض"),
        ("suggestions.low_conversion_rate.text", "معدل التحويل أقل من 2%. قم بتحسين صفحات الهبوط للأجهزة المحمولة وتأكد من وضوح دعوات الإجراء."),
        ("suggestions.high_cost_per_conversion.issue", "تكلفة مرتفعة لكل تحويل"),
        ("suggestions.high_cost_per_conversion.text", "تكلفة التحويل مرتفعة. أوقف الإعلانات ذات الأداء المنخفض وأعد تخصيص الميزانية."),
        ("suggestions.low_6s_view_rate.issue", "معدل مشاهدة فيديو منخفض لمدة 6 ثوانٍ"),
        ("suggestions.low_6s_view_rate.text", "متوسط معدل مشاهدة الفيديو لمدة 6 ثوانٍ أقل من 10%. حسّن خطافات الفيديو في أول 3 ثوانٍ."),
        ("suggestions.low_landing_page_view_rate.issue", "معدل مشاهدة صفحة هبوط منخفض"),
        ("suggestions.low_landing_page_view_rate.text", "متوسط معدل مشاهدة صفحة الهبوط أقل من 20%. عزز الإبداعات الإعلانية أو صلة صفحة الهبوط."),
        ("suggestions.ad_low_ctr.issue", "نسبة نقر إلى ظهور منخفضة للإعلان"),
        ("suggestions.ad_low_ctr.text", "الإعلان '{ad_name}': نسبة نقر إلى ظهور منخفضة ({ctr}%). جرب صورًا بصرية أو نصوص إعلانية جديدة."),
        ("suggestions.ad_low_6s_view_rate.issue", "معدل مشاهدة فيديو منخفض للإعلان لمدة 6 ثوانٍ"),
        ("suggestions.ad_low_6s_view_rate.text", "الإعلان '{ad_name}': معدل مشاهدة الفيديو لمدة 6 ثوانٍ منخفض ({rate}%). قم بتقصير المقدمات أو أضف خطافات جذابة."),
        ("suggestions.ad_low_landing_page_view_rate.issue", "معدل مشاهدة صفحة هبوط منخفض للإعلان"),
        ("suggestions.ad_low_landing_page_view_rate.text", "الإعلان '{ad_name}': معدل مشاهدة صفحة الهبوط منخفض ({rate}%). تأكد من توافق الإعلان وصفحة الهبوط."),
        ("suggestions_table.ad_name", "اسم الإعلان"),
        ("suggestions_table.issue", "المشكلة"),
        ("suggestions_table.suggestion", "الاقتراح"),
        ("suggestions_table.priority", "الأولوية"),
        ("suggestions_table.general", "عام"),
        ("suggestions_table.high", "عالية"),
        ("suggestions_table.medium", "متوسطة"),
        ("suggestions_table.low", "منخفضة"),
    ])
});

fn table(lang: Lang) -> &'static Table {
    match lang {
        Lang::En => &*EN,
        Lang::Ar => &*AR,
    }
}

/// Look up a string; falls back to English, then to the key itself.
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    match table(lang).get(key).or_else(|| EN.get(key)) {
        Some(s) => *s,
        None => key,
    }
}

/// Replace `{name}` placeholders in a template.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

/// User-facing message for a pipeline error, including the invalid-row
/// sample for date failures.
pub fn error_message(lang: Lang, err: &ReportError) -> String {
    let key = err.message_key();
    match err {
        ReportError::Schema { missing } => fill(t(lang, key), &[("columns", missing.join(", ").as_str())]),
        ReportError::DateParse { invalid } => {
            let mut msg = format!("{}\n{}", t(lang, key), t(lang, "invalid_rows"));
            for row in invalid {
                msg.push_str(&format!("\n  #{} {} | {}", row.row, row.campaign, row.date));
            }
            msg
        }
        ReportError::EmptyDataset => t(lang, key).to_string(),
        ReportError::UnsupportedFormat(ext) => fill(t(lang, key), &[("error", ext.as_str())]),
        ReportError::Processing(detail) => format!(
            "{}\n{}",
            fill(t(lang, key), &[("error", detail.as_str())]),
            t(lang, "processing_check")
        ),
    }
}

fn suggestion_key(kind_key: &str, part: &str) -> String {
    format!("suggestions.{kind_key}.{part}")
}

/// Localized cells for one suggestion: scope, issue, text, priority.
pub fn suggestion_cells(lang: Lang, s: &Suggestion) -> Vec<String> {
    let kind = s.kind.key();
    let issue = t(lang, &suggestion_key(kind, "issue")).to_string();
    let template = t(lang, &suggestion_key(kind, "text")).to_string();
    let value = s.value.to_string();
    let (scope, text) = match &s.scope {
        Scope::General => (
            t(lang, "suggestions_table.general").to_string(),
            template,
        ),
        Scope::Campaign(name) => (
            name.clone(),
            fill(
                &template,
                &[
                    ("ad_name", name.as_str()),
                    ("ctr", value.as_str()),
                    ("rate", value.as_str()),
                ],
            ),
        ),
    };
    let priority = t(lang, &format!("suggestions_table.{}", s.priority.key())).to_string();
    vec![scope, issue, text, priority]
}

pub fn suggestions_table(lang: Lang, suggestions: &[Suggestion]) -> TextTable {
    let headers = ["ad_name", "issue", "suggestion", "priority"]
        .iter()
        .map(|k| t(lang, &format!("suggestions_table.{k}")).to_string())
        .collect();
    TextTable {
        headers,
        rows: suggestions.iter().map(|s| suggestion_cells(lang, s)).collect(),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedSeries {
    pub name: String,
    pub secondary_axis: bool,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedChart {
    pub id: &'static str,
    pub kind: crate::reports::ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y2_label: Option<String>,
    pub categories: Vec<String>,
    pub series: Vec<LocalizedSeries>,
}

pub fn localize_chart(lang: Lang, chart: &Chart) -> LocalizedChart {
    let label = |k: &str| t(lang, &format!("chart_labels.{k}")).to_string();
    LocalizedChart {
        id: chart.id,
        kind: chart.kind,
        title: t(lang, &format!("chart_titles.{}", chart.id)).to_string(),
        x_label: label(chart.x_label_key),
        y_label: label(chart.y_label_key),
        y2_label: chart.y2_label_key.map(label),
        categories: chart.categories.clone(),
        series: chart
            .series
            .iter()
            .map(|s| LocalizedSeries {
                name: label(s.label_key),
                secondary_axis: s.secondary_axis,
                values: s.values.clone(),
            })
            .collect(),
    }
}
