//! Ad-campaign spreadsheet analysis.
//!
//! One uploaded export flows through a single linear pipeline:
//! header validation, row normalization, per-row ratio derivation,
//! aggregation (summary, per campaign, per day) and threshold-based
//! optimization suggestions. Presentation (tables, charts, language) sits
//! on top in [`output`] and [`i18n`].
//!
//! ```no_run
//! use ads_report::{loader, pipeline};
//! use std::path::Path;
//!
//! let table = loader::load_table(Path::new("ads.xlsx"), None).unwrap();
//! let report = pipeline::analyze(&table, &["Total of 51 results".to_string()]).unwrap();
//! println!("{} suggestions", report.suggestions.len());
//! ```

pub mod config;
pub mod error;
pub mod i18n;
pub mod loader;
pub mod metrics;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod reports;
pub mod schema;
pub mod suggestions;
pub mod types;
pub mod util;

pub use error::{ReportError, Result};
pub use i18n::Lang;
pub use pipeline::{analyze, Report};
