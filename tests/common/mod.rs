//! Shared fixtures for the pipeline integration tests.
//!
//! Builds small ad exports either in memory (`RawTable`) or as CSV files in a
//! temporary directory.
#![allow(dead_code)]

use ads_report::types::RawTable;
use std::path::PathBuf;

pub const CORE_HEADERS: [&str; 6] = [
    "Date Created",
    "Ad name",
    "Impressions",
    "Clicks (destination)",
    "Cost",
    "Conversions",
];

pub fn markers() -> Vec<String> {
    vec!["Total of 51 results".to_string()]
}

/// Table with the given headers and rows of string cells.
pub fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        headers.iter().map(|h| h.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// Three rows over two campaigns using only the required columns.
pub fn core_table() -> RawTable {
    table(
        &CORE_HEADERS,
        &[
            &["2024-05-01", "A", "100", "1", "2.50", "0"],
            &["2024-05-02", "A", "200", "1", "3.00", "1"],
            &["2024-05-01", "B", "1000", "30", "4.00", "3"],
        ],
    )
}

/// Same campaigns plus the video and landing-page columns.
pub fn full_table() -> RawTable {
    table(
        &[
            "Date Created",
            "Ad name",
            "Impressions",
            "Clicks (destination)",
            "Cost",
            "Conversions",
            "Video views",
            "6-second video views",
            "Average play time per video view",
            "Landing page views (website)",
            "Landing page view rate (website)",
        ],
        &[
            &["01/05/2024", "A", "100", "1", "2.50", "0", "80", "4", "3.5", "1", "100"],
            &["02/05/2024", "A", "200", "1", "3.00", "1", "150", "6", "4.5", "0", "0"],
            &["01/05/2024", "B", "1000", "30", "4.00", "3", "900", "300", "6", "24", "80"],
        ],
    )
}

/// Write CSV text into a fresh temp dir and return the file path with the
/// guard that keeps the directory alive.
pub fn write_csv(name: &str, contents: &str) -> (PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    (path, dir)
}
