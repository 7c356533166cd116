use serde::Serialize;

/// A row whose creation date could not be read, kept as a sample for the
/// validation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidRow {
    pub row: usize,
    pub campaign: String,
    pub date: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("{} creation dates could not be parsed", .invalid.len())]
    DateParse { invalid: Vec<InvalidRow> },

    #[error("no valid data remains after filtering")]
    EmptyDataset,

    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("processing error: {0}")]
    Processing(String),
}

impl ReportError {
    /// Language-neutral key used to look up the user-facing message.
    pub fn message_key(&self) -> &'static str {
        match self {
            ReportError::Schema { .. } => "missing_columns",
            ReportError::DateParse { .. } => "invalid_dates",
            ReportError::EmptyDataset => "empty_data",
            ReportError::UnsupportedFormat(_) => "unsupported_format",
            ReportError::Processing(_) => "processing_error",
        }
    }
}

impl From<std::io::Error> for ReportError {
    fn from(e: std::io::Error) -> Self {
        ReportError::Processing(e.to_string())
    }
}

impl From<csv::Error> for ReportError {
    fn from(e: csv::Error) -> Self {
        ReportError::Processing(e.to_string())
    }
}

impl From<calamine::Error> for ReportError {
    fn from(e: calamine::Error) -> Self {
        ReportError::Processing(e.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        ReportError::Processing(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;
