use crate::error::{ReportError, Result};
use crate::types::RawTable;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Read an uploaded document into a header row and string cells.
///
/// Spreadsheets go through calamine (first worksheet unless `sheet` names
/// one); `.csv` exports go through the csv reader.
pub fn load_table(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let table = if ext == "csv" {
        let rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
        read_csv(rdr)?
    } else if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) {
        load_workbook(path, sheet)?
    } else if ext.is_empty() {
        return Err(ReportError::UnsupportedFormat(path.display().to_string()));
    } else {
        return Err(ReportError::UnsupportedFormat(format!(".{ext}")));
    };

    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "document loaded"
    );
    Ok(table)
}

/// Read CSV text from any reader; rows may be shorter or longer than the
/// header row.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<RawTable> {
    let rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    read_csv(rdr)
}

fn read_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<RawTable> {
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ReportError::EmptyDataset);
    }
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(RawTable::new(headers, rows))
}

fn load_workbook(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or(ReportError::EmptyDataset)??,
    };

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Err(ReportError::EmptyDataset);
    };
    let headers = header.iter().map(cell_text).collect();
    let body = rows
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    Ok(RawTable::new(headers, body))
}

/// Render a spreadsheet cell the way the normalizer expects to read it.
/// Date cells become `YYYY-MM-DD HH:MM:SS`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
    }
}
