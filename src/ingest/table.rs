use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use tracing::debug;

use crate::error::{AppError, Result};

/// The two encodings a report can arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Spreadsheet,
}

impl TableFormat {
    /// `.csv` (any case) is read as CSV; everything else is handed to the
    /// spreadsheet reader.
    pub fn from_path(path: &Path) -> Self {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            TableFormat::Csv
        } else {
            TableFormat::Spreadsheet
        }
    }
}

/// A header row plus string cells. Rows may be shorter than the header;
/// missing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Lower-case and trim every header (and drop a UTF-8 BOM if the export
    /// left one on the first column).
    pub fn normalize_headers(&mut self) {
        for header in &mut self.headers {
            *header = header.trim_start_matches('\u{feff}').trim().to_lowercase();
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn cell<'a>(row: &'a [String], idx: Option<usize>) -> &'a str {
        idx.and_then(|i| row.get(i)).map(String::as_str).unwrap_or("")
    }
}

pub fn read_table(bytes: &[u8], format: TableFormat) -> Result<Table> {
    let mut table = match format {
        TableFormat::Csv => read_csv(bytes)?,
        TableFormat::Spreadsheet => read_spreadsheet(bytes)?,
    };
    if table.headers.is_empty() {
        return Err(AppError::UnsupportedFormat(
            "file has no header row".to_string(),
        ));
    }
    table.normalize_headers();
    table
        .rows
        .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    debug!(
        columns = table.headers.len(),
        rows = table.rows.len(),
        "table parsed"
    );
    Ok(table)
}

pub fn read_table_file(path: &Path) -> Result<Table> {
    let bytes = std::fs::read(path)?;
    read_table(&bytes, TableFormat::from_path(path))
}

fn read_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(Table { headers, rows })
}

fn read_spreadsheet(bytes: &[u8]) -> Result<Table> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(AppError::UnsupportedFormat(
            "workbook has no worksheets".to_string(),
        ));
    };
    let range = workbook.worksheet_range(&sheet)?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();
    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}
