use std::collections::HashMap;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use indexmap::IndexMap;
use serde::Serialize;

use super::SpreadsheetError;

/// Largest integer a double represents exactly.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

/// A decoded spreadsheet row: header text to cell value, in column order.
/// Empty cells are not present.
pub type RowRecord = IndexMap<String, CellValue>;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Int(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    fn from_data(cell: &Data) -> Option<Self> {
        match cell {
            Data::String(s) => Some(CellValue::Text(s.clone())),
            Data::Int(i) => Some(CellValue::Int(*i)),
            Data::Float(f) => Some(Self::from_number(*f)),
            Data::Bool(b) => Some(CellValue::Bool(*b)),
            // Dates keep their serial number, as spreadsheet tools export them
            Data::DateTime(dt) => Some(Self::from_number(dt.as_f64())),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Some(CellValue::Text(s.clone())),
            Data::Error(_) | Data::Empty => None,
        }
    }

    /// Workbooks store every number as a double; whole values come back as integers.
    fn from_number(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_FLOAT_INT {
            CellValue::Int(value as i64)
        } else {
            CellValue::Float(value)
        }
    }
}

/// Opens the workbook at `path` and decodes its first sheet.
pub fn read_first_sheet(path: &Path) -> Result<Vec<RowRecord>, SpreadsheetError> {
    let bytes = fs::read(path)?;
    read_first_sheet_from_bytes(bytes)
}

/// Decodes the first sheet (by position) of an in-memory workbook. The format is
/// detected from the content, so xls, xlsx, xlsb and ods are all accepted.
pub fn read_first_sheet_from_bytes(bytes: Vec<u8>) -> Result<Vec<RowRecord>, SpreadsheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoSheets)??;

    tracing::debug!(
        "First sheet dimensions: {}x{}",
        range.height(),
        range.width()
    );

    Ok(range_to_records(&range))
}

/// The first row of the used range is the header row; every following non-blank row
/// becomes one record.
pub fn range_to_records(range: &Range<Data>) -> Vec<RowRecord> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers = unique_headers(header_row);

    rows.filter_map(|row| {
        let record: RowRecord = headers
            .iter()
            .zip(row.iter())
            .filter_map(|(header, cell)| {
                CellValue::from_data(cell).map(|value| (header.clone(), value))
            })
            .collect();

        (!record.is_empty()).then_some(record)
    })
    .collect()
}

fn unique_headers(header_row: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    header_row
        .iter()
        .map(|cell| {
            let base = match cell {
                Data::Empty => String::new(),
                other => other.as_string().unwrap_or_else(|| other.to_string()),
            };
            let base = if base.is_empty() {
                "__EMPTY".to_string()
            } else {
                base
            };

            let count = seen.entry(base.clone()).or_insert(0);
            let header = if *count == 0 {
                base
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            header
        })
        .collect()
}
