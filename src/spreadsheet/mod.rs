//! Spreadsheet decoding for uploaded workbooks.
//!
//! [`reader`] turns the first sheet of a workbook into header-keyed [`RowRecord`]s and
//! [`mapping`] pulls the typed upload rows out of those records.

pub mod mapping;
pub mod reader;

pub use mapping::{EmployeeInfoRow, ItemRow};
pub use reader::{read_first_sheet, read_first_sheet_from_bytes, CellValue, RowRecord};

use thiserror::Error;

/// Failures while opening or decoding a workbook.
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Workbook contains no sheets")]
    NoSheets,

    #[error("Spreadsheet worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
