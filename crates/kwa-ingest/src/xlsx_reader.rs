//! XLSX decoding (first worksheet only).

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use tracing::debug;

use crate::csv_reader::{CsvContent, normalize_cell, normalize_header};
use crate::error::{IngestError, Result};

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => normalize_cell(value),
        Data::Int(value) => value.to_string(),
        Data::Float(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        other => normalize_cell(&other.to_string()),
    }
}

/// Reads the first worksheet of a workbook with the same row rules as CSV:
/// the first non-blank row is the header row and blank rows are skipped.
pub fn read_xlsx_bytes(file: &str, bytes: &[u8]) -> Result<CsvContent> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).map_err(|err| IngestError::Xlsx {
            file: file.to_string(),
            message: err.to_string(),
        })?;
    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(err)) => {
            return Err(IngestError::Xlsx {
                file: file.to_string(),
                message: err.to_string(),
            });
        }
        None => {
            return Err(IngestError::NoWorksheet {
                file: file.to_string(),
            });
        }
    };
    debug!(file, rows = range.height(), columns = range.width(), "reading worksheet");

    let mut rows_iter = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|value| !value.is_empty()));

    let Some(header_row) = rows_iter.next() else {
        return Err(IngestError::EmptyFile {
            file: file.to_string(),
        });
    };
    let headers: Vec<String> = header_row.iter().map(|value| normalize_header(value)).collect();
    let rows = rows_iter
        .map(|mut row| {
            row.resize(headers.len(), String::new());
            row
        })
        .collect();
    Ok(CsvContent { headers, rows })
}
