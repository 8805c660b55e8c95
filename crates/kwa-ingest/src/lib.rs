//! Keyword export ingestion.
//!
//! Turns uploaded ranking exports (CSV or XLSX bytes) into [`RawTable`]s with
//! trimmed headers and cells, ready for column detection and normalization.
//!
//! # Example
//!
//! ```ignore
//! use kwa_ingest::{UploadedFile, read_table};
//!
//! let file = UploadedFile::from_path(Path::new("exports/site-a.csv"))?;
//! let table = read_table(&file)?;
//! println!("{} columns, {} rows", table.headers.len(), table.row_count());
//! ```

mod csv_reader;
mod error;
mod upload;
mod xlsx_reader;

use kwa_model::{FileFormat, RawTable};
use tracing::debug;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv_reader::{CsvContent, decode_text, read_csv_bytes, sniff_delimiter};
pub use xlsx_reader::read_xlsx_bytes;

// === Uploads ===
pub use upload::UploadedFile;

/// Decodes an uploaded file into a raw table according to its format.
pub fn read_table(file: &UploadedFile) -> Result<RawTable> {
    let format = file.format()?;
    let content = match format {
        FileFormat::Csv => read_csv_bytes(&file.name, &file.bytes)?,
        FileFormat::Xlsx => read_xlsx_bytes(&file.name, &file.bytes)?,
    };
    debug!(
        file = %file.name,
        format = %format,
        columns = content.headers.len(),
        rows = content.rows.len(),
        "decoded upload"
    );
    Ok(RawTable::new(
        file.name.clone(),
        format,
        content.headers,
        content.rows,
    ))
}
