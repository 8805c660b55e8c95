//! CSV export of report sheets.

use std::fs::File;
use std::path::{Path, PathBuf};

use kwa_core::AuditReport;
use polars::prelude::{CsvWriter, SerWriter};
use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::sheets::{ReportOptions, Sheet, build_sheets};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ReportError + '_ {
    move |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes one sheet as `<dir>/<name>.csv`.
pub fn write_sheet(dir: &Path, sheet: &Sheet, separator: u8) -> Result<PathBuf> {
    let path = dir.join(format!("{}.csv", sheet.name));
    let mut file = File::create(&path).map_err(io_error(&path))?;
    let mut frame = sheet.frame.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .finish(&mut frame)?;
    debug!(path = %path.display(), rows = frame.height(), "wrote sheet");
    Ok(path)
}

/// Writes every sheet of `report` under `dir`, creating it when needed.
/// Returns the written paths in sheet order.
pub fn write_report(report: &AuditReport, dir: &Path, options: &ReportOptions) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;
    let sheets = build_sheets(report, options)?;
    let mut outputs = Vec::with_capacity(sheets.len());
    for sheet in &sheets {
        outputs.push(write_sheet(dir, sheet, options.separator)?);
    }
    info!(dir = %dir.display(), sheets = outputs.len(), "report written");
    Ok(outputs)
}
