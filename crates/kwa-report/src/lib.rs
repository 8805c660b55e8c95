//! Keyword audit report generation.
//!
//! Turns an [`AuditReport`](kwa_core::AuditReport) into named Polars frames
//! (`competition`, `detailed`, `site_summary`, `interest` and optionally one
//! per site) and writes them as CSV files.

mod error;
mod sheets;
mod writer;

pub use error::{ReportError, Result};
pub use sheets::{
    COMPETITION_SHEET, DETAILED_SHEET, INTEREST_SHEET, MAX_SHEET_NAME_LEN, ReportOptions,
    SITE_SUMMARY_SHEET, Sheet, build_sheets, competition_frame, detailed_frame, interest_frame,
    position_column, site_frame, site_summary_frame, unique_sheet_name,
};
pub use writer::{write_report, write_sheet};
