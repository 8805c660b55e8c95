//! Error types for report generation.

use std::path::PathBuf;

use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Output directory or sheet file could not be written.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frame construction or CSV serialization failed.
    #[error("failed to build report frame: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ReportError>;
