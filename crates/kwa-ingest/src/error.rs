//! Error types for keyword export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an uploaded file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Upload Errors ===
    /// Extension is neither csv nor xlsx.
    #[error("unsupported file format for {file}: '{extension}' (expected csv or xlsx)")]
    UnsupportedFormat { file: String, extension: String },

    /// Failed to read an upload from disk.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File contains no non-blank row.
    #[error("file is empty: {file}")]
    EmptyFile { file: String },

    // === Decoding Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Workbook could not be opened or read.
    #[error("failed to read workbook {file}: {message}")]
    Xlsx { file: String, message: String },

    /// Workbook has no worksheet to read.
    #[error("workbook {file} has no worksheet")]
    NoWorksheet { file: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
