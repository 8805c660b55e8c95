//! Error types for the audit pipeline.

use kwa_ingest::IngestError;
use kwa_model::NormalizeError;
use thiserror::Error;

use crate::pipeline::FileDiagnostic;

/// Why a single uploaded file was excluded from the run.
#[derive(Debug, Error)]
pub enum FileError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Errors that abort a whole audit run.
#[derive(Debug, Error)]
pub enum AuditError {
    /// No uploaded file could be normalized.
    #[error("no usable input: {} file(s) uploaded, none could be normalized", .diagnostics.len())]
    EmptyInput { diagnostics: Vec<FileDiagnostic> },
}
