//! Audit pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Ingest**: decode every upload into a raw table
//! 2. **Normalize**: resolve columns and clean rows, one source per file
//! 3. **Aggregate**: competitive summary and detailed rows
//! 4. **Summarize**: per-site statistics and interest brackets
//!
//! A file that fails stages 1 or 2 is recorded in the diagnostics and left
//! out; the run only fails when no file survives.

use std::collections::BTreeSet;

use kwa_ingest::{UploadedFile, read_table};
use kwa_map::ColumnDetector;
use kwa_model::{ColumnMapping, FilterConfig, NormalizedDataset, ResolvedColumns};
use kwa_transform::{DroppedRows, NormalizedFile, normalize_table};
use tracing::{debug, info, info_span, warn};

use crate::competition::{CompetitiveSummary, DetailedRow, aggregate, detailed_rows};
use crate::error::{AuditError, FileError};
use crate::summary::{InterestRow, SiteSummary, interest, summarize};

/// Per-invocation audit settings.
#[derive(Debug, Clone)]
pub struct AuditRequest {
    /// Requested columns; blank roles are detected.
    pub mapping: ColumnMapping,
    pub filters: FilterConfig,
    pub detector: ColumnDetector,
    /// Whether the report should carry one sheet per site.
    pub site_sheets: bool,
}

impl Default for AuditRequest {
    fn default() -> Self {
        Self::new(ColumnMapping::default(), FilterConfig::default())
    }
}

impl AuditRequest {
    pub fn new(mapping: ColumnMapping, filters: FilterConfig) -> Self {
        Self {
            mapping,
            filters,
            detector: ColumnDetector::default(),
            site_sheets: true,
        }
    }

    #[must_use]
    pub fn with_detector(mut self, detector: ColumnDetector) -> Self {
        self.detector = detector;
        self
    }

    #[must_use]
    pub fn with_site_sheets(mut self, site_sheets: bool) -> Self {
        self.site_sheets = site_sheets;
        self
    }
}

/// What happened to one uploaded file.
#[derive(Debug)]
pub enum FileOutcome {
    Normalized {
        columns: ResolvedColumns,
        rows_read: usize,
        rows_kept: usize,
        rows_dropped: DroppedRows,
    },
    Failed {
        error: FileError,
    },
}

#[derive(Debug)]
pub struct FileDiagnostic {
    /// Uploaded file name.
    pub file: String,
    /// Site name the file's records are tagged with.
    pub source: String,
    pub outcome: FileOutcome,
}

impl FileDiagnostic {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }

    pub fn error(&self) -> Option<&FileError> {
        match &self.outcome {
            FileOutcome::Failed { error } => Some(error),
            FileOutcome::Normalized { .. } => None,
        }
    }
}

/// Everything a report renderer needs.
#[derive(Debug)]
pub struct AuditReport {
    pub competition: CompetitiveSummary,
    pub detailed: Vec<DetailedRow>,
    pub site_summaries: Vec<SiteSummary>,
    pub interest: Vec<InterestRow>,
    pub diagnostics: Vec<FileDiagnostic>,
    /// Normalized records of every surviving file.
    pub dataset: NormalizedDataset,
    pub site_sheets: bool,
}

impl AuditReport {
    pub fn failed_files(&self) -> impl Iterator<Item = &FileDiagnostic> {
        self.diagnostics.iter().filter(|diag| diag.is_failed())
    }

    pub fn has_failures(&self) -> bool {
        self.failed_files().next().is_some()
    }
}

/// Site names for `files`, in upload order. Repeated stems get `-2`, `-3`, ...
pub fn unique_source_names(files: &[UploadedFile]) -> Vec<String> {
    let mut taken = BTreeSet::new();
    files
        .iter()
        .map(|file| {
            let base = file.source_name();
            let mut candidate = base.clone();
            let mut suffix = 2;
            while taken.contains(&candidate) {
                candidate = format!("{base}-{suffix}");
                suffix += 1;
            }
            taken.insert(candidate.clone());
            candidate
        })
        .collect()
}

fn normalize_upload(
    file: &UploadedFile,
    source: &str,
    request: &AuditRequest,
) -> Result<NormalizedFile, FileError> {
    let table = read_table(file)?;
    let normalized = normalize_table(&table, &request.mapping, &request.detector, source)?;
    Ok(normalized)
}

/// Runs a full audit over `files`.
pub fn run_audit(files: &[UploadedFile], request: &AuditRequest) -> Result<AuditReport, AuditError> {
    let audit_span = info_span!("audit", files = files.len());
    let _audit_guard = audit_span.enter();

    let sources = unique_source_names(files);
    let mut dataset = NormalizedDataset::new();
    let mut diagnostics = Vec::with_capacity(files.len());

    for (file, source) in files.iter().zip(sources) {
        let file_span = info_span!("file", file = %file.name, source = %source);
        let _file_guard = file_span.enter();

        let outcome = match normalize_upload(file, &source, request) {
            Ok(normalized) => {
                let rows_kept = normalized.records.len();
                info!(
                    rows_read = normalized.rows_read,
                    rows_kept,
                    keyword_column = %normalized.columns.keyword.name,
                    position_column = %normalized.columns.position.name,
                    "file normalized"
                );
                let has_volume = normalized.has_volume();
                dataset.append(&source, normalized.records, has_volume);
                FileOutcome::Normalized {
                    columns: normalized.columns,
                    rows_read: normalized.rows_read,
                    rows_kept,
                    rows_dropped: normalized.dropped,
                }
            }
            Err(error) => {
                warn!(error = %error, "file skipped");
                FileOutcome::Failed { error }
            }
        };
        diagnostics.push(FileDiagnostic {
            file: file.name.clone(),
            source,
            outcome,
        });
    }

    if diagnostics.iter().all(FileDiagnostic::is_failed) {
        return Err(AuditError::EmptyInput { diagnostics });
    }

    let (competition, detailed) = info_span!("aggregate").in_scope(|| {
        let competition = aggregate(&dataset, &request.filters);
        let detailed = detailed_rows(&dataset, &competition);
        (competition, detailed)
    });

    let (site_summaries, interest_rows) = info_span!("summarize").in_scope(|| {
        let mut summaries = Vec::with_capacity(dataset.sources.len());
        let mut interest_rows = Vec::new();
        for source in &dataset.sources {
            summaries.push(summarize(
                source,
                dataset.records_for(source),
                dataset.has_volume,
            ));
            interest_rows.extend(interest(
                source,
                dataset.records_for(source),
                dataset.has_volume,
            ));
        }
        (summaries, interest_rows)
    });

    debug!(
        records = dataset.len(),
        sources = dataset.sources.len(),
        keywords = competition.len(),
        "audit complete"
    );

    Ok(AuditReport {
        competition,
        detailed,
        site_summaries,
        interest: interest_rows,
        diagnostics,
        dataset,
        site_sheets: request.site_sheets,
    })
}
