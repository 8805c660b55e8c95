use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use kwa_cli::config::{AuditConfig, AuditOverrides, build_detector, build_request, load_config};
use kwa_core::{AuditError, AuditReport, run_audit};
use kwa_ingest::{UploadedFile, read_table};
use kwa_map::DetectedColumns;
use kwa_model::{ColumnMapping, FilterConfig, Role};
use kwa_report::{ReportOptions, write_report};
use tracing::{debug, info, info_span};

use crate::cli::{AuditArgs, DetectArgs};
use crate::summary::{print_diagnostics, print_presets};

const DEFAULT_OUTPUT_DIR: &str = "keyword-audit";

/// Outcome of `kwa audit`.
#[derive(Debug)]
pub struct AuditRun {
    pub report: AuditReport,
    pub mapping: ColumnMapping,
    pub filters: FilterConfig,
    /// Directory the sheets went to; `None` on a dry run.
    pub output_dir: Option<PathBuf>,
    pub written: Vec<PathBuf>,
}

/// Columns found in one export by `kwa detect`.
#[derive(Debug)]
pub struct FileDetection {
    pub headers: Vec<String>,
    pub detected: DetectedColumns,
}

#[derive(Debug)]
pub struct DetectResult {
    pub file: PathBuf,
    pub outcome: Result<FileDetection>,
}

fn load_optional_config(path: Option<&Path>) -> Result<AuditConfig> {
    match path {
        Some(path) => load_config(path),
        None => Ok(AuditConfig::default()),
    }
}

fn overrides_from_args(args: &AuditArgs) -> AuditOverrides {
    let mut mapping = ColumnMapping::default();
    let columns = [
        (Role::Keyword, &args.columns.keyword),
        (Role::Position, &args.columns.position),
        (Role::Url, &args.columns.url),
        (Role::Volume, &args.columns.volume),
    ];
    for (role, column) in columns {
        if let Some(column) = column {
            mapping.set(role, column.clone());
        }
    }
    AuditOverrides {
        preset: args.preset.map(Into::into),
        mapping,
        filter: args.filter.map(Into::into),
        min_sites: args.min_sites,
        top_positions: args.top_positions,
        min_sites_in_top: args.min_sites_in_top,
        site_sheets: args.no_site_sheets.then_some(false),
    }
}

fn load_uploads(paths: &[PathBuf]) -> Result<Vec<UploadedFile>> {
    paths
        .iter()
        .map(|path| UploadedFile::from_path(path).with_context(|| format!("load {}", path.display())))
        .collect()
}

pub fn run_audit_command(args: &AuditArgs) -> Result<AuditRun> {
    let start = Instant::now();
    let config = load_optional_config(args.config.as_deref())?;
    let request = build_request(&config, &overrides_from_args(args));
    debug!(
        mapping = ?request.mapping,
        filters = ?request.filters,
        site_sheets = request.site_sheets,
        "resolved audit request"
    );

    let uploads = info_span!("ingest").in_scope(|| load_uploads(&args.files))?;
    let report = match run_audit(&uploads, &request) {
        Ok(report) => report,
        Err(AuditError::EmptyInput { diagnostics }) => {
            print_diagnostics(&diagnostics);
            return Err(anyhow!(
                "none of the {} file(s) could be normalized",
                diagnostics.len()
            ));
        }
    };

    let (output_dir, written) = if args.dry_run {
        (None, Vec::new())
    } else {
        let dir = args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let options = ReportOptions::for_report(&report);
        let written = info_span!("output", dir = %dir.display())
            .in_scope(|| write_report(&report, &dir, &options))
            .with_context(|| format!("write report to {}", dir.display()))?;
        (Some(dir), written)
    };

    info!(
        keywords = report.competition.len(),
        sites = report.dataset.sources.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "audit finished"
    );
    Ok(AuditRun {
        report,
        mapping: request.mapping,
        filters: request.filters,
        output_dir,
        written,
    })
}

fn detect_file(path: &Path, config: &AuditConfig) -> Result<FileDetection> {
    let upload = UploadedFile::from_path(path)?;
    let table = read_table(&upload)?;
    let detected = build_detector(config).detect(&table.headers);
    Ok(FileDetection {
        headers: table.headers,
        detected,
    })
}

pub fn run_detect(args: &DetectArgs) -> Result<Vec<DetectResult>> {
    let config = load_optional_config(args.config.as_deref())?;
    Ok(args
        .files
        .iter()
        .map(|path| DetectResult {
            file: path.clone(),
            outcome: detect_file(path, &config),
        })
        .collect())
}

pub fn run_presets() {
    print_presets();
}
