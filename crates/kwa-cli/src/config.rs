//! Audit configuration: JSON file settings layered under command-line flags.
//!
//! Precedence, lowest first: built-in defaults, the `--config` file, flags.

use std::path::Path;

use anyhow::{Context, Result};
use kwa_core::AuditRequest;
use kwa_map::{ColumnDetector, SynonymOverrides, SynonymTable};
use kwa_model::{ColumnMapping, FilterConfig, FilterPreset, MappingPreset};
use serde::{Deserialize, Serialize};

/// Contents of a `--config` file.
///
/// ```json
/// {
///   "preset": "semrush",
///   "mapping": { "url": "Landing page" },
///   "filter": "two-sites-top10",
///   "synonyms": { "volume": ["impressions"] },
///   "site_sheets": false
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuditConfig {
    pub preset: Option<MappingPreset>,
    /// Column names applied over the preset.
    pub mapping: ColumnMapping,
    pub filter: Option<FilterPreset>,
    /// Explicit thresholds; win over `filter`.
    pub filters: Option<FilterConfig>,
    /// Extra detection tokens per role.
    pub synonyms: SynonymOverrides,
    pub site_sheets: Option<bool>,
}

/// Reads a JSON configuration file.
pub fn load_config(path: &Path) -> Result<AuditConfig> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse config {}", path.display()))
}

/// Settings given on the command line. `None` and blank names defer to the
/// configuration file.
#[derive(Debug, Clone, Default)]
pub struct AuditOverrides {
    pub preset: Option<MappingPreset>,
    pub mapping: ColumnMapping,
    pub filter: Option<FilterPreset>,
    pub min_sites: Option<u32>,
    pub top_positions: Option<u32>,
    pub min_sites_in_top: Option<u32>,
    pub site_sheets: Option<bool>,
}

/// Effective column mapping: preset, then file mapping, then flags.
pub fn resolve_mapping(config: &AuditConfig, overrides: &AuditOverrides) -> ColumnMapping {
    let preset = overrides.preset.or(config.preset).unwrap_or_default();
    preset
        .mapping()
        .overridden_by(&config.mapping)
        .overridden_by(&overrides.mapping)
}

/// Effective filter thresholds.
///
/// A non-custom preset named on the command line replaces whatever the file
/// says. Explicit numbers on the command line apply last and imply a custom
/// filter.
pub fn resolve_filters(config: &AuditConfig, overrides: &AuditOverrides) -> FilterConfig {
    let mut filters = match overrides.filter {
        Some(preset) if preset != FilterPreset::Custom => preset.config(),
        _ => config
            .filters
            .or_else(|| config.filter.map(FilterPreset::config))
            .unwrap_or_default(),
    };
    if let Some(value) = overrides.min_sites {
        filters.min_sites = value;
    }
    if let Some(value) = overrides.top_positions {
        filters.top_positions = value;
    }
    if let Some(value) = overrides.min_sites_in_top {
        filters.min_sites_in_top = value;
    }
    filters
}

pub fn build_detector(config: &AuditConfig) -> ColumnDetector {
    ColumnDetector::new(SynonymTable::default().with_overrides(&config.synonyms))
}

/// Builds the audit request for one invocation.
pub fn build_request(config: &AuditConfig, overrides: &AuditOverrides) -> AuditRequest {
    let site_sheets = overrides.site_sheets.or(config.site_sheets).unwrap_or(true);
    AuditRequest::new(
        resolve_mapping(config, overrides),
        resolve_filters(config, overrides),
    )
    .with_detector(build_detector(config))
    .with_site_sheets(site_sheets)
}
