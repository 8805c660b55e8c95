//! Built-in column mapping and filter presets.
//!
//! Export tools name their columns differently; these presets capture the
//! usual names so users only type column names for custom exports.

use serde::{Deserialize, Serialize};

use crate::filter::FilterConfig;
use crate::mapping::ColumnMapping;

/// Known export layouts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MappingPreset {
    /// No preset columns: everything is explicit or detected.
    #[default]
    Custom,
    Semrush,
    Ahrefs,
    #[serde(rename = "gsc")]
    GoogleSearchConsole,
}

impl MappingPreset {
    pub const ALL: [MappingPreset; 4] = [
        MappingPreset::Custom,
        MappingPreset::Semrush,
        MappingPreset::Ahrefs,
        MappingPreset::GoogleSearchConsole,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Custom => "Custom",
            Self::Semrush => "SEMrush",
            Self::Ahrefs => "Ahrefs",
            Self::GoogleSearchConsole => "Google Search Console",
        }
    }

    pub fn mapping(self) -> ColumnMapping {
        match self {
            Self::Custom => ColumnMapping::default(),
            Self::Semrush | Self::Ahrefs => {
                ColumnMapping::new("Keyword", "Position", "URL", "Volume")
            }
            Self::GoogleSearchConsole => ColumnMapping::new("Query", "Position", "Page", ""),
        }
    }
}

/// Named competitive filter configurations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPreset {
    /// Values supplied by the caller; all zero unless overridden.
    Custom,
    #[default]
    #[serde(rename = "all")]
    AllData,
    Top10,
    Top20,
    Top30,
    TwoSitesTop10,
    TwoSitesTop20,
    TwoSitesTop30,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 8] = [
        FilterPreset::Custom,
        FilterPreset::AllData,
        FilterPreset::Top10,
        FilterPreset::Top20,
        FilterPreset::Top30,
        FilterPreset::TwoSitesTop10,
        FilterPreset::TwoSitesTop20,
        FilterPreset::TwoSitesTop30,
    ];

    pub fn config(self) -> FilterConfig {
        match self {
            Self::Custom | Self::AllData => FilterConfig::new(0, 0, 0),
            Self::Top10 => FilterConfig::new(1, 10, 1),
            Self::Top20 => FilterConfig::new(1, 20, 1),
            Self::Top30 => FilterConfig::new(1, 30, 1),
            Self::TwoSitesTop10 => FilterConfig::new(2, 10, 1),
            Self::TwoSitesTop20 => FilterConfig::new(2, 20, 1),
            Self::TwoSitesTop30 => FilterConfig::new(2, 30, 1),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Custom => "Custom filter configuration",
            Self::AllData => "All data, no filtering",
            Self::Top10 => "At least 1 site ranking in the top 10",
            Self::Top20 => "At least 1 site ranking in the top 20",
            Self::Top30 => "At least 1 site ranking in the top 30",
            Self::TwoSitesTop10 => "At least 2 sites ranking, including 1 in the top 10",
            Self::TwoSitesTop20 => "At least 2 sites ranking, including 1 in the top 20",
            Self::TwoSitesTop30 => "At least 2 sites ranking, including 1 in the top 30",
        }
    }
}
