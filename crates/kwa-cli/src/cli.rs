//! CLI argument definitions for the keyword audit tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use kwa_model::{FilterPreset, MappingPreset};

#[derive(Parser)]
#[command(
    name = "kwa",
    version,
    about = "Keyword audit - compare SEO ranking exports across sites",
    long_about = "Compare keyword ranking exports (SEMrush, Ahrefs, Google Search Console \
                  or custom CSV/XLSX files) across competing sites.\n\n\
                  Produces a competition table, per-site summaries and interest \
                  brackets as CSV sheets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit ranking exports and write the report sheets.
    Audit(AuditArgs),

    /// Show the columns detected in each export.
    Detect(DetectArgs),

    /// List mapping and filter presets.
    Presets,
}

#[derive(Parser)]
pub struct AuditArgs {
    /// Ranking exports, one per site (CSV or XLSX).
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Column layout of the exports.
    #[arg(long = "preset", value_enum)]
    pub preset: Option<PresetArg>,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Competitive filter preset.
    #[arg(long = "filter", value_enum)]
    pub filter: Option<FilterArg>,

    /// Minimum number of sites ranking for a keyword (implies --filter custom).
    #[arg(long = "min-sites", value_name = "N")]
    pub min_sites: Option<u32>,

    /// Top-N position threshold, 0 disables it (implies --filter custom).
    #[arg(long = "top-positions", value_name = "N")]
    pub top_positions: Option<u32>,

    /// Minimum number of sites ranking within the top-N (implies --filter custom).
    #[arg(long = "min-sites-in-top", value_name = "N")]
    pub min_sites_in_top: Option<u32>,

    /// JSON configuration file.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory for report sheets (default: ./keyword-audit).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip the per-site record sheets.
    #[arg(long = "no-site-sheets")]
    pub no_site_sheets: bool,

    /// Print the summary without writing report files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// Explicit column names; they override the preset.
#[derive(Args, Default)]
pub struct ColumnArgs {
    #[arg(long = "keyword-column", value_name = "COLUMN")]
    pub keyword: Option<String>,

    #[arg(long = "position-column", value_name = "COLUMN")]
    pub position: Option<String>,

    #[arg(long = "url-column", value_name = "COLUMN")]
    pub url: Option<String>,

    #[arg(long = "volume-column", value_name = "COLUMN")]
    pub volume: Option<String>,
}

#[derive(Parser)]
pub struct DetectArgs {
    /// Exports to inspect.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// JSON configuration file (only its synonyms are used).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum PresetArg {
    Custom,
    Semrush,
    Ahrefs,
    Gsc,
}

impl From<PresetArg> for MappingPreset {
    fn from(value: PresetArg) -> Self {
        match value {
            PresetArg::Custom => MappingPreset::Custom,
            PresetArg::Semrush => MappingPreset::Semrush,
            PresetArg::Ahrefs => MappingPreset::Ahrefs,
            PresetArg::Gsc => MappingPreset::GoogleSearchConsole,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FilterArg {
    All,
    Top10,
    Top20,
    Top30,
    TwoSitesTop10,
    TwoSitesTop20,
    TwoSitesTop30,
    Custom,
}

impl From<FilterArg> for FilterPreset {
    fn from(value: FilterArg) -> Self {
        match value {
            FilterArg::All => FilterPreset::AllData,
            FilterArg::Top10 => FilterPreset::Top10,
            FilterArg::Top20 => FilterPreset::Top20,
            FilterArg::Top30 => FilterPreset::Top30,
            FilterArg::TwoSitesTop10 => FilterPreset::TwoSitesTop10,
            FilterArg::TwoSitesTop20 => FilterPreset::TwoSitesTop20,
            FilterArg::TwoSitesTop30 => FilterPreset::TwoSitesTop30,
            FilterArg::Custom => FilterPreset::Custom,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
