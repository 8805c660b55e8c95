//! Cross-site competitive aggregation.
//!
//! Groups the normalized records of every site by keyword, applies the
//! site-count and top-position filters of a [`FilterConfig`], and pivots the
//! best position of each site into one row per surviving keyword.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use kwa_model::{FilterConfig, NormalizedDataset};
use serde::Serialize;
use tracing::debug;

/// One surviving keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitionRow {
    pub keyword: String,
    /// Distinct sites ranking for the keyword.
    pub sites_count: usize,
    /// Distinct sites ranking within the top-N threshold, when that filter is active.
    pub sites_in_top: Option<usize>,
    /// Highest volume reported by any site.
    pub volume: Option<f64>,
    /// Best position per site; sites that do not rank are absent.
    pub positions: BTreeMap<String, f64>,
}

impl CompetitionRow {
    pub fn position(&self, source: &str) -> Option<f64> {
        self.positions.get(source).copied()
    }
}

/// Aggregation result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetitiveSummary {
    pub rows: Vec<CompetitionRow>,
    /// Sites in upload order; drives pivot column order.
    pub sources: Vec<String>,
    /// Active top-N threshold.
    pub top_positions: Option<u32>,
    pub has_volume: bool,
}

impl CompetitiveSummary {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.keyword.as_str())
    }
}

#[derive(Default)]
struct KeywordStats<'a> {
    positions: BTreeMap<&'a str, f64>,
    top_sources: BTreeSet<&'a str>,
    volume: Option<f64>,
}

/// Builds the competitive summary of `dataset` under `filters`.
pub fn aggregate(dataset: &NormalizedDataset, filters: &FilterConfig) -> CompetitiveSummary {
    let top = filters.top_filter();
    let mut stats: BTreeMap<&str, KeywordStats<'_>> = BTreeMap::new();

    for record in &dataset.records {
        let entry = stats.entry(record.keyword.as_str()).or_default();
        entry
            .positions
            .entry(record.source.as_str())
            .and_modify(|best| *best = best.min(record.position))
            .or_insert(record.position);
        if let Some(limit) = top
            && record.position <= f64::from(limit)
        {
            entry.top_sources.insert(record.source.as_str());
        }
        if let Some(volume) = record.volume {
            entry.volume = Some(entry.volume.map_or(volume, |current| current.max(volume)));
        }
    }

    let min_sites = filters.min_sites as usize;
    let min_in_top = filters.min_sites_in_top as usize;
    let mut rows: Vec<CompetitionRow> = stats
        .into_iter()
        .filter_map(|(keyword, stats)| {
            let sites_count = stats.positions.len();
            if min_sites > 0 && sites_count < min_sites {
                return None;
            }
            let sites_in_top = top.map(|_| stats.top_sources.len());
            if sites_in_top.is_some_and(|count| count < min_in_top) {
                return None;
            }
            Some(CompetitionRow {
                keyword: keyword.to_string(),
                sites_count,
                sites_in_top,
                volume: if dataset.has_volume { stats.volume } else { None },
                positions: stats
                    .positions
                    .into_iter()
                    .map(|(source, position)| (source.to_string(), position))
                    .collect(),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.sites_in_top
            .cmp(&a.sites_in_top)
            .then_with(|| b.sites_count.cmp(&a.sites_count))
            .then_with(|| volume_desc(a.volume, b.volume))
    });

    debug!(
        keywords = rows.len(),
        sources = dataset.sources.len(),
        min_sites = filters.min_sites,
        top_positions = filters.top_positions,
        min_sites_in_top = filters.min_sites_in_top,
        "aggregated competition"
    );

    CompetitiveSummary {
        rows,
        sources: dataset.sources.clone(),
        top_positions: top,
        has_volume: dataset.has_volume,
    }
}

/// Descending volume order with missing volumes last.
fn volume_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Per-site detail of one surviving keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailedRow {
    pub keyword: String,
    pub site: String,
    pub position: f64,
    pub url: String,
}

/// Lists, for every keyword of `summary` and every site ranking for it, the
/// best position and the first URL seen for that site.
pub fn detailed_rows(dataset: &NormalizedDataset, summary: &CompetitiveSummary) -> Vec<DetailedRow> {
    let mut first_urls: BTreeMap<(&str, &str), &str> = BTreeMap::new();
    for record in &dataset.records {
        first_urls
            .entry((record.keyword.as_str(), record.source.as_str()))
            .or_insert(record.url.as_str());
    }

    let mut rows = Vec::new();
    for row in &summary.rows {
        for source in &summary.sources {
            let Some(position) = row.position(source) else {
                continue;
            };
            let url = first_urls
                .get(&(row.keyword.as_str(), source.as_str()))
                .copied()
                .unwrap_or_default();
            rows.push(DetailedRow {
                keyword: row.keyword.clone(),
                site: source.clone(),
                position,
                url: url.to_string(),
            });
        }
    }
    rows
}
