//! Normalized keyword records and the per-run dataset.

use serde::{Deserialize, Serialize};

/// One ranking row after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub keyword: String,
    pub position: f64,
    pub url: String,
    /// Host of `url` without a leading `www.`.
    pub domain: String,
    pub volume: Option<f64>,
    /// Site the record came from (one per uploaded file).
    pub source: String,
}

/// All normalized records of one audit run.
///
/// Sources keep upload order; that order drives pivot column order and
/// per-site report ordering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedDataset {
    pub records: Vec<NormalizedRecord>,
    pub sources: Vec<String>,
    /// True when at least one file mapped a volume column.
    pub has_volume: bool,
}

impl NormalizedDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the records of one normalized file.
    pub fn append(&mut self, source: &str, records: Vec<NormalizedRecord>, has_volume: bool) {
        if !self.sources.iter().any(|existing| existing == source) {
            self.sources.push(source.to_string());
        }
        self.has_volume |= has_volume;
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of a single source, in their original order.
    pub fn records_for<'a>(
        &'a self,
        source: &'a str,
    ) -> impl Iterator<Item = &'a NormalizedRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.source == source)
    }
}
