//! Heuristic column detection.
//!
//! Each role scans the full column list independently, first for an exact
//! synonym match and then, only if nothing matched exactly, for a column that
//! contains a synonym. The leftmost matching column wins in both passes.

use std::collections::BTreeMap;

use kwa_model::{ColumnMapping, Role};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::synonyms::SynonymTable;
use crate::utils::normalize_text;

/// Which pass found a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// A synonym appears inside the column name.
    Partial,
    /// The column name equals a synonym.
    Exact,
}

/// A column found for a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedColumn {
    /// Header exactly as it appears in the table.
    pub name: String,
    pub index: usize,
    pub kind: MatchKind,
}

/// Detection result for every role; undetected roles are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedColumns {
    pub columns: BTreeMap<Role, DetectedColumn>,
}

impl DetectedColumns {
    pub fn get(&self, role: Role) -> Option<&DetectedColumn> {
        self.columns.get(&role)
    }

    /// Column name detected for `role`, if any.
    pub fn name(&self, role: Role) -> Option<&str> {
        self.get(role).map(|column| column.name.as_str())
    }

    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|role| !self.columns.contains_key(role))
            .collect()
    }

    /// Detected names as a mapping; undetected roles stay blank.
    pub fn to_mapping(&self) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();
        for (role, column) in &self.columns {
            mapping.set(*role, column.name.clone());
        }
        mapping
    }
}

/// Table-driven column detector.
#[derive(Debug, Clone, Default)]
pub struct ColumnDetector {
    synonyms: SynonymTable,
}

impl ColumnDetector {
    pub fn new(synonyms: SynonymTable) -> Self {
        Self { synonyms }
    }

    pub fn synonyms(&self) -> &SynonymTable {
        &self.synonyms
    }

    /// Detects a column for every role. Never fails.
    pub fn detect(&self, columns: &[String]) -> DetectedColumns {
        let normalized: Vec<String> = columns.iter().map(|c| normalize_text(c)).collect();
        let mut detected = DetectedColumns::default();
        for role in Role::ALL {
            if let Some(column) = self.detect_role(role, columns, &normalized) {
                debug!(
                    role = %role,
                    column = %column.name,
                    kind = ?column.kind,
                    "detected column"
                );
                detected.columns.insert(role, column);
            }
        }
        detected
    }

    /// Detects the column for a single role.
    pub fn detect_one(&self, role: Role, columns: &[String]) -> Option<DetectedColumn> {
        let normalized: Vec<String> = columns.iter().map(|c| normalize_text(c)).collect();
        self.detect_role(role, columns, &normalized)
    }

    fn detect_role(
        &self,
        role: Role,
        columns: &[String],
        normalized: &[String],
    ) -> Option<DetectedColumn> {
        let tokens = self.synonyms.tokens(role);
        let found = |kind: MatchKind, index: usize| DetectedColumn {
            name: columns[index].clone(),
            index,
            kind,
        };

        let exact = normalized
            .iter()
            .position(|column| !column.is_empty() && tokens.iter().any(|token| token == column));
        if let Some(index) = exact {
            return Some(found(MatchKind::Exact, index));
        }

        normalized
            .iter()
            .position(|column| {
                !column.is_empty() && tokens.iter().any(|token| column.contains(token.as_str()))
            })
            .map(|index| found(MatchKind::Partial, index))
    }
}

/// Detects columns with the built-in synonym table.
pub fn detect_columns(columns: &[String]) -> DetectedColumns {
    ColumnDetector::default().detect(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn detects_search_console_layout() {
        let detected = detect_columns(&cols(&["Query", "Page", "Position"]));
        assert_eq!(detected.name(Role::Keyword), Some("Query"));
        assert_eq!(detected.name(Role::Url), Some("Page"));
        assert_eq!(detected.name(Role::Position), Some("Position"));
        assert_eq!(detected.name(Role::Volume), None);
        assert_eq!(detected.missing_roles(), vec![Role::Volume]);
    }

    #[test]
    fn exact_match_beats_earlier_partial_match() {
        let detected = detect_columns(&cols(&["Previous position", "Position"]));
        let position = detected.get(Role::Position).unwrap();
        assert_eq!(position.name, "Position");
        assert_eq!(position.kind, MatchKind::Exact);
    }

    #[test]
    fn partial_pass_picks_leftmost_column() {
        let detected = detect_columns(&cols(&[
            "Keyword",
            "Current position on Google",
            "Previous position on Google",
        ]));
        let position = detected.get(Role::Position).unwrap();
        assert_eq!(position.name, "Current position on Google");
        assert_eq!(position.index, 1);
        assert_eq!(position.kind, MatchKind::Partial);
    }

    #[test]
    fn roles_are_detected_independently() {
        let detected = detect_columns(&cols(&["Keyword volume"]));
        assert_eq!(detected.name(Role::Keyword), Some("Keyword volume"));
        assert_eq!(detected.name(Role::Volume), Some("Keyword volume"));
    }

    #[test]
    fn matching_ignores_case_and_separators() {
        let detected = detect_columns(&cols(&["KEYWORD", "search_volume", "Mot-Clé"]));
        assert_eq!(detected.name(Role::Keyword), Some("KEYWORD"));
        assert_eq!(detected.name(Role::Volume), Some("search_volume"));
    }

    #[test]
    fn nothing_detected_for_unrelated_columns() {
        let detected = detect_columns(&cols(&["Clicks", "CTR", ""]));
        assert!(detected.columns.is_empty());
        assert_eq!(detected.missing_roles(), Role::ALL.to_vec());
    }

    #[test]
    fn custom_synonyms_extend_detection() {
        let mut synonyms = SynonymTable::default();
        synonyms.extend(Role::Volume, ["impressions"]);
        let detector = ColumnDetector::new(synonyms);
        let detected = detector.detect(&cols(&["Query", "Impressions"]));
        assert_eq!(detected.name(Role::Volume), Some("Impressions"));
    }

    #[test]
    fn ahrefs_layout_is_fully_detected() {
        let detected = detect_columns(&cols(&[
            "Keyword",
            "Country",
            "Volume",
            "KD",
            "CPC",
            "Organic traffic",
            "Current position",
            "Current URL",
        ]));
        assert_eq!(
            detected.to_mapping(),
            ColumnMapping::new("Keyword", "Current position", "Current URL", "Volume")
        );
    }
}
