//! Column mapping types.
//!
//! A [`ColumnMapping`] is what the caller asks for (possibly empty, meaning
//! "detect it"); [`ResolvedColumns`] is what a specific table actually uses.

use serde::{Deserialize, Serialize};

use crate::role::Role;

/// Requested column name per role. Blank entries request auto-detection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub keyword: String,
    pub position: String,
    pub url: String,
    pub volume: String,
}

impl ColumnMapping {
    pub fn new(
        keyword: impl Into<String>,
        position: impl Into<String>,
        url: impl Into<String>,
        volume: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            position: position.into(),
            url: url.into(),
            volume: volume.into(),
        }
    }

    /// Returns the requested column for `role`, or `None` when left blank.
    pub fn get(&self, role: Role) -> Option<&str> {
        let value = match role {
            Role::Keyword => &self.keyword,
            Role::Position => &self.position,
            Role::Url => &self.url,
            Role::Volume => &self.volume,
        };
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed)
        }
    }

    pub fn set(&mut self, role: Role, column: impl Into<String>) {
        let slot = match role {
            Role::Keyword => &mut self.keyword,
            Role::Position => &mut self.position,
            Role::Url => &mut self.url,
            Role::Volume => &mut self.volume,
        };
        *slot = column.into();
    }

    #[must_use]
    pub fn with(mut self, role: Role, column: impl Into<String>) -> Self {
        self.set(role, column);
        self
    }

    /// True when every role is left to auto-detection.
    pub fn is_empty(&self) -> bool {
        Role::ALL.iter().all(|role| self.get(*role).is_none())
    }

    /// Returns a copy where every non-blank entry of `overrides` replaces ours.
    #[must_use]
    pub fn overridden_by(&self, overrides: &ColumnMapping) -> ColumnMapping {
        let mut merged = self.clone();
        for role in Role::ALL {
            if let Some(column) = overrides.get(role) {
                merged.set(role, column);
            }
        }
        merged
    }
}

/// How a role ended up bound to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnOrigin {
    /// Named by the caller (custom mapping or preset).
    Explicit,
    /// Found by the column detector.
    Detected,
}

/// A role bound to an actual header of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumn {
    /// Header as it appears in the table.
    pub name: String,
    /// Position of the header in the table.
    pub index: usize,
    pub origin: ColumnOrigin,
}

/// Effective columns used to normalize one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedColumns {
    pub keyword: ResolvedColumn,
    pub position: ResolvedColumn,
    pub url: Option<ResolvedColumn>,
    pub volume: Option<ResolvedColumn>,
}

impl ResolvedColumns {
    pub fn get(&self, role: Role) -> Option<&ResolvedColumn> {
        match role {
            Role::Keyword => Some(&self.keyword),
            Role::Position => Some(&self.position),
            Role::Url => self.url.as_ref(),
            Role::Volume => self.volume.as_ref(),
        }
    }

    /// Converts back into a mapping of plain header names.
    pub fn to_mapping(&self) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();
        for role in Role::ALL {
            if let Some(column) = self.get(role) {
                mapping.set(role, column.name.clone());
            }
        }
        mapping
    }
}
