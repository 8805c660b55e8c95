//! Normalization errors.

use std::fmt;

use thiserror::Error;

use crate::role::Role;

/// A role that could not be bound to a column of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn {
    pub role: Role,
    /// Column the caller asked for; `None` when detection found nothing.
    pub requested: Option<String>,
}

impl fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.requested {
            Some(column) => write!(f, "{} (column '{column}' not found)", self.role),
            None => write!(f, "{} (not detected)", self.role),
        }
    }
}

/// Errors raised while normalizing a single table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Mandatory or explicitly requested columns could not be resolved.
    #[error(
        "missing columns in {file}: {}; available columns: {}",
        join_missing(.missing),
        join_available(.available)
    )]
    MissingColumns {
        file: String,
        missing: Vec<MissingColumn>,
        available: Vec<String>,
    },
}

fn join_missing(missing: &[MissingColumn]) -> String {
    missing
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_available(available: &[String]) -> String {
    available.join(", ")
}
