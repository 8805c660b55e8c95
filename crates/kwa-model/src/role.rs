//! Logical column roles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four logical column meanings every ingested table is mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The ranked search query.
    Keyword,
    /// Ranking position of the site for the keyword.
    Position,
    /// The ranking page.
    Url,
    /// Monthly search volume (optional).
    Volume,
}

impl Role {
    /// All roles in canonical order.
    pub const ALL: [Role; 4] = [Role::Keyword, Role::Position, Role::Url, Role::Volume];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Position => "position",
            Self::Url => "url",
            Self::Volume => "volume",
        }
    }

    /// Human-readable label used in diagnostics and terminal tables.
    pub fn label(self) -> &'static str {
        match self {
            Self::Keyword => "Keyword",
            Self::Position => "Position",
            Self::Url => "Page",
            Self::Volume => "Search volume",
        }
    }

    /// Keyword and position must always resolve to a column.
    pub fn is_mandatory(self) -> bool {
        matches!(self, Self::Keyword | Self::Position)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "position" => Ok(Self::Position),
            "url" | "page" => Ok(Self::Url),
            "volume" => Ok(Self::Volume),
            other => Err(format!("unknown column role: {other}")),
        }
    }
}
