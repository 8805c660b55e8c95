#![deny(unsafe_code)]

//! Column detection and mapping resolution for keyword exports.

pub mod detect;
pub mod resolve;
pub mod synonyms;
pub mod utils;

pub use detect::{ColumnDetector, DetectedColumn, DetectedColumns, MatchKind, detect_columns};
pub use resolve::resolve_columns;
pub use synonyms::{SynonymOverrides, SynonymTable};
pub use utils::normalize_text;
