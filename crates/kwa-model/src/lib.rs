//! Shared data model for the keyword audit workspace.

pub mod error;
pub mod filter;
pub mod mapping;
pub mod presets;
pub mod record;
pub mod role;
pub mod table;

pub use error::{MissingColumn, NormalizeError};
pub use filter::FilterConfig;
pub use mapping::{ColumnMapping, ColumnOrigin, ResolvedColumn, ResolvedColumns};
pub use presets::{FilterPreset, MappingPreset};
pub use record::{NormalizedDataset, NormalizedRecord};
pub use role::Role;
pub use table::{FileFormat, RawTable};
