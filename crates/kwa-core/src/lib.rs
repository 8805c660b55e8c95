//! Keyword audit core: competitive aggregation, site summaries and the
//! end-to-end audit pipeline.

pub mod competition;
pub mod error;
pub mod pipeline;
pub mod summary;

pub use competition::{CompetitionRow, CompetitiveSummary, DetailedRow, aggregate, detailed_rows};
pub use error::{AuditError, FileError};
pub use pipeline::{
    AuditReport, AuditRequest, FileDiagnostic, FileOutcome, run_audit, unique_source_names,
};
pub use summary::{InterestBracket, InterestRow, SiteSummary, VolumeSummary, interest, summarize};
