//! Cell cleaning and row normalization for keyword exports.

pub mod clean;
pub mod normalize;
pub mod numeric;

pub use clean::{clean_keyword, clean_url, domain_of_clean_url, extract_domain};
pub use normalize::{DroppedRows, NormalizedFile, normalize_rows, normalize_table};
pub use numeric::parse_number;
