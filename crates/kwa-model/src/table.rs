//! Raw uploaded tables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Format tag of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,
    Xlsx,
}

impl FileFormat {
    /// Maps a file extension (case-insensitive, without the dot) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        if extension.eq_ignore_ascii_case("csv") {
            Some(Self::Csv)
        } else if extension.eq_ignore_ascii_case("xlsx") {
            Some(Self::Xlsx)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A tabular dataset as ingested, before any normalization.
///
/// Every row has exactly `headers.len()` cells; short rows are padded with
/// empty strings by the readers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Name of the uploaded file, including its extension.
    pub file_name: String,
    pub format: FileFormat,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(
        file_name: impl Into<String>,
        format: FileFormat,
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            format,
            headers,
            rows,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Finds a header by name.
    ///
    /// Both sides are compared with whitespace runs collapsed, the way the
    /// readers store headers. Exact matches win; otherwise the first
    /// case-insensitive match is returned.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = collapse_whitespace(name);
        let headers: Vec<String> = self
            .headers
            .iter()
            .map(|header| collapse_whitespace(header))
            .collect();
        headers
            .iter()
            .position(|header| *header == wanted)
            .or_else(|| {
                headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(&wanted))
            })
    }

    /// Returns the cell at `row`/`column`, or an empty string when absent.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RawTable {
        RawTable::new(
            "site.csv",
            FileFormat::Csv,
            vec!["Keyword".into(), "position".into(), " URL ".into()],
            vec![vec!["shoes".into(), "3".into(), "https://a.com".into()]],
        )
    }

    #[test]
    fn extension_lookup_is_case_insensitive() {
        assert_eq!(FileFormat::from_extension("CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::from_extension("xlsx"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::from_extension("xls"), None);
    }

    #[test]
    fn column_index_prefers_exact_then_case_insensitive() {
        let table = table();
        assert_eq!(table.column_index("Keyword"), Some(0));
        assert_eq!(table.column_index("Position"), Some(1));
        assert_eq!(table.column_index("URL"), Some(2));
        assert_eq!(table.column_index("Volume"), None);
    }

    #[test]
    fn requested_names_match_with_collapsed_whitespace() {
        let table = RawTable::new(
            "site.csv",
            FileFormat::Csv,
            vec!["Keyword".into(), "Search Volume".into()],
            Vec::new(),
        );
        assert_eq!(table.column_index("Search  Volume"), Some(1));
        assert_eq!(table.column_index(" search\tvolume "), Some(1));
        assert_eq!(table.column_index("SearchVolume"), None);
    }

    #[test]
    fn out_of_range_cells_are_empty() {
        let table = table();
        assert_eq!(table.cell(0, 0), "shoes");
        assert_eq!(table.cell(0, 9), "");
        assert_eq!(table.cell(4, 0), "");
    }
}
