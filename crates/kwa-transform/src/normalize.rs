//! Row normalization into the fixed record schema.

use kwa_map::{ColumnDetector, resolve_columns};
use kwa_model::{ColumnMapping, NormalizeError, NormalizedRecord, RawTable, ResolvedColumns};
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::clean::{clean_keyword, clean_url, domain_of_clean_url};
use crate::numeric::parse_number;

/// Counts of rows that could not be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DroppedRows {
    /// Keyword cell empty after cleaning.
    pub empty_keyword: usize,
    /// Position cell missing or not numeric.
    pub invalid_position: usize,
}

impl DroppedRows {
    pub fn total(&self) -> usize {
        self.empty_keyword + self.invalid_position
    }
}

/// Result of normalizing one uploaded table.
#[derive(Debug, Clone)]
pub struct NormalizedFile {
    pub source: String,
    pub columns: ResolvedColumns,
    pub records: Vec<NormalizedRecord>,
    pub rows_read: usize,
    pub dropped: DroppedRows,
}

impl NormalizedFile {
    pub fn has_volume(&self) -> bool {
        self.columns.volume.is_some()
    }
}

/// Resolves the columns of `table` and normalizes every readable row.
pub fn normalize_table(
    table: &RawTable,
    mapping: &ColumnMapping,
    detector: &ColumnDetector,
    source: &str,
) -> Result<NormalizedFile, NormalizeError> {
    let columns = resolve_columns(table, mapping, detector)?;
    let (records, dropped) = normalize_rows(table, &columns, source);
    if dropped.total() > 0 {
        warn!(
            file = %table.file_name,
            empty_keyword = dropped.empty_keyword,
            invalid_position = dropped.invalid_position,
            "dropped unreadable rows"
        );
    }
    debug!(
        file = %table.file_name,
        source,
        rows_read = table.row_count(),
        rows_kept = records.len(),
        "normalized table"
    );
    Ok(NormalizedFile {
        source: source.to_string(),
        columns,
        records,
        rows_read: table.row_count(),
        dropped,
    })
}

/// Converts rows with already resolved columns. Rows with an empty keyword or
/// an unparseable position are dropped.
pub fn normalize_rows(
    table: &RawTable,
    columns: &ResolvedColumns,
    source: &str,
) -> (Vec<NormalizedRecord>, DroppedRows) {
    let mut records = Vec::with_capacity(table.row_count());
    let mut dropped = DroppedRows::default();

    for row in 0..table.row_count() {
        let keyword = clean_keyword(table.cell(row, columns.keyword.index));
        if keyword.is_empty() {
            dropped.empty_keyword += 1;
            continue;
        }
        let raw_position = table.cell(row, columns.position.index);
        let Some(position) = parse_number(raw_position) else {
            trace!(row, keyword = %keyword, value = raw_position, "unparseable position");
            dropped.invalid_position += 1;
            continue;
        };
        let url = columns
            .url
            .as_ref()
            .map(|column| clean_url(table.cell(row, column.index)))
            .unwrap_or_default();
        let domain = domain_of_clean_url(&url);
        let volume = columns
            .volume
            .as_ref()
            .and_then(|column| parse_number(table.cell(row, column.index)));
        records.push(NormalizedRecord {
            keyword,
            position,
            url,
            domain,
            volume,
            source: source.to_string(),
        });
    }

    (records, dropped)
}

#[cfg(test)]
mod tests {
    use kwa_model::{FileFormat, Role};

    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            "site-a.csv",
            FileFormat::Csv,
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn normalizes_rows_into_fixed_schema() {
        let table = table(
            &["Keyword", "Position", "URL", "Volume"],
            &[&["  Running SHOES ", "3", "https://www.Shop.com/Shoes/", "1,000"]],
        );
        let file = normalize_table(
            &table,
            &ColumnMapping::default(),
            &ColumnDetector::default(),
            "site-a",
        )
        .unwrap();
        assert_eq!(
            file.records,
            vec![NormalizedRecord {
                keyword: "running shoes".to_string(),
                position: 3.0,
                url: "www.shop.com/shoes".to_string(),
                domain: "shop.com".to_string(),
                volume: Some(1000.0),
                source: "site-a".to_string(),
            }]
        );
        assert!(file.has_volume());
        assert_eq!(file.rows_read, 1);
    }

    #[test]
    fn drops_rows_without_keyword_or_position() {
        let table = table(
            &["Keyword", "Position"],
            &[&["shoes", "2"], &["", "4"], &["!!", "4"], &["boots", "n/a"], &["hats", ""]],
        );
        let file = normalize_table(
            &table,
            &ColumnMapping::default(),
            &ColumnDetector::default(),
            "site-a",
        )
        .unwrap();
        assert_eq!(file.records.len(), 1);
        assert_eq!(
            file.dropped,
            DroppedRows {
                empty_keyword: 2,
                invalid_position: 2
            }
        );
        assert_eq!(file.rows_read, 5);
    }

    #[test]
    fn unparseable_volume_becomes_missing() {
        let table = table(&["Keyword", "Position", "Volume"], &[&["shoes", "2", "-"]]);
        let file = normalize_table(
            &table,
            &ColumnMapping::default(),
            &ColumnDetector::default(),
            "site-a",
        )
        .unwrap();
        assert_eq!(file.records[0].volume, None);
        assert!(file.has_volume());
    }

    #[test]
    fn missing_url_column_leaves_url_empty() {
        let table = table(&["Keyword", "Position"], &[&["shoes", "2"]]);
        let file = normalize_table(
            &table,
            &ColumnMapping::default(),
            &ColumnDetector::default(),
            "site-a",
        )
        .unwrap();
        assert_eq!(file.records[0].url, "");
        assert_eq!(file.records[0].domain, "");
    }

    #[test]
    fn missing_position_column_is_an_error() {
        let table = table(&["Keyword", "URL"], &[&["shoes", "/a"]]);
        let mapping = ColumnMapping::default().with(Role::Position, "Position");
        let err = normalize_table(&table, &mapping, &ColumnDetector::default(), "site-a")
            .unwrap_err();
        assert!(err.to_string().contains("available columns: Keyword, URL"));
    }
}
