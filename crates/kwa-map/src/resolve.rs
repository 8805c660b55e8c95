//! Mapping resolution: explicit names first, detection as fallback.

use kwa_model::{
    ColumnMapping, ColumnOrigin, MissingColumn, NormalizeError, RawTable, ResolvedColumn,
    ResolvedColumns, Role,
};
use tracing::debug;

use crate::detect::ColumnDetector;

/// Binds every role of `mapping` to a header of `table`.
///
/// A non-blank entry must name an existing column, whatever its role. Blank
/// entries fall back to detection; keyword and position must resolve, url and
/// volume may stay unbound.
pub fn resolve_columns(
    table: &RawTable,
    mapping: &ColumnMapping,
    detector: &ColumnDetector,
) -> Result<ResolvedColumns, NormalizeError> {
    let mut missing = Vec::new();
    let mut resolved: [Option<ResolvedColumn>; 4] = Default::default();

    for (slot, role) in resolved.iter_mut().zip(Role::ALL) {
        match mapping.get(role) {
            Some(requested) => match table.column_index(requested) {
                Some(index) => {
                    *slot = Some(ResolvedColumn {
                        name: table.headers[index].clone(),
                        index,
                        origin: ColumnOrigin::Explicit,
                    });
                }
                None => missing.push(MissingColumn {
                    role,
                    requested: Some(requested.to_string()),
                }),
            },
            None => match detector.detect_one(role, &table.headers) {
                Some(column) => {
                    debug!(
                        file = %table.file_name,
                        role = %role,
                        column = %column.name,
                        "using detected column"
                    );
                    *slot = Some(ResolvedColumn {
                        name: column.name,
                        index: column.index,
                        origin: ColumnOrigin::Detected,
                    });
                }
                None if role.is_mandatory() => missing.push(MissingColumn {
                    role,
                    requested: None,
                }),
                None => {}
            },
        }
    }

    let [keyword, position, url, volume] = resolved;
    match (keyword, position) {
        (Some(keyword), Some(position)) if missing.is_empty() => Ok(ResolvedColumns {
            keyword,
            position,
            url,
            volume,
        }),
        _ => Err(NormalizeError::MissingColumns {
            file: table.file_name.clone(),
            missing,
            available: table.headers.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use kwa_model::FileFormat;

    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable::new(
            "site.csv",
            FileFormat::Csv,
            headers.iter().map(|h| (*h).to_string()).collect(),
            Vec::new(),
        )
    }

    #[test]
    fn explicit_names_take_priority_over_detection() {
        let table = table(&["Keyword", "Rank", "Position", "URL"]);
        let mapping = ColumnMapping::default().with(Role::Position, "Rank");
        let resolved = resolve_columns(&table, &mapping, &ColumnDetector::default()).unwrap();
        assert_eq!(resolved.position.name, "Rank");
        assert_eq!(resolved.position.origin, ColumnOrigin::Explicit);
        assert_eq!(resolved.keyword.origin, ColumnOrigin::Detected);
        assert_eq!(resolved.url.as_ref().map(|c| c.index), Some(3));
        assert!(resolved.volume.is_none());
    }

    #[test]
    fn explicit_names_match_headers_case_insensitively() {
        let table = table(&["keyword", "position"]);
        let mapping = ColumnMapping::new("Keyword", "Position", "", "");
        let resolved = resolve_columns(&table, &mapping, &ColumnDetector::default()).unwrap();
        assert_eq!(resolved.keyword.name, "keyword");
    }

    #[test]
    fn undetectable_mandatory_role_lists_available_columns() {
        let table = table(&["Keyword", "Clicks"]);
        let err = resolve_columns(&table, &ColumnMapping::default(), &ColumnDetector::default())
            .unwrap_err();
        let NormalizeError::MissingColumns {
            file,
            missing,
            available,
        } = err;
        assert_eq!(file, "site.csv");
        assert_eq!(
            missing,
            vec![MissingColumn {
                role: Role::Position,
                requested: None
            }]
        );
        assert_eq!(available, vec!["Keyword", "Clicks"]);
    }

    #[test]
    fn explicit_optional_column_must_exist() {
        let table = table(&["Query", "Page", "Position"]);
        let mapping = ColumnMapping::new("Query", "Position", "Page", "Volume");
        let err = resolve_columns(&table, &mapping, &ColumnDetector::default()).unwrap_err();
        let NormalizeError::MissingColumns { missing, .. } = err;
        assert_eq!(missing[0].role, Role::Volume);
        assert_eq!(missing[0].requested.as_deref(), Some("Volume"));
    }

    #[test]
    fn unresolved_url_is_allowed_when_not_requested() {
        let table = table(&["Keyword", "Position"]);
        let resolved =
            resolve_columns(&table, &ColumnMapping::default(), &ColumnDetector::default())
                .unwrap();
        assert!(resolved.url.is_none());
    }
}
