//! Report sheets as Polars frames.

use std::collections::BTreeSet;

use kwa_core::{AuditReport, CompetitiveSummary, DetailedRow, InterestRow, SiteSummary};
use kwa_model::NormalizedRecord;
use polars::prelude::{Column, DataFrame};

use crate::error::Result;

/// Longest sheet name spreadsheet tools accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

pub const COMPETITION_SHEET: &str = "competition";
pub const DETAILED_SHEET: &str = "detailed";
pub const SITE_SUMMARY_SHEET: &str = "site_summary";
pub const INTEREST_SHEET: &str = "interest";

const RESERVED_SHEETS: [&str; 4] = [
    COMPETITION_SHEET,
    DETAILED_SHEET,
    SITE_SUMMARY_SHEET,
    INTEREST_SHEET,
];

/// A named report table.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub frame: DataFrame,
}

/// Which optional sheets to produce.
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// One sheet of normalized records per site.
    pub site_sheets: bool,
    /// Field separator of written CSV files.
    pub separator: u8,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            site_sheets: true,
            separator: b',',
        }
    }
}

impl ReportOptions {
    /// Options following the per-site choice recorded in `report`.
    pub fn for_report(report: &AuditReport) -> Self {
        Self {
            site_sheets: report.site_sheets,
            ..Self::default()
        }
    }
}

fn count(value: usize) -> u64 {
    value as u64
}

/// Pivot column header for `source`.
pub fn position_column(source: &str) -> String {
    format!("Position - {source}")
}

pub fn competition_frame(summary: &CompetitiveSummary) -> Result<DataFrame> {
    let rows = &summary.rows;
    let mut columns = vec![
        Column::new(
            "keyword".into(),
            rows.iter().map(|row| row.keyword.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "sites_count".into(),
            rows.iter().map(|row| count(row.sites_count)).collect::<Vec<_>>(),
        ),
    ];
    if let Some(top) = summary.top_positions {
        columns.push(Column::new(
            format!("sites_in_top_{top}").into(),
            rows.iter()
                .map(|row| row.sites_in_top.map(count))
                .collect::<Vec<_>>(),
        ));
    }
    if summary.has_volume {
        columns.push(Column::new(
            "volume".into(),
            rows.iter().map(|row| row.volume).collect::<Vec<_>>(),
        ));
    }
    for source in &summary.sources {
        columns.push(Column::new(
            position_column(source).into(),
            rows.iter()
                .map(|row| row.position(source))
                .collect::<Vec<_>>(),
        ));
    }
    Ok(DataFrame::new(columns)?)
}

pub fn detailed_frame(rows: &[DetailedRow]) -> Result<DataFrame> {
    Ok(DataFrame::new(vec![
        Column::new(
            "keyword".into(),
            rows.iter().map(|row| row.keyword.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "site".into(),
            rows.iter().map(|row| row.site.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "position".into(),
            rows.iter().map(|row| row.position).collect::<Vec<_>>(),
        ),
        Column::new(
            "url".into(),
            rows.iter().map(|row| row.url.clone()).collect::<Vec<_>>(),
        ),
    ])?)
}

pub fn site_summary_frame(summaries: &[SiteSummary], has_volume: bool) -> Result<DataFrame> {
    let counts = |name: &str, get: fn(&SiteSummary) -> usize| {
        Column::new(
            name.into(),
            summaries.iter().map(|s| count(get(s))).collect::<Vec<_>>(),
        )
    };
    let mut columns = vec![
        Column::new(
            "site".into(),
            summaries.iter().map(|s| s.site.clone()).collect::<Vec<_>>(),
        ),
        counts("keywords", |s| s.keywords),
        Column::new(
            "avg_position".into(),
            summaries.iter().map(|s| s.avg_position).collect::<Vec<_>>(),
        ),
        counts("top_3", |s| s.top_3),
        counts("top_10", |s| s.top_10),
        counts("top_20", |s| s.top_20),
        counts("top_50", |s| s.top_50),
        counts("top_100", |s| s.top_100),
    ];
    if has_volume {
        let volumes = |name: &str, get: fn(&kwa_core::VolumeSummary) -> Option<f64>| {
            Column::new(
                name.into(),
                summaries
                    .iter()
                    .map(|s| s.volume.as_ref().and_then(get))
                    .collect::<Vec<_>>(),
            )
        };
        columns.push(volumes("total_volume", |v| Some(v.total)));
        columns.push(volumes("avg_volume", |v| v.average));
        columns.push(volumes("volume_top_3", |v| Some(v.top_3)));
        columns.push(volumes("volume_top_10", |v| Some(v.top_10)));
        columns.push(volumes("volume_top_20", |v| Some(v.top_20)));
    }
    Ok(DataFrame::new(columns)?)
}

pub fn interest_frame(rows: &[InterestRow], has_volume: bool) -> Result<DataFrame> {
    let mut columns = vec![
        Column::new(
            "site".into(),
            rows.iter().map(|row| row.site.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "bracket".into(),
            rows.iter()
                .map(|row| row.bracket.label())
                .collect::<Vec<_>>(),
        ),
        Column::new(
            "keywords".into(),
            rows.iter().map(|row| count(row.keywords)).collect::<Vec<_>>(),
        ),
    ];
    if has_volume {
        columns.push(Column::new(
            "volume".into(),
            rows.iter().map(|row| row.volume).collect::<Vec<_>>(),
        ));
    }
    Ok(DataFrame::new(columns)?)
}

/// Normalized records of one site.
pub fn site_frame<'a, I>(records: I, has_volume: bool) -> Result<DataFrame>
where
    I: IntoIterator<Item = &'a NormalizedRecord>,
{
    let records: Vec<&NormalizedRecord> = records.into_iter().collect();
    let mut columns = vec![
        Column::new(
            "keyword".into(),
            records.iter().map(|r| r.keyword.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "position".into(),
            records.iter().map(|r| r.position).collect::<Vec<_>>(),
        ),
        Column::new(
            "url".into(),
            records.iter().map(|r| r.url.clone()).collect::<Vec<_>>(),
        ),
        Column::new(
            "domain".into(),
            records.iter().map(|r| r.domain.clone()).collect::<Vec<_>>(),
        ),
    ];
    if has_volume {
        columns.push(Column::new(
            "volume".into(),
            records.iter().map(|r| r.volume).collect::<Vec<_>>(),
        ));
    }
    Ok(DataFrame::new(columns)?)
}

/// Sheet name for `site`: characters spreadsheet tools and file systems
/// reject become `_`, the result is cut to 31 characters and suffixed with
/// `_2`, `_3`, ... until no name in `taken` matches it ignoring case.
pub fn unique_sheet_name(site: &str, taken: &BTreeSet<String>) -> String {
    let cleaned: String = site
        .trim()
        .chars()
        .map(|ch| match ch {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    let base = if cleaned.is_empty() {
        "site".to_string()
    } else {
        cleaned
    };
    let is_taken = |candidate: &str| {
        let lowered = candidate.to_lowercase();
        taken.iter().any(|name| name.to_lowercase() == lowered)
    };
    let truncated: String = base.chars().take(MAX_SHEET_NAME_LEN).collect();
    if !is_taken(&truncated) {
        return truncated;
    }
    let mut suffix = 2;
    loop {
        let tail = format!("_{suffix}");
        let head: String = base
            .chars()
            .take(MAX_SHEET_NAME_LEN - tail.chars().count())
            .collect();
        let candidate = format!("{head}{tail}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Builds every sheet of `report`, fixed sheets first and then one per site
/// in upload order.
pub fn build_sheets(report: &AuditReport, options: &ReportOptions) -> Result<Vec<Sheet>> {
    let has_volume = report.dataset.has_volume;
    let mut sheets = vec![
        Sheet {
            name: COMPETITION_SHEET.to_string(),
            frame: competition_frame(&report.competition)?,
        },
        Sheet {
            name: DETAILED_SHEET.to_string(),
            frame: detailed_frame(&report.detailed)?,
        },
        Sheet {
            name: SITE_SUMMARY_SHEET.to_string(),
            frame: site_summary_frame(&report.site_summaries, has_volume)?,
        },
        Sheet {
            name: INTEREST_SHEET.to_string(),
            frame: interest_frame(&report.interest, has_volume)?,
        },
    ];

    if options.site_sheets {
        let mut taken: BTreeSet<String> =
            RESERVED_SHEETS.iter().map(|name| (*name).to_string()).collect();
        for source in &report.dataset.sources {
            let name = unique_sheet_name(source, &taken);
            taken.insert(name.clone());
            sheets.push(Sheet {
                name,
                frame: site_frame(report.dataset.records_for(source), has_volume)?,
            });
        }
    }
    Ok(sheets)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use kwa_core::{CompetitionRow, InterestBracket};

    use super::*;

    fn summary() -> CompetitiveSummary {
        CompetitiveSummary {
            rows: vec![CompetitionRow {
                keyword: "shoes".to_string(),
                sites_count: 2,
                sites_in_top: Some(1),
                volume: Some(1000.0),
                positions: BTreeMap::from([("A".to_string(), 3.0), ("B".to_string(), 15.0)]),
            }],
            sources: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            top_positions: Some(10),
            has_volume: true,
        }
    }

    #[test]
    fn competition_frame_has_pivot_columns_in_upload_order() {
        let df = competition_frame(&summary()).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "keyword",
                "sites_count",
                "sites_in_top_10",
                "volume",
                "Position - A",
                "Position - B",
                "Position - C"
            ]
        );
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("Position - C").unwrap().null_count(), 1);
    }

    #[test]
    fn competition_frame_without_optional_axes() {
        let mut summary = summary();
        summary.top_positions = None;
        summary.has_volume = false;
        let df = competition_frame(&summary).unwrap();
        assert!(df.column("volume").is_err());
        assert!(df.column("sites_in_top_10").is_err());
        assert_eq!(df.width(), 5);
    }

    #[test]
    fn interest_frame_uses_bracket_labels() {
        let rows = vec![InterestRow {
            site: "A".to_string(),
            bracket: InterestBracket::Top10,
            keywords: 4,
            volume: None,
        }];
        let df = interest_frame(&rows, false).unwrap();
        assert_eq!(df.width(), 3);
        let bracket = df.column("bracket").unwrap().str().unwrap().get(0);
        assert_eq!(bracket, Some("4-10"));
    }

    #[test]
    fn sheet_names_are_truncated_and_deduplicated() {
        let mut taken: BTreeSet<String> = BTreeSet::new();
        let long = "a-very-long-site-name-from-an-export-tool";
        let first = unique_sheet_name(long, &taken);
        assert_eq!(first.chars().count(), MAX_SHEET_NAME_LEN);
        taken.insert(first.clone());
        let second = unique_sheet_name(long, &taken);
        assert_eq!(second.chars().count(), MAX_SHEET_NAME_LEN);
        assert!(second.ends_with("_2"));
        assert_ne!(first, second);
    }

    #[test]
    fn sheet_names_replace_forbidden_characters() {
        let taken = BTreeSet::from([COMPETITION_SHEET.to_string()]);
        assert_eq!(unique_sheet_name("a/b:c", &taken), "a_b_c");
        assert_eq!(unique_sheet_name("competition", &taken), "competition_2");
        assert_eq!(unique_sheet_name("  ", &taken), "site");
    }

    #[test]
    fn sheet_names_clash_regardless_of_case() {
        let taken = BTreeSet::from([COMPETITION_SHEET.to_string(), "Shop".to_string()]);
        assert_eq!(unique_sheet_name("Competition", &taken), "Competition_2");
        assert_eq!(unique_sheet_name("shop", &taken), "shop_2");
        assert_eq!(unique_sheet_name("shops", &taken), "shops");
    }
}
