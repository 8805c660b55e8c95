//! End-to-end audits over in-memory uploads.

use kwa_core::{AuditError, AuditRequest, FileError, FileOutcome, InterestBracket, run_audit};
use kwa_ingest::{IngestError, UploadedFile};
use kwa_model::{ColumnMapping, FilterConfig, MappingPreset, NormalizeError, Role};

fn upload(name: &str, content: &str) -> UploadedFile {
    UploadedFile::new(name, content.as_bytes().to_vec())
}

fn shoes_files() -> Vec<UploadedFile> {
    vec![
        upload(
            "A.csv",
            "Keyword,Position,URL,Volume\nShoes,3,https://www.a.com/shoes/,1000\nHats,40,https://a.com/hats,50\n",
        ),
        upload(
            "B.csv",
            "Keyword;Position;URL;Volume\nshoes;15;https://b.com/shoes;900\n",
        ),
    ]
}

#[test]
fn shoes_survive_with_one_site_in_top_ten() {
    let request = AuditRequest::new(
        MappingPreset::Semrush.mapping(),
        FilterConfig::new(2, 10, 1),
    );
    let report = run_audit(&shoes_files(), &request).unwrap();

    assert_eq!(report.competition.len(), 1);
    let row = &report.competition.rows[0];
    assert_eq!(row.keyword, "shoes");
    assert_eq!(row.sites_count, 2);
    assert_eq!(row.sites_in_top, Some(1));
    assert_eq!(row.volume, Some(1000.0));
    assert_eq!(row.position("A"), Some(3.0));
    assert_eq!(row.position("B"), Some(15.0));
    assert_eq!(report.competition.sources, vec!["A", "B"]);

    assert_eq!(report.detailed.len(), 2);
    assert_eq!(report.detailed[0].url, "www.a.com/shoes");
    assert!(!report.has_failures());
}

#[test]
fn shoes_filtered_out_when_two_sites_needed_in_top_ten() {
    let request = AuditRequest::new(ColumnMapping::default(), FilterConfig::new(2, 10, 2));
    let report = run_audit(&shoes_files(), &request).unwrap();
    assert!(report.competition.is_empty());
    assert!(report.detailed.is_empty());
    assert_eq!(report.site_summaries.len(), 2);
}

#[test]
fn missing_position_column_does_not_abort_the_batch() {
    let files = vec![
        upload("broken.csv", "Keyword,URL\nshoes,https://x.com\n"),
        upload("good.csv", "Keyword,Position\nshoes,4\n"),
    ];
    let request = AuditRequest::new(
        ColumnMapping::default().with(Role::Position, "Position"),
        FilterConfig::default(),
    );
    let report = run_audit(&files, &request).unwrap();

    assert_eq!(report.competition.len(), 1);
    assert_eq!(report.competition.sources, vec!["good"]);
    assert!(report.has_failures());

    let failed: Vec<_> = report.failed_files().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].file, "broken.csv");
    let Some(FileError::Normalize(NormalizeError::MissingColumns {
        file,
        missing,
        available,
    })) = failed[0].error()
    else {
        panic!("expected a missing column error");
    };
    assert_eq!(file, "broken.csv");
    assert_eq!(missing[0].role, Role::Position);
    assert_eq!(available, &vec!["Keyword".to_string(), "URL".to_string()]);
}

#[test]
fn unsupported_format_is_a_file_diagnostic() {
    let files = vec![
        upload("notes.txt", "Keyword,Position\nshoes,1\n"),
        upload("site.csv", "Keyword,Position\nshoes,1\n"),
    ];
    let report = run_audit(&files, &AuditRequest::default()).unwrap();
    assert!(matches!(
        report.diagnostics[0].error(),
        Some(FileError::Ingest(IngestError::UnsupportedFormat { .. }))
    ));
    assert!(matches!(
        report.diagnostics[1].outcome,
        FileOutcome::Normalized { rows_kept: 1, .. }
    ));
}

#[test]
fn all_files_failing_is_empty_input() {
    let files = vec![upload("broken.csv", "Name,Score\nshoes,3\n")];
    let err = run_audit(&files, &AuditRequest::default()).unwrap_err();
    let AuditError::EmptyInput { diagnostics } = err;
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].is_failed());
}

#[test]
fn dropped_rows_are_reported() {
    let files = vec![upload(
        "site.csv",
        "Keyword,Position\nshoes,2\n,5\nboots,n/a\n",
    )];
    let report = run_audit(&files, &AuditRequest::default()).unwrap();
    let FileOutcome::Normalized {
        rows_read,
        rows_kept,
        rows_dropped,
        ..
    } = &report.diagnostics[0].outcome
    else {
        panic!("expected a normalized file");
    };
    assert_eq!((*rows_read, *rows_kept), (3, 1));
    assert_eq!(rows_dropped.total(), 2);
}

#[test]
fn site_statistics_cover_every_surviving_site() {
    let files = vec![upload(
        "site.csv",
        "Query,Page,Position\na,/a,2\nb,/b,5\nc,/c,12\nd,/d,60\n",
    )];
    let request = AuditRequest::new(
        MappingPreset::GoogleSearchConsole.mapping(),
        FilterConfig::default(),
    );
    let report = run_audit(&files, &request).unwrap();

    let summary = &report.site_summaries[0];
    assert_eq!(summary.site, "site");
    assert_eq!(summary.keywords, 4);
    assert!(summary.volume.is_none());

    let counts: Vec<_> = report
        .interest
        .iter()
        .map(|row| (row.bracket, row.keywords))
        .collect();
    assert_eq!(
        counts,
        vec![
            (InterestBracket::Top3, 1),
            (InterestBracket::Top10, 1),
            (InterestBracket::Top20, 1),
            (InterestBracket::Top50, 0),
            (InterestBracket::Top100, 1),
        ]
    );
}

#[test]
fn duplicate_file_names_become_distinct_sites() {
    let files = vec![
        upload("site.csv", "Keyword,Position\nshoes,1\n"),
        upload("site.csv", "Keyword,Position\nshoes,7\n"),
    ];
    let report = run_audit(&files, &AuditRequest::default()).unwrap();
    assert_eq!(report.competition.sources, vec!["site", "site-2"]);
    assert_eq!(report.competition.rows[0].sites_count, 2);
}

#[test]
fn workbook_and_csv_exports_are_compared_together() {
    let workbook = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../kwa-ingest/tests/fixtures/shop-x.xlsx");
    let files = vec![
        upload(
            "site-a.csv",
            "Keyword,Position,URL,Volume\nRunning Shoes,8,https://site-a.com/shoes,1000\n",
        ),
        UploadedFile::from_path(&workbook).unwrap(),
    ];
    let request = AuditRequest::new(ColumnMapping::default(), FilterConfig::new(2, 10, 1));
    let report = run_audit(&files, &request).unwrap();

    assert!(!report.has_failures());
    assert_eq!(report.competition.sources, vec!["site-a", "shop-x"]);
    assert_eq!(report.competition.len(), 1);
    let row = &report.competition.rows[0];
    assert_eq!(row.keyword, "running shoes");
    assert_eq!(row.sites_in_top, Some(2));
    assert_eq!(row.volume, Some(1200.0));
    assert_eq!(row.position("site-a"), Some(8.0));
    assert_eq!(row.position("shop-x"), Some(3.0));

    let workbook_summary = &report.site_summaries[1];
    assert_eq!(workbook_summary.keywords, 3);
    assert_eq!(workbook_summary.top_10, 2);
}
