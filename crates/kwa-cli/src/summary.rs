use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use kwa_core::{FileDiagnostic, FileOutcome};
use kwa_map::MatchKind;
use kwa_model::{ColumnOrigin, FilterPreset, MappingPreset, ResolvedColumn, Role};

use crate::commands::{AuditRun, DetectResult};

/// Rows of the competition table shown in the terminal.
const TOP_KEYWORDS: usize = 15;

pub fn print_summary(run: &AuditRun) {
    let report = &run.report;
    println!("Mapping: {}", describe_mapping(run));
    println!(
        "Filters: min sites {}, top positions {}, min sites in top {}",
        run.filters.min_sites, run.filters.top_positions, run.filters.min_sites_in_top
    );
    print_diagnostics(&report.diagnostics);

    let mut sites = Table::new();
    let mut header = vec![
        header_cell("Site"),
        header_cell("Keywords"),
        header_cell("Avg pos"),
        header_cell("Top 3"),
        header_cell("Top 10"),
        header_cell("Top 20"),
        header_cell("Top 50"),
        header_cell("Top 100"),
    ];
    if report.dataset.has_volume {
        header.push(header_cell("Volume"));
    }
    sites.set_header(header);
    apply_summary_table_style(&mut sites);
    for index in 1..sites.column_count() {
        align_column(&mut sites, index, CellAlignment::Right);
    }
    for summary in &report.site_summaries {
        let mut row = vec![
            site_cell(&summary.site),
            Cell::new(summary.keywords),
            Cell::new(format!("{:.1}", summary.avg_position)),
            count_cell(summary.top_3, Color::Green),
            count_cell(summary.top_10, Color::Green),
            Cell::new(summary.top_20),
            Cell::new(summary.top_50),
            Cell::new(summary.top_100),
        ];
        if let Some(volume) = &summary.volume {
            row.push(Cell::new(format!("{:.0}", volume.total)));
        }
        sites.add_row(row);
    }
    println!();
    println!("Sites:");
    println!("{sites}");

    print_competition(run);

    match &run.output_dir {
        Some(dir) => {
            println!();
            println!("Output: {}", dir.display());
            for path in &run.written {
                println!("  {}", path.display());
            }
        }
        None => println!("\nDry run: no report written."),
    }
}

fn print_competition(run: &AuditRun) {
    let competition = &run.report.competition;
    println!();
    if competition.is_empty() {
        println!("No keyword matches the filters.");
        return;
    }
    println!(
        "Keywords: {} (showing {})",
        competition.len(),
        competition.len().min(TOP_KEYWORDS)
    );
    let mut table = Table::new();
    let mut header = vec![header_cell("Keyword"), header_cell("Sites")];
    if let Some(top) = competition.top_positions {
        header.push(header_cell(&format!("Top {top}")));
    }
    if competition.has_volume {
        header.push(header_cell("Volume"));
    }
    for source in &competition.sources {
        header.push(header_cell(source));
    }
    table.set_header(header);
    apply_table_style(&mut table);
    for index in 1..table.column_count() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for row in competition.rows.iter().take(TOP_KEYWORDS) {
        let mut cells = vec![Cell::new(&row.keyword), Cell::new(row.sites_count)];
        if let Some(in_top) = row.sites_in_top {
            cells.push(count_cell(in_top, Color::Green));
        }
        if competition.has_volume {
            cells.push(match row.volume {
                Some(volume) => Cell::new(format!("{volume:.0}")),
                None => dim_cell("-"),
            });
        }
        for source in &competition.sources {
            cells.push(position_cell(row.position(source)));
        }
        table.add_row(cells);
    }
    println!("{table}");
}

fn describe_mapping(run: &AuditRun) -> String {
    Role::ALL
        .iter()
        .map(|role| {
            let column = run.mapping.get(*role).unwrap_or("auto");
            format!("{role}={column}")
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-file table followed by the error of every failed file.
pub fn print_diagnostics(diagnostics: &[FileDiagnostic]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Site"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Kept"),
        header_cell("Dropped"),
        header_cell(Role::Keyword.label()),
        header_cell(Role::Position.label()),
        header_cell(Role::Url.label()),
        header_cell(Role::Volume.label()),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);

    let mut errors = Vec::new();
    for diagnostic in diagnostics {
        let mut row = vec![Cell::new(&diagnostic.file), site_cell(&diagnostic.source)];
        match &diagnostic.outcome {
            FileOutcome::Normalized {
                columns,
                rows_read,
                rows_kept,
                rows_dropped,
            } => {
                row.push(
                    Cell::new("OK")
                        .fg(Color::Green)
                        .add_attribute(Attribute::Bold),
                );
                row.push(Cell::new(rows_read));
                row.push(Cell::new(rows_kept));
                row.push(count_cell(rows_dropped.total(), Color::Yellow));
                for role in Role::ALL {
                    row.push(column_cell(columns.get(role)));
                }
            }
            FileOutcome::Failed { error } => {
                row.push(
                    Cell::new("FAILED")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                );
                for _ in 0..3 + Role::ALL.len() {
                    row.push(dim_cell("-"));
                }
                errors.push(format!("{}: {error}", diagnostic.file));
            }
        }
        table.add_row(row);
    }
    println!("Files:");
    println!("{table}");
    if !errors.is_empty() {
        eprintln!("Errors:");
        for error in &errors {
            eprintln!("- {error}");
        }
    }
}

pub fn print_detection(results: &[DetectResult]) {
    for result in results {
        println!("{}", result.file.display());
        let detection = match &result.outcome {
            Ok(detection) => detection,
            Err(error) => {
                eprintln!("  error: {error:#}");
                continue;
            }
        };
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Role"),
            header_cell("Column"),
            header_cell("Match"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Center);
        for role in Role::ALL {
            let (column, kind) = match detection.detected.get(role) {
                Some(column) => (
                    Cell::new(&column.name),
                    match column.kind {
                        MatchKind::Exact => Cell::new("exact").fg(Color::Green),
                        MatchKind::Partial => Cell::new("partial").fg(Color::Yellow),
                    },
                ),
                None if role.is_mandatory() => (
                    Cell::new("not found")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                ),
                None => (dim_cell("not found"), dim_cell("-")),
            };
            table.add_row(vec![Cell::new(role.label()), column, kind]);
        }
        println!("{table}");
        println!("  Available columns: {}", detection.headers.join(", "));
        println!();
    }
}

pub fn print_presets() {
    let mut mappings = Table::new();
    mappings.set_header(vec![
        header_cell("Preset"),
        header_cell("Name"),
        header_cell(Role::Keyword.label()),
        header_cell(Role::Position.label()),
        header_cell(Role::Url.label()),
        header_cell(Role::Volume.label()),
    ]);
    apply_table_style(&mut mappings);
    for preset in MappingPreset::ALL {
        let mapping = preset.mapping();
        let mut row = vec![Cell::new(preset_arg_name(preset)), Cell::new(preset.label())];
        for role in Role::ALL {
            row.push(match mapping.get(role) {
                Some(column) => Cell::new(column),
                None => dim_cell("auto"),
            });
        }
        mappings.add_row(row);
    }
    println!("Mapping presets:");
    println!("{mappings}");

    let mut filters = Table::new();
    filters.set_header(vec![
        header_cell("Filter"),
        header_cell("Min sites"),
        header_cell("Top positions"),
        header_cell("Min in top"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut filters);
    for index in 1..4 {
        align_column(&mut filters, index, CellAlignment::Right);
    }
    for preset in FilterPreset::ALL {
        let config = preset.config();
        filters.add_row(vec![
            Cell::new(filter_arg_name(preset)),
            Cell::new(config.min_sites),
            Cell::new(config.top_positions),
            Cell::new(config.min_sites_in_top),
            Cell::new(preset.description()),
        ]);
    }
    println!();
    println!("Filter presets:");
    println!("{filters}");
}

fn preset_arg_name(preset: MappingPreset) -> &'static str {
    match preset {
        MappingPreset::Custom => "custom",
        MappingPreset::Semrush => "semrush",
        MappingPreset::Ahrefs => "ahrefs",
        MappingPreset::GoogleSearchConsole => "gsc",
    }
}

fn filter_arg_name(preset: FilterPreset) -> &'static str {
    match preset {
        FilterPreset::Custom => "custom",
        FilterPreset::AllData => "all",
        FilterPreset::Top10 => "top10",
        FilterPreset::Top20 => "top20",
        FilterPreset::Top30 => "top30",
        FilterPreset::TwoSitesTop10 => "two-sites-top10",
        FilterPreset::TwoSitesTop20 => "two-sites-top20",
        FilterPreset::TwoSitesTop30 => "two-sites-top30",
    }
}

fn column_cell(column: Option<&ResolvedColumn>) -> Cell {
    match column {
        Some(column) if column.origin == ColumnOrigin::Detected => {
            Cell::new(format!("{} (auto)", column.name)).fg(Color::Blue)
        }
        Some(column) => Cell::new(&column.name),
        None => dim_cell("-"),
    }
}

fn position_cell(position: Option<f64>) -> Cell {
    match position {
        Some(value) if value <= 3.0 => Cell::new(format_position(value))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        Some(value) if value <= 10.0 => Cell::new(format_position(value)).fg(Color::Green),
        Some(value) => Cell::new(format_position(value)),
        None => dim_cell("-"),
    }
}

fn format_position(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn site_cell(site: &str) -> Cell {
    Cell::new(site)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(165);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
