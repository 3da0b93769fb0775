use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use dbdes_cli::pipeline::CompareOutcome;

pub fn print_summary(outcome: &CompareOutcome) {
    let report = &outcome.report;
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Side"),
        header_cell("File"),
        header_cell("Tables"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    table.add_row(vec![
        dim_cell("1"),
        Cell::new(&report.left_label),
        Cell::new(report.left_tables),
    ]);
    table.add_row(vec![
        dim_cell("2"),
        Cell::new(&report.right_label),
        Cell::new(report.right_tables),
    ]);
    println!("{table}");

    if report.is_identical() {
        println!("No differences found.");
    } else {
        println!(
            "Differences: {} ({} missing tables, {} attribute mismatches)",
            report.differences.len(),
            report.missing_count(),
            report.mismatch_count()
        );
    }
    println!("Report: {}", outcome.output.display());
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Attribute value, with absent values dimmed.
pub fn value_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
