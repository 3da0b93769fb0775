use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use dbdes_cli::pipeline::{CompareConfig, CompareOutcome, run_compare};
use dbdes_ingest::extract_tables;
use tracing::info_span;

use crate::cli::{CompareArgs, TablesArgs};
use crate::summary::{apply_table_style, header_cell, value_cell};

pub fn run_compare_command(args: &CompareArgs) -> Result<CompareOutcome> {
    let config = CompareConfig::new(&args.file1, &args.file2)
        .with_namespace(args.namespace.clone())
        .with_output(&args.output)
        .with_format(args.format.into());
    run_compare(&config)
}

pub fn run_tables(args: &TablesArgs) -> Result<()> {
    let span = info_span!("tables", path = %args.file.display());
    let _guard = span.enter();
    let tables = extract_tables(&args.file, &args.namespace)
        .with_context(|| format!("parse document {}", args.file.display()))?;

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Category"),
        header_cell("SubCategory"),
        header_cell("Product"),
    ]);
    apply_table_style(&mut table);
    for record in tables.records() {
        table.add_row(vec![
            Cell::new(&record.name),
            value_cell(record.category.as_deref()),
            value_cell(record.sub_category.as_deref()),
            value_cell(record.product.as_deref()),
        ]);
    }
    println!("{table}");
    println!("{} tables", tables.len());
    Ok(())
}
