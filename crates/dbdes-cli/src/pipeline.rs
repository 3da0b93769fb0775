//! Extract, compare, and report.
//!
//! The pipeline is strictly linear: both documents are parsed before the
//! comparison runs, and the report is only written once the comparison is
//! complete. A parse failure on either input therefore leaves no report
//! behind.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use dbdes_compare::compare;
use dbdes_ingest::extract_tables;
use dbdes_model::{DEFAULT_NAMESPACE, DifferenceReport, TableSet};
use dbdes_report::{DEFAULT_REPORT_FILE, ReportFormat, write_report};
use tracing::{info, info_span};

/// Inputs and destination of one comparison run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareConfig {
    /// First document; its base name labels the left side.
    pub file1: PathBuf,
    /// Second document; its base name labels the right side.
    pub file2: PathBuf,
    /// Namespace URI qualifying `Table` elements.
    pub namespace: String,
    /// Report destination, overwritten on every run.
    pub output: PathBuf,
    pub format: ReportFormat,
}

impl CompareConfig {
    /// Configuration with the default namespace, report path, and format.
    pub fn new(file1: impl Into<PathBuf>, file2: impl Into<PathBuf>) -> Self {
        Self {
            file1: file1.into(),
            file2: file2.into(),
            namespace: DEFAULT_NAMESPACE.to_string(),
            output: PathBuf::from(DEFAULT_REPORT_FILE),
            format: ReportFormat::default(),
        }
    }

    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }
}

/// Result of a completed run.
#[derive(Debug)]
pub struct CompareOutcome {
    pub report: DifferenceReport,
    /// Where the report was written.
    pub output: PathBuf,
}

/// Label used for a document in report lines: its file name, or the whole
/// path when it has none.
pub fn source_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run the full pipeline for `config`.
///
/// # Errors
///
/// Fails if either document cannot be read or parsed, or if the report
/// cannot be written.
pub fn run_compare(config: &CompareConfig) -> Result<CompareOutcome> {
    let left_label = source_label(&config.file1);
    let right_label = source_label(&config.file2);
    let span = info_span!("compare", left = %left_label, right = %right_label);
    let _guard = span.enter();

    let left = load_tables(&config.file1, &config.namespace, "first")?;
    let right = load_tables(&config.file2, &config.namespace, "second")?;

    let compare_start = Instant::now();
    let report = info_span!("diff").in_scope(|| compare(&left, &right, &left_label, &right_label));
    info!(
        difference_count = report.differences.len(),
        missing_count = report.missing_count(),
        mismatch_count = report.mismatch_count(),
        duration_ms = compare_start.elapsed().as_millis(),
        "comparison complete"
    );

    info_span!("report", path = %config.output.display())
        .in_scope(|| write_report(&report, &config.output, config.format))
        .with_context(|| format!("write report {}", config.output.display()))?;

    Ok(CompareOutcome {
        report,
        output: config.output.clone(),
    })
}

/// Extract one document's tables, naming the file and its position on failure.
pub fn load_tables(path: &Path, namespace: &str, position: &str) -> Result<TableSet> {
    let span = info_span!("ingest", path = %path.display());
    let _guard = span.enter();
    let start = Instant::now();
    let tables = extract_tables(path, namespace)
        .with_context(|| format!("parse {position} document {}", path.display()))?;
    info!(
        table_count = tables.len(),
        duration_ms = start.elapsed().as_millis(),
        "ingest complete"
    );
    Ok(tables)
}
