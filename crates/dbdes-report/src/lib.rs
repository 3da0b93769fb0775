//! Difference report output.

pub mod error;
pub mod text;

pub use error::{ReportError, Result};
pub use text::{DIFFERENCES_HEADER, IDENTICAL_MESSAGE, render_text};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use dbdes_model::DifferenceReport;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Report file name used when no destination is configured.
pub const DEFAULT_REPORT_FILE: &str = "differences.txt";

/// Report file format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Header plus one line per difference.
    #[default]
    Text,
    /// The whole report as pretty-printed JSON.
    Json,
}

/// Write `report` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_report(report: &DifferenceReport, path: &Path, format: ReportFormat) -> Result<()> {
    let file = File::create(path).map_err(|source| ReportError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    match format {
        ReportFormat::Text => writer
            .write_all(render_text(report).as_bytes())
            .map_err(|source| ReportError::Write {
                path: path.to_path_buf(),
                source,
            })?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, report).map_err(|source| {
                ReportError::Json {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            writer
                .write_all(b"\n")
                .map_err(|source| ReportError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
    }
    writer.flush().map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        difference_count = report.differences.len(),
        "report written"
    );
    Ok(())
}
