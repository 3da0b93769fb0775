//! Plain-text report rendering.

use dbdes_model::DifferenceReport;

/// First line of a report that lists differences.
pub const DIFFERENCES_HEADER: &str = "Differences found:";

/// Sole line of a report with no differences.
pub const IDENTICAL_MESSAGE: &str = "The XML files are identical.";

/// Render the report; every line, including the last, ends in `\n`.
pub fn render_text(report: &DifferenceReport) -> String {
    let mut out = String::new();
    if report.is_identical() {
        out.push_str(IDENTICAL_MESSAGE);
        out.push('\n');
        return out;
    }
    out.push_str(DIFFERENCES_HEADER);
    out.push('\n');
    for difference in &report.differences {
        out.push_str(&difference.to_string());
        out.push('\n');
    }
    out
}
