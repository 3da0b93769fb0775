//! Tests for report rendering and writing.

use std::fs;

use dbdes_model::{Difference, DifferenceReport, TableField};
use dbdes_report::{ReportError, ReportFormat, render_text, write_report};

fn empty_report() -> DifferenceReport {
    DifferenceReport {
        left_label: "GCM.db.xml".to_string(),
        right_label: "GSCMNDB.db.xml".to_string(),
        left_tables: 1,
        right_tables: 1,
        differences: vec![],
    }
}

fn report_with_differences() -> DifferenceReport {
    let mismatch = |table: &str, field, left: Option<&str>, right: Option<&str>| {
        Difference::FieldMismatch {
            table: table.to_string(),
            field,
            left: left.map(str::to_string),
            right: right.map(str::to_string),
            left_label: "GCM.db.xml".to_string(),
            right_label: "GSCMNDB.db.xml".to_string(),
        }
    };
    DifferenceReport {
        differences: vec![
            Difference::MissingTable {
                table: "AUDIT_LOG".to_string(),
                missing_in: "GSCMNDB.db.xml".to_string(),
            },
            mismatch("ORDERS", TableField::Category, Some("Clinical"), Some("Billing")),
            mismatch("ORDERS", TableField::Product, None, Some("GCM")),
            Difference::MissingTable {
                table: "PATIENT".to_string(),
                missing_in: "GCM.db.xml".to_string(),
            },
        ],
        ..empty_report()
    }
}

#[test]
fn identical_report_is_one_line() {
    assert_eq!(render_text(&empty_report()), "The XML files are identical.\n");
}

#[test]
fn difference_report_snapshot() {
    insta::assert_snapshot!("difference_report", render_text(&report_with_differences()));
}

#[test]
fn difference_report_lines_end_in_newline() {
    let rendered = render_text(&report_with_differences());
    assert!(rendered.starts_with("Differences found:\n"));
    assert!(rendered.ends_with('\n'));
    assert_eq!(rendered.lines().count(), 5);
}

#[test]
fn write_overwrites_existing_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("differences.txt");
    fs::write(&path, "stale contents\nfrom an earlier run\nthat is longer\n").expect("seed");

    write_report(&empty_report(), &path, ReportFormat::Text).expect("write report");

    let contents = fs::read_to_string(&path).expect("read report");
    assert_eq!(contents, "The XML files are identical.\n");
}

#[test]
fn write_text_report() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("differences.txt");

    write_report(&report_with_differences(), &path, ReportFormat::Text).expect("write report");

    let contents = fs::read_to_string(&path).expect("read report");
    assert_eq!(contents, render_text(&report_with_differences()));
}

#[test]
fn unwritable_destination_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("missing").join("differences.txt");

    let err = write_report(&empty_report(), &path, ReportFormat::Text).expect_err("no parent");
    assert!(matches!(err, ReportError::Create { .. }), "{err:?}");
    assert!(err.to_string().contains("differences.txt"));
    assert!(!path.exists());
}
