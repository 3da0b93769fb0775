//! Differences between two table sets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::TableField;

/// Rendering of an attribute that the element did not carry.
pub const ABSENT_VALUE: &str = "None";

/// A single discrepancy between two documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Difference {
    /// The table exists on one side only.
    MissingTable { table: String, missing_in: String },
    /// The table exists on both sides but one field differs.
    FieldMismatch {
        table: String,
        field: TableField,
        left: Option<String>,
        right: Option<String>,
        left_label: String,
        right_label: String,
    },
}

impl Difference {
    pub fn table(&self) -> &str {
        match self {
            Difference::MissingTable { table, .. } | Difference::FieldMismatch { table, .. } => {
                table
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Difference::MissingTable { .. })
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::MissingTable { table, missing_in } => {
                write!(f, "Table '{table}' is missing in {missing_in}.")
            }
            Difference::FieldMismatch {
                table,
                field,
                left,
                right,
                left_label,
                right_label,
            } => write!(
                f,
                "Table '{table}' has different {field}: {} (in {left_label}) != {} (in {right_label})",
                left.as_deref().unwrap_or(ABSENT_VALUE),
                right.as_deref().unwrap_or(ABSENT_VALUE),
            ),
        }
    }
}

/// Ordered differences from one comparison pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferenceReport {
    pub left_label: String,
    pub right_label: String,
    /// Number of named tables extracted from the left document.
    pub left_tables: usize,
    /// Number of named tables extracted from the right document.
    pub right_tables: usize,
    pub differences: Vec<Difference>,
}

impl DifferenceReport {
    pub fn is_identical(&self) -> bool {
        self.differences.is_empty()
    }

    pub fn missing_count(&self) -> usize {
        self.differences.iter().filter(|d| d.is_missing()).count()
    }

    pub fn mismatch_count(&self) -> usize {
        self.differences.len() - self.missing_count()
    }

    /// Report lines in order, one per difference.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.differences.iter().map(ToString::to_string)
    }
}
