//! Comparison of two table sets.
//!
//! Names from both sides are visited in ascending byte order, and within a
//! table the fields are checked in [`TableField::ALL`] order, so the same
//! two inputs always yield the same report.

use std::collections::BTreeSet;

use dbdes_model::{Difference, DifferenceReport, TableField, TableRecord, TableSet};
use tracing::debug;

/// Compare two table sets and list every discrepancy.
///
/// The labels only appear in the rendered messages.
pub fn compare(
    left: &TableSet,
    right: &TableSet,
    left_label: &str,
    right_label: &str,
) -> DifferenceReport {
    let names: BTreeSet<&str> = left.names().chain(right.names()).collect();
    debug!(
        left_tables = left.len(),
        right_tables = right.len(),
        union = names.len(),
        "comparing tables"
    );

    let mut differences = Vec::new();
    for name in names {
        match (left.get(name), right.get(name)) {
            (None, _) => differences.push(Difference::MissingTable {
                table: name.to_string(),
                missing_in: left_label.to_string(),
            }),
            (Some(_), None) => differences.push(Difference::MissingTable {
                table: name.to_string(),
                missing_in: right_label.to_string(),
            }),
            (Some(a), Some(b)) => {
                let before = differences.len();
                differences.extend(compare_fields(a, b, left_label, right_label));
                if differences.len() > before {
                    debug!(
                        table = name,
                        left_category = ?a.category,
                        left_sub_category = ?a.sub_category,
                        left_product = ?a.product,
                        right_category = ?b.category,
                        right_sub_category = ?b.sub_category,
                        right_product = ?b.product,
                        "table attributes differ"
                    );
                }
            }
        }
    }

    DifferenceReport {
        left_label: left_label.to_string(),
        right_label: right_label.to_string(),
        left_tables: left.len(),
        right_tables: right.len(),
        differences,
    }
}

/// Field mismatches between two records of the same table.
pub fn compare_fields<'a>(
    left: &'a TableRecord,
    right: &'a TableRecord,
    left_label: &'a str,
    right_label: &'a str,
) -> impl Iterator<Item = Difference> + 'a {
    TableField::ALL.into_iter().filter_map(move |field| {
        let (a, b) = (left.field(field), right.field(field));
        (a != b).then(|| Difference::FieldMismatch {
            table: left.name.clone(),
            field,
            left: a.map(str::to_string),
            right: b.map(str::to_string),
            left_label: left_label.to_string(),
            right_label: right_label.to_string(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, category: &str, sub_category: &str, product: &str) -> TableRecord {
        TableRecord::new(name)
            .with_field(TableField::Category, category)
            .with_field(TableField::SubCategory, sub_category)
            .with_field(TableField::Product, product)
    }

    #[test]
    fn identical_records_have_no_field_differences() {
        let a = record("T1", "C", "S", "P");
        assert_eq!(compare_fields(&a, &a.clone(), "A", "B").count(), 0);
    }

    #[test]
    fn field_differences_follow_field_order() {
        let a = record("T1", "C1", "S1", "P1");
        let b = record("T1", "C2", "S1", "P2");
        let fields: Vec<TableField> = compare_fields(&a, &b, "A", "B")
            .map(|d| match d {
                Difference::FieldMismatch { field, .. } => field,
                Difference::MissingTable { .. } => panic!("unexpected missing table"),
            })
            .collect();
        assert_eq!(fields, vec![TableField::Category, TableField::Product]);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let a = record("T1", "core", "S", "P");
        let b = record("T1", "Core", "S", "P");
        assert_eq!(compare_fields(&a, &b, "A", "B").count(), 1);
    }
}
