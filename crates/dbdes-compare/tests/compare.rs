//! Comparison scenarios and properties.

use std::collections::BTreeSet;

use dbdes_compare::compare;
use dbdes_model::{Difference, TableField, TableRecord, TableSet};
use proptest::prelude::*;

fn record(name: &str, category: &str, sub_category: &str, product: &str) -> TableRecord {
    TableRecord::new(name)
        .with_field(TableField::Category, category)
        .with_field(TableField::SubCategory, sub_category)
        .with_field(TableField::Product, product)
}

fn lines(left: &TableSet, right: &TableSet) -> Vec<String> {
    compare(left, right, "A", "B").lines().collect()
}

#[test]
fn reports_single_category_change() {
    let left = TableSet::from_iter([record("T1", "C1", "S1", "P1")]);
    let right = TableSet::from_iter([record("T1", "C2", "S1", "P1")]);

    assert_eq!(
        lines(&left, &right),
        vec!["Table 'T1' has different Category: C1 (in A) != C2 (in B)"]
    );
}

#[test]
fn reports_table_missing_on_right() {
    let left = TableSet::from_iter([TableRecord::new("T1")]);
    let right = TableSet::new();

    assert_eq!(lines(&left, &right), vec!["Table 'T1' is missing in B."]);
}

#[test]
fn reports_table_missing_on_left() {
    let left = TableSet::new();
    let right = TableSet::from_iter([TableRecord::new("T1")]);

    assert_eq!(lines(&left, &right), vec!["Table 'T1' is missing in A."]);
}

#[test]
fn identical_sets_produce_empty_report() {
    let set = TableSet::from_iter([record("T1", "C", "S", "P")]);
    let report = compare(&set, &set.clone(), "A", "B");

    assert!(report.is_identical());
    assert_eq!(report.left_tables, 1);
    assert_eq!(report.right_tables, 1);
}

#[test]
fn absent_attribute_differs_from_value() {
    let left = TableSet::from_iter([TableRecord::new("T1")
        .with_field(TableField::Category, "C")
        .with_field(TableField::SubCategory, "S")]);
    let right = TableSet::from_iter([record("T1", "C", "S", "P1")]);

    assert_eq!(
        lines(&left, &right),
        vec!["Table 'T1' has different Product: None (in A) != P1 (in B)"]
    );
}

#[test]
fn absent_attribute_differs_from_empty_value() {
    let left = TableSet::from_iter([TableRecord::new("T1")]);
    let right = TableSet::from_iter([TableRecord::new("T1").with_field(TableField::Category, "")]);

    let report = compare(&left, &right, "A", "B");
    assert_eq!(report.mismatch_count(), 1);
}

#[test]
fn both_absent_is_equal() {
    let left = TableSet::from_iter([TableRecord::new("T1")]);
    let right = TableSet::from_iter([TableRecord::new("T1")]);

    assert!(compare(&left, &right, "A", "B").is_identical());
}

#[test]
fn output_is_sorted_by_table_name() {
    let left = TableSet::from_iter([
        record("Orders", "C", "S", "P"),
        record("Accounts", "C", "S", "P"),
    ]);
    let right = TableSet::from_iter([record("Orders", "X", "S", "Y"), record("Billing", "C", "S", "P")]);

    assert_eq!(
        lines(&left, &right),
        vec![
            "Table 'Accounts' is missing in B.",
            "Table 'Billing' is missing in A.",
            "Table 'Orders' has different Category: C (in A) != X (in B)",
            "Table 'Orders' has different Product: P (in A) != Y (in B)",
        ]
    );
}

#[test]
fn labels_are_used_verbatim() {
    let left = TableSet::from_iter([record("T1", "C1", "S", "P")]);
    let right = TableSet::from_iter([record("T1", "C2", "S", "P")]);

    let report = compare(&left, &right, "GCM.db.xml", "GSCMNDB.db.xml");
    assert_eq!(
        report.lines().collect::<Vec<_>>(),
        vec!["Table 'T1' has different Category: C1 (in GCM.db.xml) != C2 (in GSCMNDB.db.xml)"]
    );
}

fn value() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(vec!["", "A", "B", "a"]).prop_map(String::from))
}

fn table_set() -> impl Strategy<Value = TableSet> {
    prop::collection::btree_map("[A-E][0-9]?", (value(), value(), value()), 0..8).prop_map(
        |tables| {
            tables
                .into_iter()
                .map(|(name, (category, sub_category, product))| TableRecord {
                    name,
                    category,
                    sub_category,
                    product,
                })
                .collect()
        },
    )
}

fn missing_in<'a>(differences: &'a [Difference], label: &'a str) -> BTreeSet<&'a str> {
    differences
        .iter()
        .filter_map(|d| match d {
            Difference::MissingTable { table, missing_in } if missing_in == label => {
                Some(table.as_str())
            }
            _ => None,
        })
        .collect()
}

proptest! {
    #[test]
    fn missing_detection_is_symmetric(left in table_set(), right in table_set()) {
        let report = compare(&left, &right, "A", "B");
        let only_left: BTreeSet<&str> = left.names().filter(|n| !right.contains(n)).collect();
        let only_right: BTreeSet<&str> = right.names().filter(|n| !left.contains(n)).collect();

        prop_assert_eq!(missing_in(&report.differences, "B"), only_left);
        prop_assert_eq!(missing_in(&report.differences, "A"), only_right);
        prop_assert_eq!(report.missing_count(), report.differences.iter().filter(|d| d.is_missing()).count());
    }

    #[test]
    fn every_difference_names_a_known_table(left in table_set(), right in table_set()) {
        let report = compare(&left, &right, "A", "B");
        let union: BTreeSet<&str> = left.names().chain(right.names()).collect();
        for difference in &report.differences {
            prop_assert!(union.contains(difference.table()));
        }
        // A table is reported missing at most once.
        let mut seen = BTreeSet::new();
        for difference in report.differences.iter().filter(|d| d.is_missing()) {
            prop_assert!(seen.insert(difference.table().to_string()));
        }
    }

    #[test]
    fn equal_records_produce_no_lines(set in table_set()) {
        prop_assert!(compare(&set, &set.clone(), "A", "B").is_identical());
    }

    #[test]
    fn mismatch_count_matches_unequal_fields(left in table_set(), right in table_set()) {
        let report = compare(&left, &right, "A", "B");
        let expected: usize = left
            .records()
            .filter_map(|a| right.get(&a.name).map(|b| (a, b)))
            .map(|(a, b)| TableField::ALL.iter().filter(|f| a.field(**f) != b.field(**f)).count())
            .sum();
        prop_assert_eq!(report.mismatch_count(), expected);
    }

    #[test]
    fn comparison_is_repeatable(left in table_set(), right in table_set()) {
        prop_assert_eq!(compare(&left, &right, "A", "B"), compare(&left, &right, "A", "B"));
    }

    #[test]
    fn empty_side_reports_every_table_missing(set in table_set()) {
        let report = compare(&TableSet::new(), &set, "A", "B");
        prop_assert_eq!(report.differences.len(), set.len());
        prop_assert!(report.differences.iter().all(Difference::is_missing));
    }
}
