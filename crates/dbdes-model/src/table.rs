//! Table records extracted from database-description documents.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attributes of a `Table` element that take part in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TableField {
    Category,
    SubCategory,
    Product,
}

impl TableField {
    /// Comparison order.
    pub const ALL: [TableField; 3] = [
        TableField::Category,
        TableField::SubCategory,
        TableField::Product,
    ];

    /// XML attribute name carrying this field.
    pub fn attribute_name(self) -> &'static str {
        match self {
            TableField::Category => "Category",
            TableField::SubCategory => "SubCategory",
            TableField::Product => "Product",
        }
    }
}

impl fmt::Display for TableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute_name())
    }
}

/// One named `Table` element.
///
/// Absent attributes stay `None`; an attribute written as `""` is
/// `Some(String::new())` and compares unequal to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRecord {
    pub name: String,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub product: Option<String>,
}

impl TableRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_field(mut self, field: TableField, value: impl Into<String>) -> Self {
        *self.field_mut(field) = Some(value.into());
        self
    }

    pub fn field(&self, field: TableField) -> Option<&str> {
        match field {
            TableField::Category => self.category.as_deref(),
            TableField::SubCategory => self.sub_category.as_deref(),
            TableField::Product => self.product.as_deref(),
        }
    }

    pub fn field_mut(&mut self, field: TableField) -> &mut Option<String> {
        match field {
            TableField::Category => &mut self.category,
            TableField::SubCategory => &mut self.sub_category,
            TableField::Product => &mut self.product,
        }
    }
}

/// Table records of one document keyed by table name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
    tables: BTreeMap<String, TableRecord>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any earlier record with the same name.
    ///
    /// Returns the replaced record.
    pub fn insert(&mut self, record: TableRecord) -> Option<TableRecord> {
        self.tables.insert(record.name.clone(), record)
    }

    pub fn get(&self, name: &str) -> Option<&TableRecord> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &TableRecord> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl FromIterator<TableRecord> for TableSet {
    fn from_iter<I: IntoIterator<Item = TableRecord>>(iter: I) -> Self {
        let mut set = TableSet::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}
