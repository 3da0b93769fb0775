pub mod difference;
pub mod table;

pub use difference::{Difference, DifferenceReport};
pub use table::{TableField, TableRecord, TableSet};

/// Namespace that qualifies `Table` elements in database-description documents.
pub const DEFAULT_NAMESPACE: &str = "http://db.softcomputer.com/configuration/db";
