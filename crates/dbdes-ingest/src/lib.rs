pub mod error;
pub mod extract;

pub use error::{IngestError, Result};
pub use extract::{
    NAME_ATTRIBUTE, TABLE_ELEMENT, extract_tables, extract_tables_from_reader,
    extract_tables_from_str,
};
