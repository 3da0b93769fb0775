//! Error types for document extraction.

use std::path::PathBuf;

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors that can occur while reading a database-description document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// The document could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error("malformed XML in {origin}: {source}")]
    Xml {
        origin: String,
        #[source]
        source: quick_xml::Error,
    },

    /// An element carries a malformed or duplicated attribute.
    #[error("malformed attribute in {origin}: {source}")]
    Attribute {
        origin: String,
        #[source]
        source: AttrError,
    },

    /// The document parses but breaks an XML well-formedness rule.
    #[error("{origin} is not well-formed: {reason}")]
    NotWellFormed { origin: String, reason: String },

    /// Input ended while an element was still open.
    #[error("unexpected end of {origin}: <{element}> is never closed")]
    UnclosedElement { origin: String, element: String },

    /// The document contains no elements at all.
    #[error("no root element found in {origin}")]
    NoRootElement { origin: String },
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, IngestError>;
