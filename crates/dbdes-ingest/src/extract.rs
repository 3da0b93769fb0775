//! Streaming extraction of `Table` elements.
//!
//! Documents are read with a namespace-resolving reader, so a `Table`
//! matches whether the namespace is bound as the default or through a
//! prefix. Only the resolved namespace URI and the local name count.
//! Attributes are looked up by their unqualified name.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use dbdes_model::{TableField, TableRecord, TableSet};
use quick_xml::NsReader;
use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use tracing::{Level, debug, debug_span, trace};

use crate::error::{IngestError, Result};

/// Local name of the elements that describe tables.
pub const TABLE_ELEMENT: &[u8] = b"Table";

/// Attribute that keys a table within its document.
pub const NAME_ATTRIBUTE: &[u8] = b"Name";

/// Origin label used for documents that do not come from a file.
const STRING_ORIGIN: &str = "<string>";

/// Extract the table set of the document at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not well-formed XML.
pub fn extract_tables(path: &Path, namespace: &str) -> Result<TableSet> {
    let span = debug_span!("extract", path = %path.display());
    let _guard = span.enter();
    let file = File::open(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    extract_tables_from_reader(BufReader::new(file), &path.display().to_string(), namespace)
}

/// Extract the table set of an in-memory document.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML.
pub fn extract_tables_from_str(xml: &str, namespace: &str) -> Result<TableSet> {
    extract_tables_from_reader(xml.as_bytes(), STRING_ORIGIN, namespace)
}

/// Extract the table set from any buffered source.
///
/// `origin` names the source in error messages. Every `Table` element in
/// `namespace` is visited regardless of nesting depth. Elements without a
/// non-empty `Name` are skipped; when two elements share a name the later
/// one replaces the earlier one. Attribute values are decoded with the
/// encoding named in the XML declaration.
///
/// # Errors
///
/// Returns an error if the document is not well-formed XML: syntax errors,
/// mismatched or missing end tags, more than one root element, content
/// outside the root, undefined entities, or unbound namespace prefixes.
pub fn extract_tables_from_reader<R: BufRead>(
    source: R,
    origin: &str,
    namespace: &str,
) -> Result<TableSet> {
    let mut reader = NsReader::from_reader(source);
    let mut tables = TableSet::new();
    let mut open_elements: Vec<String> = Vec::new();
    let mut seen_root = false;
    let mut root_closed = false;
    let mut unnamed = 0usize;
    let mut buf = Vec::new();

    loop {
        let (resolved, event) =
            reader
                .read_resolved_event_into(&mut buf)
                .map_err(|source| IngestError::Xml {
                    origin: origin.to_string(),
                    source,
                })?;
        let in_namespace = matches!(
            resolved,
            ResolveResult::Bound(Namespace(uri)) if uri == namespace.as_bytes()
        );
        let unbound_prefix = match &resolved {
            ResolveResult::Unknown(prefix) => Some(String::from_utf8_lossy(prefix).into_owned()),
            _ => None,
        };
        // The XML declaration may switch the encoding, so fetch per event.
        let decoder = reader.decoder();
        match &event {
            Event::Start(element) | Event::Empty(element) => {
                if root_closed {
                    return Err(not_well_formed(
                        origin,
                        format!("second root element <{}>", element_name(element)),
                    ));
                }
                if let Some(prefix) = unbound_prefix {
                    return Err(not_well_formed(
                        origin,
                        format!(
                            "unbound namespace prefix '{prefix}' on <{}>",
                            element_name(element)
                        ),
                    ));
                }
                seen_root = true;
                check_attributes(element, decoder, origin)?;
                trace_element(element, open_elements.len());
                if in_namespace && element.local_name().as_ref() == TABLE_ELEMENT {
                    visit_table(element, decoder, origin, &mut tables, &mut unnamed)?;
                }
                if matches!(event, Event::Start(_)) {
                    open_elements.push(element_name(element));
                }
            }
            Event::End(_) => {
                open_elements.pop();
                root_closed = open_elements.is_empty();
            }
            Event::Text(text) if open_elements.is_empty() && !is_xml_whitespace(text) => {
                return Err(not_well_formed(origin, "text outside the root element"));
            }
            Event::CData(_) if open_elements.is_empty() => {
                return Err(not_well_formed(origin, "CDATA outside the root element"));
            }
            Event::GeneralRef(reference) => {
                let name = String::from_utf8_lossy(reference);
                if open_elements.is_empty() {
                    return Err(not_well_formed(
                        origin,
                        format!("reference &{name}; outside the root element"),
                    ));
                }
                if !is_known_reference(&name) {
                    return Err(not_well_formed(
                        origin,
                        format!("undefined entity &{name};"),
                    ));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(element) = open_elements.pop() {
        return Err(IngestError::UnclosedElement {
            origin: origin.to_string(),
            element,
        });
    }
    if !seen_root {
        return Err(IngestError::NoRootElement {
            origin: origin.to_string(),
        });
    }

    debug!(
        origin,
        table_count = tables.len(),
        unnamed_count = unnamed,
        "extracted tables"
    );
    Ok(tables)
}

fn not_well_formed(origin: &str, reason: impl Into<String>) -> IngestError {
    IngestError::NotWellFormed {
        origin: origin.to_string(),
        reason: reason.into(),
    }
}

fn is_xml_whitespace(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .all(|byte| matches!(byte, b' ' | b'\t' | b'\r' | b'\n'))
}

/// Predefined entities and valid character references.
fn is_known_reference(name: &str) -> bool {
    if let Some(number) = name.strip_prefix('#') {
        let code = match number.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => number.parse::<u32>(),
        };
        return code
            .ok()
            .and_then(char::from_u32)
            .is_some_and(|c| c != '\0');
    }
    matches!(name, "lt" | "gt" | "amp" | "apos" | "quot")
}

/// Decode every attribute so duplicates and bad references fail on any element.
fn check_attributes(element: &BytesStart<'_>, decoder: Decoder, origin: &str) -> Result<()> {
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|source| IngestError::Attribute {
            origin: origin.to_string(),
            source,
        })?;
        attribute
            .decode_and_unescape_value(decoder)
            .map_err(|source| IngestError::Xml {
                origin: origin.to_string(),
                source,
            })?;
    }
    Ok(())
}

fn visit_table(
    element: &BytesStart<'_>,
    decoder: Decoder,
    origin: &str,
    tables: &mut TableSet,
    unnamed: &mut usize,
) -> Result<()> {
    let Some(record) = read_table(element, decoder, origin)? else {
        *unnamed += 1;
        return Ok(());
    };
    let name = record.name.clone();
    if tables.insert(record).is_some() {
        debug!(origin, table = %name, "duplicate table name, later element replaces earlier");
    }
    Ok(())
}

/// Read a `Table` element into a record, or `None` when it has no usable name.
fn read_table(
    element: &BytesStart<'_>,
    decoder: Decoder,
    origin: &str,
) -> Result<Option<TableRecord>> {
    let mut name: Option<String> = None;
    let mut record = TableRecord::default();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|source| IngestError::Attribute {
            origin: origin.to_string(),
            source,
        })?;
        let key = attribute.key.as_ref();
        let field = TableField::ALL
            .into_iter()
            .find(|field| field.attribute_name().as_bytes() == key);
        if key != NAME_ATTRIBUTE && field.is_none() {
            continue;
        }
        let value = attribute
            .decode_and_unescape_value(decoder)
            .map_err(|source| IngestError::Xml {
                origin: origin.to_string(),
                source,
            })?
            .into_owned();
        match field {
            Some(field) => *record.field_mut(field) = Some(value),
            None => name = Some(value),
        }
    }
    Ok(name.filter(|name| !name.is_empty()).map(|name| TableRecord {
        name,
        ..record
    }))
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Emit the element tree as TRACE events for diagnostics.
fn trace_element(element: &BytesStart<'_>, depth: usize) {
    if !tracing::enabled!(Level::TRACE) {
        return;
    }
    let attributes: Vec<String> = element
        .attributes()
        .flatten()
        .map(|attribute| {
            format!(
                "{}={:?}",
                String::from_utf8_lossy(attribute.key.as_ref()),
                String::from_utf8_lossy(&attribute.value)
            )
        })
        .collect();
    trace!(
        depth,
        element = %element_name(element),
        attributes = %attributes.join(" "),
        "element"
    );
}
