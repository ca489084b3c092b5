//! Renders a people document as fixed-width records.
//!
//! The record layouts come from `fixedml`'s layout table, so a line written
//! here reads back through the record router into the same elements. Line
//! order follows the document:
//!
//! ```text
//! 000                      root opened
//! 001                      header, if the root has header fields
//! 100                      per person
//! 101                      identity, if any identity field is present
//! 201 / 301                per address / phone, in document order
//! 199                      person closed
//! 999                      root closed
//! ```

use fixedml::{
    ADDRESS_ELEMENT, Align, Field, PERSON_ELEMENT, PHONE_ELEMENT, ROOT_ELEMENT, RecordType,
};
use log::{debug, info};
use roxmltree::{Document, Node};

use crate::error::WriteError;

fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

fn field_text<'a>(node: Node<'a, '_>, field: Field) -> &'a str {
    let text = child_elements(node)
        .find(|n| n.tag_name().name() == field.name)
        .and_then(|n| n.text())
        .unwrap_or("");
    if field.trim { text.trim() } else { text }
}

fn has_any_field(node: Node<'_, '_>, record_type: RecordType) -> bool {
    record_type
        .fields()
        .any(|field| child_elements(node).any(|n| n.tag_name().name() == field.name))
}

/// Pad one value to its field width.
pub fn format_field(field: Field, value: &str) -> Result<String, WriteError> {
    if value.contains(['\n', '\r']) {
        return Err(WriteError::LineBreak { field: field.name });
    }
    if value.chars().count() > field.width {
        return Err(WriteError::FieldOverflow {
            field: field.name,
            width: field.width,
            value: value.to_string(),
        });
    }
    let width = field.width;
    Ok(match field.align {
        Align::Left => format!("{value:<width$}"),
        Align::Right => format!("{value:>width$}"),
    })
}

/// Render one record line: the tag followed by every field taken from the
/// children of `node`. Missing elements are written as blanks.
pub fn format_record(record_type: RecordType, node: Node<'_, '_>) -> Result<String, WriteError> {
    let mut line = String::with_capacity(record_type.width());
    line.push_str(record_type.tag());
    for field in record_type.fields() {
        line.push_str(&format_field(field, field_text(node, field))?);
    }
    Ok(line)
}

struct Lines {
    lines: Vec<String>,
}

impl Lines {
    fn tag(&mut self, record_type: RecordType) {
        self.lines.push(record_type.tag().to_string());
    }

    fn record(&mut self, record_type: RecordType, node: Node<'_, '_>) -> Result<(), WriteError> {
        let line = format_record(record_type, node)?;
        debug!("{:?}: {} characters", record_type, line.chars().count());
        self.lines.push(line);
        Ok(())
    }
}

/// Convert a people XML document into fixed-width text, one record per line.
pub fn write_fixed(xml: &str) -> Result<String, WriteError> {
    let doc = Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT_ELEMENT {
        return Err(WriteError::UnexpectedRoot {
            found: root.tag_name().name().to_string(),
            expected: ROOT_ELEMENT,
        });
    }

    let mut out = Lines { lines: Vec::new() };
    out.tag(RecordType::DocumentStart);
    if has_any_field(root, RecordType::Header) {
        out.record(RecordType::Header, root)?;
    }

    let mut people = 0;
    for node in child_elements(root).filter(|n| n.tag_name().name() == PERSON_ELEMENT) {
        people += 1;
        out.tag(RecordType::PersonStart);
        if has_any_field(node, RecordType::PersonIdentity) {
            out.record(RecordType::PersonIdentity, node)?;
        }
        for child in child_elements(node) {
            match child.tag_name().name() {
                ADDRESS_ELEMENT => out.record(RecordType::Address, child)?,
                PHONE_ELEMENT => out.record(RecordType::Phone, child)?,
                _ => {}
            }
        }
        out.tag(RecordType::Close);
    }
    out.tag(RecordType::DocumentEnd);

    info!("wrote {} records for {people} people", out.lines.len());
    let mut text = out.lines.join("\n");
    text.push('\n');
    Ok(text)
}
