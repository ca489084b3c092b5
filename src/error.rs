//! Error types for record scanning and document conversion.
//!
//! `RecordError` covers faults inside a single record (scanner level).
//! `ConvertError` covers the whole document and tags record faults with the
//! line they occurred on. Every error aborts the conversion; no partial
//! document is ever returned.

use thiserror::Error;

/// A document handler failed to accept an event (e.g. the XML writer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HandlerError(pub String);

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Faults raised while scanning one fixed-width record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line is too short to hold its 3-character type tag.
    #[error("malformed tag: line has {len} characters, a record needs at least 3")]
    MalformedTag { len: usize },

    /// A field read runs past the end of the line.
    #[error("truncated record: field at {pos} of width {width} exceeds line length {len}")]
    TruncatedRecord { pos: usize, width: usize, len: usize },

    /// A close was requested with no element open.
    #[error("unbalanced close: no open element to close")]
    UnbalancedClose,

    /// The document was ended while non-root elements were still open.
    #[error("document ended with unclosed elements: {}", .open.join(", "))]
    UnclosedElements { open: Vec<String> },

    #[error("document handler error: {0}")]
    Handler(#[from] HandlerError),
}

/// Faults raised while converting a whole document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    #[error("line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: RecordError,
    },

    /// Only raised in strict mode; the default mode skips unknown tags.
    #[error("line {line}: unknown record type '{tag}'")]
    UnknownRecordType { line: usize, tag: String },

    #[error("line {line}: record type '{tag}' after end of document")]
    RecordAfterEnd { line: usize, tag: String },

    /// A document start record arrived after the document was started.
    #[error("line {line}: second document start, a document has exactly one root")]
    DuplicateRoot { line: usize },

    /// A content record arrived with no root element open, either before
    /// the document start or after the root was closed.
    #[error("line {line}: record type '{tag}' outside of the root element")]
    OutsideRoot { line: usize, tag: String },

    #[error("input ended before the document end record (open elements: [{}])", .open.join(", "))]
    UnterminatedDocument { open: Vec<String> },

    #[error("output error: {0}")]
    Output(#[from] HandlerError),
}

impl ConvertError {
    /// The 1-based input line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ConvertError::Record { line, .. }
            | ConvertError::UnknownRecordType { line, .. }
            | ConvertError::RecordAfterEnd { line, .. }
            | ConvertError::DuplicateRoot { line }
            | ConvertError::OutsideRoot { line, .. } => Some(*line),
            ConvertError::UnterminatedDocument { .. } | ConvertError::Output(_) => None,
        }
    }
}
