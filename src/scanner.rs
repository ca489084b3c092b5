//! Record scanner: one fixed-width line in, structured events out.
//!
//! The scanner reads forward through a record from a cursor that starts just
//! past the type tag. Each operation returns the scanner again so a record
//! layout can be written as one chain:
//!
//! ```
//! use fixedml::{ElementStack, EventCollector, Record, RecordScanner};
//!
//! let line = format!("301{:<20}{:<6}", "555-0100", "HOME");
//! let record = Record::new(&line, 1);
//! let mut stack = ElementStack::new();
//! let mut events = EventCollector::new();
//! let mut scanner = RecordScanner::new(record, &mut stack, &mut events);
//!
//! assert_eq!(scanner.record_type().unwrap(), "301");
//! scanner
//!     .start("phone").unwrap()
//!     .start("phoneNumber").unwrap().trimmed_text(20).unwrap().end().unwrap()
//!     .end().unwrap();
//! assert!(stack.is_empty());
//! ```

use crate::error::RecordError;
use crate::event::DocumentHandler;
use crate::record::{Record, TAG_WIDTH};

/// Names of the currently open elements, innermost last.
///
/// Shared by every record of one document so that generic close records
/// know what to close.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementStack {
    names: Vec<String>,
}

impl ElementStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    pub fn pop(&mut self) -> Option<String> {
        self.names.pop()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Open element names, outermost first.
    pub fn open(&self) -> &[String] {
        &self.names
    }
}

/// Scanner over one record, emitting into a caller-supplied handler.
pub struct RecordScanner<'a, H: DocumentHandler> {
    record: Record<'a>,
    cursor: usize,
    stack: &'a mut ElementStack,
    handler: &'a mut H,
}

impl<'a, H: DocumentHandler> RecordScanner<'a, H> {
    pub fn new(record: Record<'a>, stack: &'a mut ElementStack, handler: &'a mut H) -> Self {
        Self {
            record,
            cursor: TAG_WIDTH,
            stack,
            handler,
        }
    }

    /// Current character position within the record.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The 3-character type tag. Does not move the cursor.
    pub fn record_type(&self) -> Result<&'a str, RecordError> {
        self.record.tag().ok_or(RecordError::MalformedTag {
            len: self.record.char_len(),
        })
    }

    /// Emit the next `width` characters as text, untouched.
    pub fn text(&mut self, width: usize) -> Result<&mut Self, RecordError> {
        self.field(width, false)
    }

    /// Emit the next `width` characters as text with padding stripped.
    pub fn trimmed_text(&mut self, width: usize) -> Result<&mut Self, RecordError> {
        self.field(width, true)
    }

    fn field(&mut self, width: usize, trim: bool) -> Result<&mut Self, RecordError> {
        let value =
            self.record
                .field(self.cursor, width)
                .ok_or_else(|| RecordError::TruncatedRecord {
                    pos: self.cursor,
                    width,
                    len: self.record.char_len(),
                })?;
        let value = if trim { value.trim() } else { value };

        self.handler.characters(value)?;
        self.cursor += width;
        Ok(self)
    }

    /// Open an element and push it on the stack.
    pub fn start(&mut self, name: &str) -> Result<&mut Self, RecordError> {
        self.stack.push(name);
        self.handler.start_element(name)?;
        Ok(self)
    }

    /// Begin the document, then open its root element.
    pub fn start_root(&mut self, name: &str) -> Result<&mut Self, RecordError> {
        self.handler.start_document()?;
        self.start(name)
    }

    /// Close whatever element is innermost.
    pub fn end(&mut self) -> Result<&mut Self, RecordError> {
        let name = self.stack.pop().ok_or(RecordError::UnbalancedClose)?;
        self.handler.end_element(&name)?;
        Ok(self)
    }

    /// Close the root element, then end the document.
    ///
    /// Exactly one element (the root) must be open.
    pub fn end_root(&mut self) -> Result<&mut Self, RecordError> {
        if self.stack.len() > 1 {
            return Err(RecordError::UnclosedElements {
                open: self.stack.open().to_vec(),
            });
        }
        self.end()?;
        self.handler.end_document()?;
        Ok(self)
    }
}
