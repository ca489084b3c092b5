//! XML text output via `quick-xml`.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::HandlerError;
use crate::event::DocumentHandler;

/// Document handler that serializes events as XML text.
pub struct XmlSink {
    writer: Writer<Vec<u8>>,
}

impl XmlSink {
    /// Indented output, two spaces per level.
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    /// Everything on one line.
    pub fn compact() -> Self {
        Self {
            writer: Writer::new(Vec::new()),
        }
    }

    pub fn into_string(self) -> Result<String, HandlerError> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| HandlerError::new(e.to_string()))
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), HandlerError> {
        self.writer
            .write_event(event)
            .map_err(|e| HandlerError::new(format!("cannot write XML: {e}")))
    }
}

impl Default for XmlSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentHandler for XmlSink {
    fn start_document(&mut self) -> Result<(), HandlerError> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn end_document(&mut self) -> Result<(), HandlerError> {
        self.writer.get_mut().push(b'\n');
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), HandlerError> {
        self.write(Event::Start(BytesStart::new(name)))
    }

    fn end_element(&mut self, name: &str) -> Result<(), HandlerError> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn characters(&mut self, text: &str) -> Result<(), HandlerError> {
        self.write(Event::Text(BytesText::new(text)))
    }
}
