//! Structured document events and the handler seam.
//!
//! The scanner never builds a tree itself. It pushes events into a
//! [`DocumentHandler`] supplied by the caller, which owns whatever it builds
//! (XML text, a JSON value, or just the event list).

use crate::error::HandlerError;

/// One structured document event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocEvent {
    StartDocument,
    StartElement(String),
    Text(String),
    EndElement(String),
    EndDocument,
}

/// Receiver of document events, in the manner of a streaming tree builder.
pub trait DocumentHandler {
    fn start_document(&mut self) -> Result<(), HandlerError>;

    fn end_document(&mut self) -> Result<(), HandlerError>;

    /// Open an element with no attributes.
    fn start_element(&mut self, name: &str) -> Result<(), HandlerError>;

    fn end_element(&mut self, name: &str) -> Result<(), HandlerError>;

    /// Text content of the currently open element.
    fn characters(&mut self, text: &str) -> Result<(), HandlerError>;
}

/// Handler that keeps every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCollector {
    events: Vec<DocEvent>,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DocEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DocEvent> {
        self.events
    }
}

impl DocumentHandler for EventCollector {
    fn start_document(&mut self) -> Result<(), HandlerError> {
        self.events.push(DocEvent::StartDocument);
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), HandlerError> {
        self.events.push(DocEvent::EndDocument);
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), HandlerError> {
        self.events.push(DocEvent::StartElement(name.to_string()));
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), HandlerError> {
        self.events.push(DocEvent::EndElement(name.to_string()));
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), HandlerError> {
        self.events.push(DocEvent::Text(text.to_string()));
        Ok(())
    }
}

/// Render events one per line, e.g. `START person` / `TEXT "42"`.
pub fn format_events(events: &[DocEvent]) -> String {
    events
        .iter()
        .map(|event| match event {
            DocEvent::StartDocument => "START-DOCUMENT".to_string(),
            DocEvent::StartElement(name) => format!("START {name}"),
            DocEvent::Text(text) => format!("TEXT {text:?}"),
            DocEvent::EndElement(name) => format!("END {name}"),
            DocEvent::EndDocument => "END-DOCUMENT".to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
