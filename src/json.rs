//! JSON output: builds a `serde_json::Value` from document events.
//!
//! Mapping:
//! - an element holding only text becomes a string
//! - an element with child elements becomes an object
//! - repeated sibling names collapse into an array, in document order

use serde_json::map::Entry;
use serde_json::{Map, Value};

use crate::error::HandlerError;
use crate::event::DocumentHandler;

struct Frame {
    name: String,
    members: Map<String, Value>,
    text: String,
    has_children: bool,
}

impl Frame {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Map::new(),
            text: String::new(),
            has_children: false,
        }
    }

    fn into_value(self) -> Value {
        if self.has_children {
            Value::Object(self.members)
        } else {
            Value::String(self.text)
        }
    }
}

/// Document handler that assembles a JSON value.
#[derive(Default)]
pub struct JsonSink {
    frames: Vec<Frame>,
    root: Map<String, Value>,
}

impl JsonSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assembled value: an object keyed by the root element name.
    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

fn insert_member(members: &mut Map<String, Value>, name: String, value: Value) {
    match members.entry(name) {
        Entry::Vacant(entry) => {
            entry.insert(value);
        }
        Entry::Occupied(mut entry) => match entry.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }
}

impl DocumentHandler for JsonSink {
    fn start_document(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    fn end_document(&mut self) -> Result<(), HandlerError> {
        Ok(())
    }

    fn start_element(&mut self, name: &str) -> Result<(), HandlerError> {
        if let Some(parent) = self.frames.last_mut() {
            parent.has_children = true;
        }
        self.frames.push(Frame::new(name));
        Ok(())
    }

    fn end_element(&mut self, name: &str) -> Result<(), HandlerError> {
        let frame = self
            .frames
            .pop()
            .ok_or_else(|| HandlerError::new(format!("close of '{name}' with nothing open")))?;
        if frame.name != name {
            return Err(HandlerError::new(format!(
                "close of '{name}' while '{}' is open",
                frame.name
            )));
        }

        let name = frame.name.clone();
        let value = frame.into_value();
        let target = match self.frames.last_mut() {
            Some(parent) => &mut parent.members,
            None => &mut self.root,
        };
        insert_member(target, name, value);
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), HandlerError> {
        let frame = self
            .frames
            .last_mut()
            .ok_or_else(|| HandlerError::new("text outside of any element"))?;
        frame.text.push_str(text);
        Ok(())
    }
}
