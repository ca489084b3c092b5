//! # fixedml
//!
//! Converts fixed-width positional records into structured documents.
//!
//! Each input line is one record. Its first three characters are a record
//! type tag, and the rest is a run of fixed-width fields whose widths depend
//! on the type. A small scanner walks each record and emits open / text /
//! close events into a document handler, keeping a stack of open elements so
//! that generic "close" records know what to close.
//!
//! ## Record types
//!
//! | Tag   | Meaning            |
//! |-------|--------------------|
//! | `000` | document start     |
//! | `001` | header             |
//! | `100` | person start       |
//! | `101` | person identity    |
//! | `201` | address            |
//! | `301` | phone              |
//! | `199` | close current      |
//! | `999` | document end       |
//!
//! Unknown tags are skipped unless [`ConvertOptions::strict`] is used.
//!
//! ## Example
//!
//! ```
//! use fixedml::{ConvertOptions, fixed_to_xml};
//!
//! let input = format!(
//!     "000\n100\n101{:>10}{:<30}{:<30}\n199\n999\n",
//!     "42", "John", "Smith"
//! );
//!
//! let (xml, stats) = fixed_to_xml(&input, &ConvertOptions::default()).unwrap();
//!
//! assert!(xml.contains("<firstName>John</firstName>"));
//! assert_eq!(stats.records, 5);
//! ```

pub mod convert;
pub mod error;
pub mod event;
pub mod json;
pub mod layout;
pub mod record;
pub mod router;
pub mod scanner;
pub mod xml;

pub use convert::{fixed_to_events, fixed_to_json, fixed_to_xml};
pub use error::{ConvertError, HandlerError, RecordError};
pub use event::{DocEvent, DocumentHandler, EventCollector, format_events};
pub use json::JsonSink;
pub use layout::{
    ADDRESS_ELEMENT, Align, Field, PERSON_ELEMENT, PHONE_ELEMENT, ROOT_ELEMENT, RecordType, Step,
};
pub use record::{Record, TAG_WIDTH, records};
pub use router::{ConversionStats, ConvertOptions, Converter, apply_steps, convert};
pub use scanner::{ElementStack, RecordScanner};
pub use xml::XmlSink;
