//! Structured document to fixed-width writer.
//!
//! This crate provides the reverse direction for fixedml: a people XML
//! document is rendered back into fixed-width records using the same record
//! layouts the record router reads with, so the two directions cannot drift
//! apart.

pub mod error;
pub mod writer;

pub use error::WriteError;
pub use writer::{format_field, format_record, write_fixed};
