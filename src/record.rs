//! Fixed-width record view.
//!
//! A record is one line of input. Its first [`TAG_WIDTH`] characters are the
//! record type tag; the rest is a run of fixed-width fields whose widths are
//! known only from the record type. Positions are counted in characters so a
//! multi-byte name never splits a field.

use std::iter;

/// Width of the record type tag at the start of every line.
pub const TAG_WIDTH: usize = 3;

/// An immutable view of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    line: &'a str,
    number: usize,
}

impl<'a> Record<'a> {
    /// Create a record from a line and its 1-based line number.
    pub fn new(line: &'a str, number: usize) -> Self {
        Self { line, number }
    }

    /// The raw line content.
    pub fn as_str(&self) -> &'a str {
        self.line
    }

    /// 1-based line number in the input.
    pub fn number(&self) -> usize {
        self.number
    }

    /// Length of the line in characters.
    pub fn char_len(&self) -> usize {
        self.line.chars().count()
    }

    /// The 3-character type tag, or `None` if the line is too short.
    pub fn tag(&self) -> Option<&'a str> {
        self.field(0, TAG_WIDTH)
    }

    /// Exactly `width` characters starting at character `pos`.
    ///
    /// Returns `None` if the line ends before `pos + width`.
    pub fn field(&self, pos: usize, width: usize) -> Option<&'a str> {
        let start = self.byte_offset(pos)?;
        let end = self.byte_offset(pos + width)?;
        Some(&self.line[start..end])
    }

    /// Byte offset of character position `pos`; the line length is a valid
    /// offset (one past the last character).
    fn byte_offset(&self, pos: usize) -> Option<usize> {
        self.line
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(self.line.len()))
            .nth(pos)
    }
}

/// Split input text into records.
///
/// Lines are separated by `\n` or `\r\n`. Trailing empty lines are dropped so
/// a final newline does not produce an empty record; empty lines in the
/// middle of the input are kept and will fail as malformed.
pub fn records(text: &str) -> Vec<Record<'_>> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| Record::new(line, i + 1))
        .collect()
}
