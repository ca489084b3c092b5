//! Record router: dispatches each record to its layout.
//!
//! A [`Converter`] owns everything one document conversion mutates (the
//! element stack and the handler) and feeds records through in line order.
//! Each record's tag selects a [`RecordType`] whose steps are interpreted
//! against a fresh [`RecordScanner`].

use log::debug;

use crate::error::{ConvertError, RecordError};
use crate::event::DocumentHandler;
use crate::layout::{Field, RecordType, Step};
use crate::record::Record;
use crate::scanner::{ElementStack, RecordScanner};

/// Conversion settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Reject unknown record type tags instead of skipping them.
    pub strict: bool,
    /// Render XML and JSON output on a single line.
    pub compact: bool,
}

impl ConvertOptions {
    pub fn strict() -> Self {
        Self {
            strict: true,
            ..Self::default()
        }
    }
}

/// Counters for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Input lines read.
    pub lines: usize,
    /// Lines with a recognized record type.
    pub records: usize,
    /// Lines skipped for an unknown record type.
    pub skipped: usize,
    /// Elements opened.
    pub elements: usize,
}

/// Run one record layout against a scanner.
pub fn apply_steps<H: DocumentHandler>(
    scanner: &mut RecordScanner<'_, H>,
    steps: &[Step],
) -> Result<usize, RecordError> {
    let mut opened = 0;
    for step in steps {
        match *step {
            Step::StartRoot(name) => {
                scanner.start_root(name)?;
                opened += 1;
            }
            Step::Start(name) => {
                scanner.start(name)?;
                opened += 1;
            }
            Step::Field(field) => {
                read_field(scanner, field)?;
                opened += 1;
            }
            Step::End => {
                scanner.end()?;
            }
            Step::EndRoot => {
                scanner.end_root()?;
            }
        }
    }
    Ok(opened)
}

fn read_field<H: DocumentHandler>(
    scanner: &mut RecordScanner<'_, H>,
    field: Field,
) -> Result<(), RecordError> {
    let scanner = scanner.start(field.name)?;
    let scanner = if field.trim {
        scanner.trimmed_text(field.width)?
    } else {
        scanner.text(field.width)?
    };
    scanner.end()?;
    Ok(())
}

/// One document conversion in progress.
pub struct Converter<H: DocumentHandler> {
    handler: H,
    stack: ElementStack,
    options: ConvertOptions,
    stats: ConversionStats,
    started: bool,
    ended: bool,
}

impl<H: DocumentHandler> Converter<H> {
    pub fn new(handler: H, options: ConvertOptions) -> Self {
        Self {
            handler,
            stack: ElementStack::new(),
            options,
            stats: ConversionStats::default(),
            started: false,
            ended: false,
        }
    }

    /// Elements currently open, outermost first.
    pub fn open_elements(&self) -> &[String] {
        self.stack.open()
    }

    pub fn stats(&self) -> ConversionStats {
        self.stats
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Route one record. Records must be fed in line order.
    ///
    /// The document has a single root: a document start record may appear
    /// once, and content records are only accepted while the root is open.
    /// Close records on an empty stack fail as an unbalanced close.
    pub fn feed(&mut self, record: Record<'_>) -> Result<(), ConvertError> {
        let line = record.number();
        let depth = self.stack.len();
        self.stats.lines += 1;

        let mut scanner = RecordScanner::new(record, &mut self.stack, &mut self.handler);
        let tag = scanner
            .record_type()
            .map_err(|source| ConvertError::Record { line, source })?;

        let Some(record_type) = RecordType::from_tag(tag) else {
            if self.options.strict {
                return Err(ConvertError::UnknownRecordType {
                    line,
                    tag: tag.to_string(),
                });
            }
            debug!("line {line}: skipping unknown record type '{tag}'");
            self.stats.skipped += 1;
            return Ok(());
        };

        if self.ended {
            return Err(ConvertError::RecordAfterEnd {
                line,
                tag: tag.to_string(),
            });
        }

        match record_type {
            RecordType::DocumentStart if self.started || depth > 0 => {
                return Err(ConvertError::DuplicateRoot { line });
            }
            RecordType::DocumentStart | RecordType::Close | RecordType::DocumentEnd => {}
            _ if depth == 0 => {
                return Err(ConvertError::OutsideRoot {
                    line,
                    tag: tag.to_string(),
                });
            }
            _ => {}
        }

        debug!("line {line}: {record_type:?} ({tag})");
        let opened = apply_steps(&mut scanner, record_type.steps())
            .map_err(|source| ConvertError::Record { line, source })?;

        self.stats.records += 1;
        self.stats.elements += opened;
        match record_type {
            RecordType::DocumentStart => self.started = true,
            RecordType::DocumentEnd => self.ended = true,
            _ => {}
        }
        Ok(())
    }

    /// Finish the document and hand back the handler.
    ///
    /// Fails if a started document has not reached its end record.
    pub fn finish(self) -> Result<(H, ConversionStats), ConvertError> {
        if !self.stack.is_empty() || (self.started && !self.ended) {
            return Err(ConvertError::UnterminatedDocument {
                open: self.stack.open().to_vec(),
            });
        }
        Ok((self.handler, self.stats))
    }
}

/// Convert fixed-width text into events delivered to `handler`.
pub fn convert<H: DocumentHandler>(
    text: &str,
    handler: H,
    options: &ConvertOptions,
) -> Result<(H, ConversionStats), ConvertError> {
    let mut converter = Converter::new(handler, *options);
    for record in crate::record::records(text) {
        converter.feed(record)?;
    }
    converter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{DocEvent, EventCollector};
    use std::fs;
    use std::path::Path;

    fn start(name: &str) -> DocEvent {
        DocEvent::StartElement(name.to_string())
    }

    fn text(value: &str) -> DocEvent {
        DocEvent::Text(value.to_string())
    }

    fn end(name: &str) -> DocEvent {
        DocEvent::EndElement(name.to_string())
    }

    fn identity_line(id: &str, first: &str, last: &str) -> String {
        format!("101{id:>10}{first:<30}{last:<30}")
    }

    fn run(text: &str) -> Result<Vec<DocEvent>, ConvertError> {
        convert(text, EventCollector::new(), &ConvertOptions::default())
            .map(|(events, _)| events.into_events())
    }

    fn load_spec(name: &str) -> String {
        let spec_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("specs");
        fs::read_to_string(spec_dir.join(name)).unwrap()
    }

    #[test]
    fn test_person_identity_events() {
        let mut converter = Converter::new(EventCollector::new(), ConvertOptions::default());
        let line = identity_line("42", "John", "Smith");
        converter.feed(Record::new("000", 1)).unwrap();
        converter.feed(Record::new("100", 2)).unwrap();
        converter.feed(Record::new(&line, 3)).unwrap();
        assert_eq!(
            &converter.handler().events()[3..],
            &[
                start("personId"),
                text("42"),
                end("personId"),
                start("firstName"),
                text("John"),
                end("firstName"),
                start("lastName"),
                text("Smith"),
                end("lastName"),
            ]
        );
        assert_eq!(converter.stats().records, 3);
        assert_eq!(converter.stats().elements, 5);
    }

    #[test]
    fn test_header_keeps_untrimmed_date() {
        let events = run("000\n001         3 2016-3-1 \n999\n").unwrap();
        assert_eq!(events[3], text("3"));
        assert_eq!(events[6], text(" 2016-3-1 "));
    }

    #[test]
    fn test_minimal_document_single_person() {
        let input = format!(
            "000\n001         12016-03-14\n100\n{}\n199\n999\n",
            identity_line("42", "John", "Smith")
        );
        let events = run(&input).unwrap();

        assert_eq!(events.first(), Some(&DocEvent::StartDocument));
        assert_eq!(events.last(), Some(&DocEvent::EndDocument));
        assert_eq!(events[1], start("people"));
        assert_eq!(events[events.len() - 2], end("people"));

        // Children of the root sit at depth 1.
        let mut depth = 0usize;
        let mut root_children = Vec::new();
        for event in &events {
            match event {
                DocEvent::StartElement(name) => {
                    if depth == 1 {
                        root_children.push(name.as_str());
                    }
                    depth += 1;
                }
                DocEvent::EndElement(_) => depth -= 1,
                _ => {}
            }
        }
        assert_eq!(depth, 0);
        assert_eq!(root_children, vec!["personCount", "creationDate", "person"]);
    }

    #[test]
    fn test_close_without_open() {
        let err = run("199\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::Record {
                line: 1,
                source: RecordError::UnbalancedClose
            }
        );
    }

    #[test]
    fn test_rootless_records_rejected() {
        let err = run("100\n199\n100\n199\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::OutsideRoot {
                line: 1,
                tag: "100".to_string()
            }
        );
    }

    #[test]
    fn test_header_without_root_rejected() {
        let err = run("001         22016-03-14\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::OutsideRoot {
                line: 1,
                tag: "001".to_string()
            }
        );
    }

    #[test]
    fn test_second_document_start_rejected() {
        let err = run("000\n000\n199\n999\n").unwrap_err();
        assert_eq!(err, ConvertError::DuplicateRoot { line: 2 });
    }

    #[test]
    fn test_document_start_after_root_closed() {
        let err = run("000\n199\n000\n999\n").unwrap_err();
        assert_eq!(err, ConvertError::DuplicateRoot { line: 3 });
    }

    #[test]
    fn test_content_after_root_closed() {
        let input = format!("000\n199\n{}\n", identity_line("1", "A", "B"));
        let err = run(&input).unwrap_err();
        assert_eq!(
            err,
            ConvertError::OutsideRoot {
                line: 3,
                tag: "101".to_string()
            }
        );
    }

    #[test]
    fn test_document_end_without_start() {
        let err = run("999\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::Record {
                line: 1,
                source: RecordError::UnbalancedClose
            }
        );
    }

    #[test]
    fn test_root_closed_without_document_end() {
        let err = run("000\n199\n").unwrap_err();
        assert_eq!(err, ConvertError::UnterminatedDocument { open: vec![] });
    }

    #[test]
    fn test_unknown_tags_outside_root_skipped() {
        let events = run("200\n000\n999\n299\n").unwrap();
        assert_eq!(events.len(), 4);
    }

    #[test]
    fn test_close_after_root_closed() {
        let err = run("000\n999\n199\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::RecordAfterEnd {
                line: 3,
                tag: "199".to_string()
            }
        );
    }

    #[test]
    fn test_truncated_phone() {
        let err = run(&load_spec("truncated-phone.fixed")).unwrap_err();
        assert_eq!(
            err,
            ConvertError::Record {
                line: 5,
                source: RecordError::TruncatedRecord {
                    pos: 23,
                    width: 6,
                    len: 26
                }
            }
        );
    }

    #[test]
    fn test_short_line_is_malformed() {
        let err = run("000\n\n999\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::Record {
                line: 2,
                source: RecordError::MalformedTag { len: 0 }
            }
        );
    }

    #[test]
    fn test_unknown_tags_skipped() {
        let plain = convert(
            &load_spec("people.fixed"),
            EventCollector::new(),
            &ConvertOptions::default(),
        )
        .unwrap();
        let tagged = convert(
            &load_spec("people-unknown-tags.fixed"),
            EventCollector::new(),
            &ConvertOptions::default(),
        )
        .unwrap();
        assert_eq!(plain.0, tagged.0);
        assert_eq!(tagged.1.skipped, 2);
        assert_eq!(tagged.1.lines, plain.1.lines + 2);
    }

    #[test]
    fn test_strict_rejects_unknown_tag() {
        let err = convert(
            &load_spec("people-unknown-tags.fixed"),
            EventCollector::new(),
            &ConvertOptions::strict(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnknownRecordType {
                line: 3,
                tag: "200".to_string()
            }
        );
    }

    #[test]
    fn test_missing_document_end() {
        let err = run("000\n100\n").unwrap_err();
        assert_eq!(
            err,
            ConvertError::UnterminatedDocument {
                open: vec!["people".to_string(), "person".to_string()]
            }
        );
    }

    #[test]
    fn test_document_end_with_open_person() {
        let err = run("000\n100\n999\n").unwrap_err();
        assert_eq!(err.line(), Some(3));
        assert!(matches!(
            err,
            ConvertError::Record {
                source: RecordError::UnclosedElements { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_stack_balanced_throughout() {
        let input = load_spec("people.fixed");
        let mut converter = Converter::new(EventCollector::new(), ConvertOptions::default());
        assert!(converter.open_elements().is_empty());
        let records = crate::record::records(&input);
        let last = records.len() - 1;
        for (i, record) in records.into_iter().enumerate() {
            converter.feed(record).unwrap();
            if i < last {
                assert!(!converter.open_elements().is_empty());
            }
        }
        assert!(converter.open_elements().is_empty());
        let (_, stats) = converter.finish().unwrap();
        assert_eq!(stats.lines, 13);
        assert_eq!(stats.records, 13);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_deterministic() {
        let input = load_spec("people.fixed");
        let first = run(&input).unwrap();
        let second = run(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(run("").unwrap().is_empty());
    }
}
