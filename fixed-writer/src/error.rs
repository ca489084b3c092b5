use thiserror::Error;

/// Errors raised while writing a document back to fixed-width records.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("unexpected root element '{found}', expected '{expected}'")]
    UnexpectedRoot {
        found: String,
        expected: &'static str,
    },

    #[error("{field}: value '{value}' does not fit in {width} characters")]
    FieldOverflow {
        field: &'static str,
        width: usize,
        value: String,
    },

    #[error("{field}: value contains a line break")]
    LineBreak { field: &'static str },
}
