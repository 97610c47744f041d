//! Error types.

use std::fmt;

/// Failure of a writer, reader or parser operation.
///
/// Every variant is fatal to the operation that raised it; nothing is
/// retried or silently repaired.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum JsonError {
    #[error("the writer or reader has already been closed")]
    Disposed,

    #[error("expected exactly one finished value, found {items} stack entries")]
    ResultUnavailable { items: usize },

    #[error("no open {expected} to close")]
    MismatchedEnd { expected: &'static str },

    #[error("property `{name}` has no value")]
    DanglingPropertyName { name: Box<str> },

    #[error("object member written without a property name")]
    MissingPropertyName,

    #[error("duplicate property `{name}`")]
    DuplicateProperty { name: Box<str> },

    #[error("{operation} has no expression tree representation")]
    Unsupported { operation: &'static str },

    #[error("cannot convert `{text}` to {target}")]
    DataFormat { text: Box<str>, target: &'static str },

    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Malformed JSON text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the input.
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidToken,
    EmptyInput,
    /// The document is not an object or array.
    ExpectedContainer,
    ExpectedValue,
    /// Input continues after the top-level value.
    TrailingInput,
    /// Object member did not start with a string name.
    ExpectedMember,
    /// Object repeats a property name.
    DuplicateKey,
    ExpectedColon,
    ExpectedCommaOrEnd,
    UnexpectedEnd,
    InvalidEscape,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParseErrorKind::InvalidToken => "invalid token",
            ParseErrorKind::EmptyInput => "empty input",
            ParseErrorKind::ExpectedContainer => "expected an object or array",
            ParseErrorKind::ExpectedValue => "expected a value",
            ParseErrorKind::TrailingInput => "unexpected input after the document",
            ParseErrorKind::ExpectedMember => "expected a property name",
            ParseErrorKind::DuplicateKey => "duplicate property name",
            ParseErrorKind::ExpectedColon => "expected `:`",
            ParseErrorKind::ExpectedCommaOrEnd => "expected `,` or a closing bracket",
            ParseErrorKind::UnexpectedEnd => "unexpected end of input",
            ParseErrorKind::InvalidEscape => "invalid escape sequence",
        })
    }
}
