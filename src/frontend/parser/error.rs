use std::fmt::{self, Display};
use std::slice::Iter;
use thiserror::Error;
use crate::config::Position;

/// Represents the various possible parser error-kinds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("Syntax error")]
    SyntaxError,
    #[error("Invalid numeric label")]
    InvalidNumeral,
    #[error("Duplicate field '{0}'")]
    DuplicateField(String),
    #[error("Duplicate method '{0}'")]
    DuplicateMethod(String),
    #[error("Duplicate definition of type '{0}'")]
    DuplicateDefinition(String),
    #[error("Unexpected input after service declaration")]
    TrailingInput,
}

/// An error reported by the parser (e.g. syntax error).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct ParseError {
    kind: ParseErrorKind,
    position: Position,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, position: Position) -> ParseError {
        Self { kind, position }
    }
    /// Compute 1-based line/column number in string.
    pub fn loc(self: &Self, input: &str) -> (u32, u32) {
        self.position.loc(input)
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ParseErrorKind {
        &self.kind
    }
    /// Byte offset of the offending token.
    pub fn position(self: &Self) -> Position {
        self.position
    }
}

/// All errors collected while parsing one source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseErrors(pub(crate) Vec<ParseError>);

impl ParseErrors {
    pub fn len(self: &Self) -> usize {
        self.0.len()
    }
    pub fn is_empty(self: &Self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(self: &Self) -> Iter<'_, ParseError> {
        self.0.iter()
    }
    /// The first error in source order.
    pub fn first(self: &Self) -> Option<&ParseError> {
        self.0.first()
    }
}

impl Display for ParseErrors {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Malformed interface definition ({} error{})", self.0.len(), if self.0.len() == 1 { "" } else { "s" })?;
        for error in &self.0 {
            write!(f, "\n  {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors { }

impl<'a> IntoIterator for &'a ParseErrors {
    type Item = &'a ParseError;
    type IntoIter = Iter<'a, ParseError>;
    fn into_iter(self: Self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub type ParseResult<T = ()> = Result<T, ParseErrors>;
