use thiserror::Error;
use crate::config::Position;

/// Represents the various possible lexer error-kinds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Unterminated block comment")]
    UnterminatedComment,
    #[error("Invalid escape sequence in string literal")]
    InvalidEscape,
}

/// An error reported by the lexer (e.g. a character that does not start any token).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    kind: LexErrorKind,
    position: Position,
}

impl LexError {
    pub(crate) fn new(kind: LexErrorKind, position: Position) -> LexError {
        Self { kind, position }
    }
    /// Compute 1-based line/column number in string.
    pub fn loc(self: &Self, input: &str) -> (u32, u32) {
        self.position.loc(input)
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &LexErrorKind {
        &self.kind
    }
    /// Byte offset of the first character that could not be lexed.
    pub fn position(self: &Self) -> Position {
        self.position
    }
}

pub type LexResult<T = ()> = Result<T, LexError>;
