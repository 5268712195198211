use thiserror::Error as ThisError;
use crate::frontend::error::{LexError, ParseErrors, ResolveError};

/// An error generated while lexing, parsing or resolving an interface definition.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("{0}")]
    Parse(#[from] ParseErrors),
    #[error("{0}")]
    Resolve(#[from] ResolveError),
}

impl Error {
    /// Compute 1-based line/column number of the (first) error in string, if the error has a source position.
    pub fn loc(self: &Self, input: &str) -> Option<(u32, u32)> {
        match self {
            Self::Lex(e) => Some(e.loc(input)),
            Self::Parse(e) => e.first().map(|e| e.loc(input)),
            Self::Resolve(e) => e.loc(input),
        }
    }
    /// Whether the source itself is malformed, as opposed to referring to an undefined type.
    pub fn is_malformed(self: &Self) -> bool {
        matches!(self, Self::Lex(_) | Self::Parse(_))
    }
}
