use thiserror::Error;
use crate::config::Position;

/// Represents the various possible resolver error-kinds.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveErrorKind {
    #[error("Interface refers to an unknown type '{0}'")]
    UnknownType(String),
    #[error("Type '{0}' is used as a service but is not one")]
    NotAService(String),
    #[error("Type '{0}' is used as a function but is not one")]
    NotAFunction(String),
    #[error("Type '{0}' is defined only in terms of itself")]
    UnguardedRecursion(String),
}

/// An error reported by the resolver (e.g. reference to an undefined type).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct ResolveError {
    kind: ResolveErrorKind,
    position: Option<Position>,
}

impl ResolveError {
    pub(crate) fn new(kind: ResolveErrorKind, position: Option<Position>) -> ResolveError {
        Self { kind, position }
    }
    /// Compute 1-based line/column number in string. `None` for errors not caused by a reference in the source,
    /// e.g. resolving a root name that is not defined.
    pub fn loc(self: &Self, input: &str) -> Option<(u32, u32)> {
        self.position.map(|position| position.loc(input))
    }
    /// The kind of the error.
    pub fn kind(self: &Self) -> &ResolveErrorKind {
        &self.kind
    }
    /// Position of the reference that failed to resolve.
    pub fn position(self: &Self) -> Option<Position> {
        self.position
    }
    /// The type name the error refers to.
    pub fn name(self: &Self) -> &str {
        match &self.kind {
            ResolveErrorKind::UnknownType(name) => name,
            ResolveErrorKind::NotAService(name) => name,
            ResolveErrorKind::NotAFunction(name) => name,
            ResolveErrorKind::UnguardedRecursion(name) => name,
        }
    }
}

pub type ResolveResult<T = ()> = Result<T, ResolveError>;
