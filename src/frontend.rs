//! Interface frontend: lexer, parser and type resolver.

pub mod ast;

pub mod lexer;
pub use crate::frontend::lexer::lex;

mod parser;
pub use crate::frontend::parser::{parse, parse_with, parse_tokens};

mod resolver;

pub mod visit;

pub mod resolved {
    //! Concrete types produced by the resolver.
    pub use super::resolver::resolved::{Type, TypeTable, TypeDisplay, Field, Arg, Func, Method, Service, Recursive};
}

pub mod error {
    //! Errors reported by the lexer, parser and resolver.
    pub use super::lexer::error::{LexError, LexErrorKind, LexResult};
    pub use super::parser::error::{ParseError, ParseErrors, ParseErrorKind, ParseResult};
    pub use super::resolver::error::{ResolveError, ResolveErrorKind, ResolveResult};
}
