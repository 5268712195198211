//! Code shared by the lexer, parser and resolver.

pub mod error;
pub(crate) mod repository;
pub mod typed_ids;
