//! Tidl, a lexer, parser and type resolver for a small service interface definition language.
//!
//! Source text is split into tokens by [`lex`], turned into a [`Program`] by [`parse`] and resolved on demand into
//! concrete types stored in a [`TypeTable`]:
//!
//! ```
//! use tidl::{parse, TypeTable};
//!
//! let program = parse("service : { greet: (text) -> (text) query }").unwrap();
//! let mut table = TypeTable::new();
//! let service = program.actor_type(&mut table).unwrap().unwrap();
//! let methods = table.methods(service).unwrap();
//! assert_eq!(methods[0].0, "greet");
//! assert!(methods[0].1.is_query());
//! ```

pub mod config;
pub mod frontend;
pub(crate) mod shared;

pub use crate::config::{Position, ParseOptions, Duplicates};
pub use crate::frontend::{lex, parse, parse_with, parse_tokens, resolved};
pub use crate::frontend::ast::{Program, TypeExpr};
pub use crate::frontend::resolved::{Type, TypeTable};
pub use crate::frontend::visit::Visitor;
pub use crate::frontend::error::*;
pub use crate::shared::{error::Error, typed_ids::TypeId};

/// One stop shop to parse given interface source and resolve the type defined under `name`.
pub fn resolve_source(src: &str, name: &str) -> Result<(Program, TypeTable, TypeId), Error> {
    let program = parse(src)?;
    let mut table = TypeTable::new();
    let type_id = program.resolve_name(name, &mut table)?;
    Ok((program, table, type_id))
}
