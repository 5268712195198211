pub use tidl::*;
pub use tidl::frontend::ast::{self, Label};
pub use tidl::frontend::lexer::token::{Keyword, Punct, TokenKind};
pub use tidl::resolved::{Field, Func, Recursive, Service};

/// Parse given source, panicking on errors.
#[allow(dead_code)]
pub fn program(src: &str) -> Program {
    match parse(src) {
        Ok(program) => program,
        Err(error) => panic!("Failed to parse <{}>: {}", src, error),
    }
}

/// Parse given source and return the collected parse errors, panicking if there are none.
#[allow(dead_code)]
pub fn parse_errors(src: &str) -> Vec<ParseError> {
    match parse(src) {
        Err(Error::Parse(errors)) => errors.iter().cloned().collect(),
        Err(error) => panic!("Expected parse errors, got <{}>", error),
        Ok(_) => panic!("Expected parse errors, got a program"),
    }
}

/// Parse given source and resolve the named definition.
#[allow(dead_code)]
pub fn resolve(src: &str, name: &str) -> (Program, TypeTable, TypeId) {
    match resolve_source(src, name) {
        Ok(result) => result,
        Err(error) => panic!("Failed to resolve '{}': {}", name, error),
    }
}

/// Labels of a resolved record or variant, as displayed.
#[allow(dead_code)]
pub fn labels(table: &TypeTable, type_id: TypeId) -> Vec<String> {
    match table.get(type_id) {
        Type::Record(fields) | Type::Variant(fields) => fields.iter().map(|f| f.label.to_string()).collect(),
        other => panic!("Expected record or variant, got {:?}", other),
    }
}

/// Fields of a resolved record or variant.
#[allow(dead_code)]
pub fn fields(table: &TypeTable, type_id: TypeId) -> &[Field] {
    match table.get(type_id) {
        Type::Record(fields) | Type::Variant(fields) => fields,
        other => panic!("Expected record or variant, got {:?}", other),
    }
}
