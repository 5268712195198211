//! Unresolved interface types as produced by the parser.

use std::collections::BTreeSet;
use std::fmt::{self, Display};
use crate::config::{FieldIndex, Position};
use crate::shared::repository::Repository;
use crate::shared::typed_ids::DefinitionId;
use crate::frontend::lexer::token::Keyword;

/// Built-in scalar types.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Nat, Nat8, Nat16, Nat32, Nat64,
    Int, Int8, Int16, Int32, Int64,
    Float32, Float64,
    Text,
    Null,
    Reserved,
    Empty,
    Principal,
}

impl Primitive {
    pub fn from_str(name: &str) -> Option<Primitive> {
        Some(match name {
            "bool"      => Primitive::Bool,
            "nat"       => Primitive::Nat,
            "nat8"      => Primitive::Nat8,
            "nat16"     => Primitive::Nat16,
            "nat32"     => Primitive::Nat32,
            "nat64"     => Primitive::Nat64,
            "int"       => Primitive::Int,
            "int8"      => Primitive::Int8,
            "int16"     => Primitive::Int16,
            "int32"     => Primitive::Int32,
            "int64"     => Primitive::Int64,
            "float32"   => Primitive::Float32,
            "float64"   => Primitive::Float64,
            "text"      => Primitive::Text,
            "null"      => Primitive::Null,
            "reserved"  => Primitive::Reserved,
            "empty"     => Primitive::Empty,
            "principal" => Primitive::Principal,
            _           => return None,
        })
    }
    pub fn as_str(self: &Self) -> &'static str {
        match self {
            Primitive::Bool         => "bool",
            Primitive::Nat          => "nat",
            Primitive::Nat8         => "nat8",
            Primitive::Nat16        => "nat16",
            Primitive::Nat32        => "nat32",
            Primitive::Nat64        => "nat64",
            Primitive::Int          => "int",
            Primitive::Int8         => "int8",
            Primitive::Int16        => "int16",
            Primitive::Int32        => "int32",
            Primitive::Int64        => "int64",
            Primitive::Float32      => "float32",
            Primitive::Float64      => "float64",
            Primitive::Text         => "text",
            Primitive::Null         => "null",
            Primitive::Reserved     => "reserved",
            Primitive::Empty        => "empty",
            Primitive::Principal    => "principal",
        }
    }
}

impl Display for Primitive {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Label of a record or variant field.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// Declared by name (identifier or quoted text).
    Named(String),
    /// Declared with an explicit numeric id.
    Id(FieldIndex),
    /// Positional field, numbered by its index among the positional fields of its record/variant.
    Unnamed(FieldIndex),
}

impl Display for Label {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Named(name) => write_name(f, name),
            Label::Id(id) | Label::Unnamed(id) => write!(f, "{}", id),
        }
    }
}

/// Writes a name, quoting it when it is not a plain identifier.
pub(crate) fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let mut chars = name.chars();
    let plain = chars.next().map_or(false, |c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && Keyword::from_str(name).is_none()
        && Primitive::from_str(name).is_none();
    if plain {
        write!(f, "{}", name)
    } else {
        write!(f, "{:?}", name)
    }
}

/// A record or variant field.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub label   : Label,
    /// `None` for a bare label, which denotes `null`.
    pub ty      : Option<TypeExpr>,
    pub doc     : Option<String>,
    pub position: Position,
}

/// A function argument or result.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub name: Option<String>,
    pub ty  : TypeExpr,
}

/// A function signature.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncType {
    pub args        : Vec<Arg>,
    pub rets        : Vec<Arg>,
    pub annotations : BTreeSet<String>,
}

/// Signature of a service method: an inline function type or a reference to one.
#[derive(Clone, Debug, PartialEq)]
pub enum MethodType {
    Func(FuncType),
    Named(NamedTypeRef),
}

/// A service method.
#[derive(Clone, Debug, PartialEq)]
pub struct Method {
    pub name    : String,
    pub ty      : MethodType,
    pub doc     : Option<String>,
    pub position: Position,
}

/// An inline service type.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceType {
    pub methods: Vec<Method>,
}

impl ServiceType {
    /// Finds a method by name.
    pub fn method(self: &Self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Reference to a type by name, resolved against the owning `Program`.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTypeRef {
    pub name    : String,
    pub position: Position,
}

/// An unresolved type expression.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    Primitive(Primitive),
    Vector(Box<TypeExpr>),
    Opt(Box<TypeExpr>),
    Record(Vec<Field>),
    Variant(Vec<Field>),
    Func(FuncType),
    Service(ServiceType),
    Named(NamedTypeRef),
}

impl TypeExpr {
    /// Returns the referenced name if this is a named reference.
    pub fn as_named(self: &Self) -> Option<&NamedTypeRef> {
        match self {
            TypeExpr::Named(named) => Some(named),
            _ => None,
        }
    }
}

/// A `type Name = ...;` definition.
#[derive(Clone, Debug, PartialEq)]
pub struct Definition {
    pub name    : String,
    pub ty      : TypeExpr,
    pub doc     : Option<String>,
    pub position: Position,
}

/// An `import "path";` statement. Imports are recorded but not loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Import {
    pub path    : String,
    pub doc     : Option<String>,
    pub position: Position,
}

/// Body of the service declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum ActorBody {
    Service(ServiceType),
    Named(NamedTypeRef),
}

/// The `service [Name] : [(args) ->] body` declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ActorDecl {
    pub name    : Option<String>,
    pub init    : Option<Vec<Arg>>,
    pub body    : ActorBody,
    pub doc     : Option<String>,
    pub position: Position,
}

/// A parsed interface source: imports, type definitions and the optional service declaration.
#[derive(Clone, Debug)]
pub struct Program {
    pub(crate) imports      : Vec<Import>,
    pub(crate) definitions  : Repository<Definition, DefinitionId>,
    pub(crate) actor        : Option<ActorDecl>,
}

impl Program {
    pub(crate) fn new() -> Self {
        Program {
            imports     : Vec::new(),
            definitions : Repository::new(),
            actor       : None,
        }
    }
    /// Imported paths in source order.
    pub fn imports(self: &Self) -> &[Import] {
        &self.imports
    }
    /// Type definitions in declaration order.
    pub fn definitions(self: &Self) -> impl Iterator<Item = &Definition> {
        self.definitions.values()
    }
    /// Finds a type definition by name.
    pub fn definition(self: &Self, name: &str) -> Option<&Definition> {
        self.definitions.name(name)
    }
    /// The service declaration, if any.
    pub fn actor(self: &Self) -> Option<&ActorDecl> {
        self.actor.as_ref()
    }
}

// Printing back to interface syntax

fn write_args(f: &mut fmt::Formatter<'_>, args: &[Arg]) -> fmt::Result {
    write!(f, "(")?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        if let Some(name) = &arg.name {
            write_name(f, name)?;
            write!(f, ": ")?;
        }
        write!(f, "{}", arg.ty)?;
    }
    write!(f, ")")
}

fn write_fields(f: &mut fmt::Formatter<'_>, keyword: Keyword, fields: &[Field]) -> fmt::Result {
    write!(f, "{} {{", keyword.as_str())?;
    for field in fields {
        match (&field.label, &field.ty) {
            (Label::Unnamed(_), Some(ty)) => write!(f, " {};", ty)?,
            (label, Some(ty)) => write!(f, " {}: {};", label, ty)?,
            (label, None) => write!(f, " {};", label)?,
        }
    }
    write!(f, " }}")
}

impl Display for FuncType {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_args(f, &self.args)?;
        write!(f, " -> ")?;
        write_args(f, &self.rets)?;
        for annotation in &self.annotations {
            write!(f, " {}", annotation)?;
        }
        Ok(())
    }
}

impl Display for ServiceType {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for method in &self.methods {
            write!(f, " ")?;
            write_name(f, &method.name)?;
            match &method.ty {
                MethodType::Func(func) => write!(f, ": {};", func)?,
                MethodType::Named(named) => write!(f, ": {};", named.name)?,
            }
        }
        write!(f, " }}")
    }
}

impl Display for TypeExpr {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Primitive(p) => write!(f, "{}", p),
            TypeExpr::Vector(inner) => write!(f, "vec {}", inner),
            TypeExpr::Opt(inner) => write!(f, "opt {}", inner),
            TypeExpr::Record(fields) => write_fields(f, Keyword::Record, fields),
            TypeExpr::Variant(fields) => write_fields(f, Keyword::Variant, fields),
            TypeExpr::Func(func) => write!(f, "func {}", func),
            TypeExpr::Service(service) => write!(f, "service {}", service),
            TypeExpr::Named(named) => write!(f, "{}", named.name),
        }
    }
}

impl Display for Program {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for import in &self.imports {
            writeln!(f, "import {:?};", import.path)?;
        }
        for definition in self.definitions() {
            writeln!(f, "type {} = {};", definition.name, definition.ty)?;
        }
        if let Some(actor) = &self.actor {
            write!(f, "service ")?;
            if let Some(name) = &actor.name {
                write_name(f, name)?;
                write!(f, " ")?;
            }
            write!(f, ": ")?;
            if let Some(init) = &actor.init {
                write_args(f, init)?;
                write!(f, " -> ")?;
            }
            match &actor.body {
                ActorBody::Service(service) => writeln!(f, "{};", service)?,
                ActorBody::Named(named) => writeln!(f, "{};", named.name)?,
            }
        }
        Ok(())
    }
}
