use std::collections::{BTreeSet, HashMap};
use std::fmt::{self, Display};
use crate::frontend::ast::{Label, Primitive, write_name};
use crate::frontend::lexer::token::Keyword;
use super::error::{ResolveError, ResolveErrorKind, ResolveResult};
use crate::shared::typed_ids::TypeId;

/// A resolved record/variant field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub label   : Label,
    pub type_id : TypeId,
    pub doc     : Option<String>,
}

/// A resolved function argument or result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arg {
    pub name    : Option<String>,
    pub type_id : TypeId,
}

/// A resolved function signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Func {
    pub args        : Vec<Arg>,
    pub rets        : Vec<Arg>,
    pub annotations : BTreeSet<String>,
}

impl Func {
    /// Whether the function is annotated as a read-only query.
    pub fn is_query(self: &Self) -> bool {
        self.annotations.contains("query")
    }
}

/// A resolved service method. `type_id` refers to a `Type::Func` or a recursive reference to one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub name    : String,
    pub type_id : TypeId,
    pub doc     : Option<String>,
}

/// A resolved service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Service {
    pub methods: Vec<Method>,
}

/// Reference back to a definition that was still being resolved when it was encountered again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recursive {
    pub name    : String,
    /// Table slot holding the definition's resolved type.
    pub target  : TypeId,
}

/// A fully resolved type. Child types are referred to by `TypeId` into the owning `TypeTable`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    Primitive(Primitive),
    Vector(TypeId),
    Opt(TypeId),
    Record(Vec<Field>),
    Variant(Vec<Field>),
    Func(Func),
    Service(Service),
    Recursive(Recursive),
}

/// Arena of resolved types plus the caches used while resolving named definitions.
#[derive(Clone, Debug, Default)]
pub struct TypeTable {
    pub(super) types        : Vec<Type>,
    /// Fully resolved definitions.
    pub(super) memo         : HashMap<String, TypeId>,
    /// Definitions currently being resolved, mapped to their reserved slot.
    pub(super) in_progress  : HashMap<String, TypeId>,
    pub(super) lookups      : usize,
}

impl TypeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns the type for given type id.
    pub fn get(self: &Self, type_id: TypeId) -> &Type {
        &self.types[type_id.into_usize()]
    }
    /// Number of types in the table.
    pub fn len(self: &Self) -> usize {
        self.types.len()
    }
    pub fn is_empty(self: &Self) -> bool {
        self.types.is_empty()
    }
    /// Returns the type id of an already resolved definition.
    pub fn named(self: &Self, name: &str) -> Option<TypeId> {
        self.memo.get(name).copied()
    }
    /// Number of definition lookups performed so far. Cache hits do not count.
    pub fn lookups(self: &Self) -> usize {
        self.lookups
    }
    /// Follows recursive references until a non-recursive type is reached.
    pub fn follow(self: &Self, mut type_id: TypeId) -> TypeId {
        for _ in 0..=self.types.len() {
            match self.get(type_id) {
                Type::Recursive(recursive) if recursive.target != type_id => type_id = recursive.target,
                _ => break,
            }
        }
        type_id
    }
    /// Returns the function type behind given id, following recursive references.
    pub fn func(self: &Self, type_id: TypeId) -> Option<&Func> {
        match self.get(self.follow(type_id)) {
            Type::Func(func) => Some(func),
            _ => None,
        }
    }
    /// Returns the methods of a service in declaration order. Fails if the type is not a service or one of its methods
    /// is not a function.
    pub fn methods(self: &Self, type_id: TypeId) -> ResolveResult<Vec<(&str, &Func)>> {
        match self.get(self.follow(type_id)) {
            Type::Service(service) => service.methods.iter().map(|method| {
                self.func(method.type_id)
                    .map(|func| (method.name.as_str(), func))
                    .ok_or_else(|| ResolveError::new(ResolveErrorKind::NotAFunction(method.name.clone()), None))
            }).collect(),
            _ => Err(ResolveError::new(ResolveErrorKind::NotAService(self.display(type_id).to_string()), None)),
        }
    }
    /// Whether a recursive reference is reachable from given type.
    pub fn has_recursion(self: &Self, type_id: TypeId) -> bool {
        let mut pending = vec![ type_id ];
        while let Some(type_id) = pending.pop() {
            match self.get(type_id) {
                Type::Primitive(_) => { },
                Type::Vector(inner) | Type::Opt(inner) => pending.push(*inner),
                Type::Record(fields) | Type::Variant(fields) => pending.extend(fields.iter().map(|f| f.type_id)),
                Type::Func(func) => pending.extend(func.args.iter().chain(func.rets.iter()).map(|a| a.type_id)),
                Type::Service(service) => pending.extend(service.methods.iter().map(|m| m.type_id)),
                Type::Recursive(_) => return true,
            }
        }
        false
    }
    /// Returns a value that displays the given type in interface syntax.
    pub fn display(self: &Self, type_id: TypeId) -> TypeDisplay<'_> {
        TypeDisplay { table: self, type_id }
    }
    pub(super) fn push(self: &mut Self, ty: Type) -> TypeId {
        let type_id = TypeId::from(self.types.len());
        self.types.push(ty);
        type_id
    }
    pub(super) fn set(self: &mut Self, type_id: TypeId, ty: Type) {
        self.types[type_id.into_usize()] = ty;
    }
    /// Drops all types from given index on.
    pub(super) fn truncate(self: &mut Self, len: usize) {
        self.types.truncate(len);
    }
    /// Discards everything created since the table had given length.
    pub(super) fn rollback(self: &mut Self, len: usize) {
        self.truncate(len);
        self.memo.retain(|_, type_id| type_id.into_usize() < len);
        self.in_progress.clear();
    }
}

/// Displays a resolved type in interface syntax. Recursive references print as the name of their definition.
pub struct TypeDisplay<'a> {
    table   : &'a TypeTable,
    type_id : TypeId,
}

impl<'a> TypeDisplay<'a> {
    fn with(self: &Self, type_id: TypeId) -> TypeDisplay<'a> {
        TypeDisplay { table: self.table, type_id }
    }
    fn write_args(self: &Self, f: &mut fmt::Formatter<'_>, args: &[Arg]) -> fmt::Result {
        write!(f, "(")?;
        for (index, arg) in args.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            if let Some(name) = &arg.name {
                write_name(f, name)?;
                write!(f, ": ")?;
            }
            write!(f, "{}", self.with(arg.type_id))?;
        }
        write!(f, ")")
    }
    fn write_func(self: &Self, f: &mut fmt::Formatter<'_>, func: &Func) -> fmt::Result {
        self.write_args(f, &func.args)?;
        write!(f, " -> ")?;
        self.write_args(f, &func.rets)?;
        for annotation in &func.annotations {
            write!(f, " {}", annotation)?;
        }
        Ok(())
    }
    fn write_fields(self: &Self, f: &mut fmt::Formatter<'_>, keyword: Keyword, fields: &[Field]) -> fmt::Result {
        write!(f, "{} {{", keyword.as_str())?;
        for field in fields {
            match (&field.label, self.table.get(field.type_id)) {
                (Label::Unnamed(_), _) => write!(f, " {};", self.with(field.type_id))?,
                (label, Type::Primitive(Primitive::Null)) if keyword == Keyword::Variant => write!(f, " {};", label)?,
                (label, _) => write!(f, " {}: {};", label, self.with(field.type_id))?,
            }
        }
        write!(f, " }}")
    }
}

impl<'a> Display for TypeDisplay<'a> {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.table.get(self.type_id) {
            Type::Primitive(p) => write!(f, "{}", p),
            Type::Vector(inner) => write!(f, "vec {}", self.with(*inner)),
            Type::Opt(inner) => write!(f, "opt {}", self.with(*inner)),
            Type::Record(fields) => self.write_fields(f, Keyword::Record, fields),
            Type::Variant(fields) => self.write_fields(f, Keyword::Variant, fields),
            Type::Func(func) => {
                write!(f, "func ")?;
                self.write_func(f, func)
            },
            Type::Service(service) => {
                write!(f, "service {{")?;
                for method in &service.methods {
                    write!(f, " ")?;
                    write_name(f, &method.name)?;
                    match self.table.get(method.type_id) {
                        Type::Func(func) => {
                            write!(f, ": ")?;
                            self.write_func(f, func)?;
                        },
                        _ => write!(f, ": {}", self.with(method.type_id))?,
                    }
                    write!(f, ";")?;
                }
                write!(f, " }}")
            },
            Type::Recursive(recursive) => write!(f, "{}", recursive.name),
        }
    }
}
