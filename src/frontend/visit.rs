//! Visitor interface over resolved types.
//!
//! Every node kind has exactly one required method, so implementations are checked for exhaustiveness by the
//! compiler. Composite methods receive the table to allow visiting child types via [`TypeTable::accept`].

use crate::frontend::ast::Primitive;
use crate::frontend::resolver::resolved::{Field, Func, Recursive, Service, Type, TypeTable};
use crate::shared::typed_ids::TypeId;

pub trait Visitor {
    type Output;

    fn visit_bool(self: &mut Self) -> Self::Output;
    fn visit_nat(self: &mut Self) -> Self::Output;
    fn visit_nat8(self: &mut Self) -> Self::Output;
    fn visit_nat16(self: &mut Self) -> Self::Output;
    fn visit_nat32(self: &mut Self) -> Self::Output;
    fn visit_nat64(self: &mut Self) -> Self::Output;
    fn visit_int(self: &mut Self) -> Self::Output;
    fn visit_int8(self: &mut Self) -> Self::Output;
    fn visit_int16(self: &mut Self) -> Self::Output;
    fn visit_int32(self: &mut Self) -> Self::Output;
    fn visit_int64(self: &mut Self) -> Self::Output;
    fn visit_float32(self: &mut Self) -> Self::Output;
    fn visit_float64(self: &mut Self) -> Self::Output;
    fn visit_text(self: &mut Self) -> Self::Output;
    fn visit_null(self: &mut Self) -> Self::Output;
    fn visit_reserved(self: &mut Self) -> Self::Output;
    fn visit_empty(self: &mut Self) -> Self::Output;
    fn visit_principal(self: &mut Self) -> Self::Output;

    fn visit_vector(self: &mut Self, table: &TypeTable, element: TypeId) -> Self::Output;
    fn visit_opt(self: &mut Self, table: &TypeTable, inner: TypeId) -> Self::Output;
    fn visit_record(self: &mut Self, table: &TypeTable, fields: &[Field]) -> Self::Output;
    /// Exactly one of `fields` is active in a variant value.
    fn visit_variant(self: &mut Self, table: &TypeTable, fields: &[Field]) -> Self::Output;
    fn visit_func(self: &mut Self, table: &TypeTable, func: &Func) -> Self::Output;
    fn visit_service(self: &mut Self, table: &TypeTable, service: &Service) -> Self::Output;
    /// A reference back to a definition enclosing this node. Visiting `recursive.target` unconditionally does not
    /// terminate.
    fn visit_recursive(self: &mut Self, table: &TypeTable, recursive: &Recursive) -> Self::Output;
}

impl TypeTable {
    /// Dispatches to the visitor method matching the kind of the given type.
    pub fn accept<V: Visitor>(self: &Self, type_id: TypeId, visitor: &mut V) -> V::Output {
        match self.get(type_id) {
            Type::Primitive(primitive) => match primitive {
                Primitive::Bool         => visitor.visit_bool(),
                Primitive::Nat          => visitor.visit_nat(),
                Primitive::Nat8         => visitor.visit_nat8(),
                Primitive::Nat16        => visitor.visit_nat16(),
                Primitive::Nat32        => visitor.visit_nat32(),
                Primitive::Nat64        => visitor.visit_nat64(),
                Primitive::Int          => visitor.visit_int(),
                Primitive::Int8         => visitor.visit_int8(),
                Primitive::Int16        => visitor.visit_int16(),
                Primitive::Int32        => visitor.visit_int32(),
                Primitive::Int64        => visitor.visit_int64(),
                Primitive::Float32      => visitor.visit_float32(),
                Primitive::Float64      => visitor.visit_float64(),
                Primitive::Text         => visitor.visit_text(),
                Primitive::Null         => visitor.visit_null(),
                Primitive::Reserved     => visitor.visit_reserved(),
                Primitive::Empty        => visitor.visit_empty(),
                Primitive::Principal    => visitor.visit_principal(),
            },
            Type::Vector(element)       => visitor.visit_vector(self, *element),
            Type::Opt(inner)            => visitor.visit_opt(self, *inner),
            Type::Record(fields)        => visitor.visit_record(self, fields),
            Type::Variant(fields)       => visitor.visit_variant(self, fields),
            Type::Func(func)            => visitor.visit_func(self, func),
            Type::Service(service)      => visitor.visit_service(self, service),
            Type::Recursive(recursive)  => visitor.visit_recursive(self, recursive),
        }
    }
}
