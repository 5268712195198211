//! Type resolver. Turns parsed type expressions into concrete types stored in a `TypeTable`.

pub mod error;
pub mod resolved;

use crate::config::Position;
use crate::frontend::ast::{self, Program};
use crate::shared::typed_ids::TypeId;
use error::{ResolveError, ResolveErrorKind, ResolveResult};
use resolved::{Arg, Field, Func, Method, Recursive, Service, Type, TypeTable};

/// A service method naming a definition that was still being resolved when the method was reached. Checked once
/// the definition's slot is filled in.
struct PendingMethod {
    target  : TypeId,
    name    : String,
    position: Position,
}

/// Internal state of a single top-level resolution.
struct Resolver<'a, 'b> {
    program : &'a Program,
    table   : &'b mut TypeTable,
    pending : Vec<PendingMethod>,
}

impl<'a, 'b> Resolver<'a, 'b> {

    /// Resolves a type expression.
    fn resolve_type(self: &mut Self, item: &ast::TypeExpr) -> ResolveResult<TypeId> {
        use self::ast::TypeExpr as T;
        Ok(match item {
            T::Primitive(primitive)     => self.table.push(Type::Primitive(*primitive)),
            T::Vector(inner)            => {
                let inner = self.resolve_type(inner)?;
                self.table.push(Type::Vector(inner))
            },
            T::Opt(inner)               => {
                let inner = self.resolve_type(inner)?;
                self.table.push(Type::Opt(inner))
            },
            T::Record(fields)           => {
                let fields = self.resolve_fields(fields)?;
                self.table.push(Type::Record(fields))
            },
            T::Variant(fields)          => {
                let fields = self.resolve_fields(fields)?;
                self.table.push(Type::Variant(fields))
            },
            T::Func(func)               => {
                let func = self.resolve_func(func)?;
                self.table.push(Type::Func(func))
            },
            T::Service(service)         => {
                let service = self.resolve_service(service)?;
                self.table.push(Type::Service(service))
            },
            T::Named(named)             => self.resolve_named(&named.name, Some(named.position))?,
        })
    }

    /// Resolves a named type. Names currently being resolved higher up produce a recursive reference to the slot
    /// reserved for them, which terminates self-referential definitions.
    fn resolve_named(self: &mut Self, name: &str, position: Option<Position>) -> ResolveResult<TypeId> {
        if let Some(&target) = self.table.in_progress.get(name) {
            log::trace!("tying recursive reference to '{}' back to {:?}", name, target);
            return Ok(self.table.push(Type::Recursive(Recursive { name: name.to_string(), target })));
        }
        if let Some(&type_id) = self.table.memo.get(name) {
            log::trace!("'{}' already resolved as {:?}", name, type_id);
            return Ok(type_id);
        }
        self.table.lookups += 1;
        let definition = self.program.definition(name)
            .ok_or_else(|| ResolveError::new(ResolveErrorKind::UnknownType(name.to_string()), position))?;

        let slot = self.table.push(Type::Primitive(ast::Primitive::Empty));
        self.table.in_progress.insert(name.to_string(), slot);
        // anything but an alias of an already resolved definition pushes a new top node used by nothing but this slot
        let fresh = match &definition.ty {
            ast::TypeExpr::Named(named) => self.table.in_progress.contains_key(&named.name),
            _ => true,
        };
        let body = self.resolve_type(&definition.ty)?;
        self.table.in_progress.remove(name);

        let resolved = self.table.get(body).clone();
        if let Type::Recursive(Recursive { target, .. }) = &resolved {
            if *target == slot {
                // the definition is nothing but a chain of aliases back to itself
                return Err(ResolveError::new(ResolveErrorKind::UnguardedRecursion(name.to_string()), Some(definition.position)));
            }
        }
        self.table.set(slot, resolved);
        if fresh && body.into_usize() + 1 == self.table.len() {
            self.table.truncate(body.into_usize());
        }
        self.check_pending(slot)?;
        self.table.memo.insert(name.to_string(), slot);
        Ok(slot)
    }

    /// Checks the methods that referred to the given slot while it was being resolved.
    fn check_pending(self: &mut Self, slot: TypeId) -> ResolveResult {
        let mut index = 0;
        while index < self.pending.len() {
            if self.pending[index].target != slot {
                index += 1;
                continue;
            }
            match self.table.get(slot) {
                Type::Func(_) => {
                    self.pending.swap_remove(index);
                },
                Type::Recursive(recursive) => {
                    // alias of a definition further up, which is still in progress
                    self.pending[index].target = recursive.target;
                    index += 1;
                },
                _ => {
                    let method = self.pending.swap_remove(index);
                    return Err(ResolveError::new(ResolveErrorKind::NotAFunction(method.name), Some(method.position)));
                },
            }
        }
        Ok(())
    }

    fn resolve_fields(self: &mut Self, fields: &[ast::Field]) -> ResolveResult<Vec<Field>> {
        fields.iter().map(|field| {
            let type_id = match &field.ty {
                Some(ty) => self.resolve_type(ty)?,
                None => self.table.push(Type::Primitive(ast::Primitive::Null)),
            };
            Ok(Field {
                label   : field.label.clone(),
                type_id : type_id,
                doc     : field.doc.clone(),
            })
        }).collect()
    }

    fn resolve_args(self: &mut Self, args: &[ast::Arg]) -> ResolveResult<Vec<Arg>> {
        args.iter().map(|arg| {
            Ok(Arg {
                name    : arg.name.clone(),
                type_id : self.resolve_type(&arg.ty)?,
            })
        }).collect()
    }

    fn resolve_func(self: &mut Self, func: &ast::FuncType) -> ResolveResult<Func> {
        Ok(Func {
            args        : self.resolve_args(&func.args)?,
            rets        : self.resolve_args(&func.rets)?,
            annotations : func.annotations.clone(),
        })
    }

    fn resolve_service(self: &mut Self, service: &ast::ServiceType) -> ResolveResult<Service> {
        let mut methods = Vec::with_capacity(service.methods.len());
        for method in &service.methods {
            let type_id = match &method.ty {
                ast::MethodType::Func(func) => {
                    let func = self.resolve_func(func)?;
                    self.table.push(Type::Func(func))
                },
                ast::MethodType::Named(named) => {
                    let type_id = self.resolve_named(&named.name, Some(named.position))?;
                    self.expect_func(type_id, &named.name, named.position)?;
                    type_id
                },
            };
            methods.push(Method {
                name    : method.name.clone(),
                type_id : type_id,
                doc     : method.doc.clone(),
            });
        }
        Ok(Service { methods })
    }

    /// Fails unless the type is a function. References to definitions still in progress are checked once those
    /// are resolved.
    fn expect_func(self: &mut Self, type_id: TypeId, name: &str, position: Position) -> ResolveResult {
        let target = self.table.follow(type_id);
        if self.table.in_progress.values().any(|&slot| slot == target) {
            self.pending.push(PendingMethod { target, name: name.to_string(), position });
            return Ok(());
        }
        match self.table.get(target) {
            Type::Func(_) => Ok(()),
            _ => Err(ResolveError::new(ResolveErrorKind::NotAFunction(name.to_string()), Some(position))),
        }
    }
}

impl Program {
    /// Runs a resolution step, discarding all partial results if it fails.
    fn with_resolver<T>(self: &Self, table: &mut TypeTable, f: impl FnOnce(&mut Resolver) -> ResolveResult<T>) -> ResolveResult<T> {
        let len = table.len();
        let result = f(&mut Resolver { program: self, table: table, pending: Vec::new() });
        if let Err(error) = &result {
            log::debug!("resolution failed: {}", error);
            table.rollback(len);
        }
        result
    }

    /// Resolves a type expression into a concrete type. Named definitions are memoized in the table, so resolving the
    /// same name again is a pure cache hit. Recursive definitions resolve to a graph in which the recursive occurrence
    /// is a `Type::Recursive` pointing back at the definition's slot.
    pub fn resolve(self: &Self, ty: &ast::TypeExpr, table: &mut TypeTable) -> ResolveResult<TypeId> {
        self.with_resolver(table, |resolver| resolver.resolve_type(ty))
    }

    /// Resolves the type defined under given name.
    ///
    /// ```
    /// use tidl::{parse, TypeTable, resolved::Type};
    ///
    /// let program = parse("type List = opt record { head: nat; tail: List };").unwrap();
    /// let mut table = TypeTable::new();
    /// let list = program.resolve_name("List", &mut table).unwrap();
    /// assert!(matches!(table.get(list), Type::Opt(_)));
    /// assert!(table.has_recursion(list));
    /// ```
    pub fn resolve_name(self: &Self, name: &str, table: &mut TypeTable) -> ResolveResult<TypeId> {
        let position = self.definition(name).map(|d| d.position);
        self.with_resolver(table, |resolver| resolver.resolve_named(name, position))
    }

    /// Resolves all definitions in declaration order.
    pub fn resolve_all(self: &Self, table: &mut TypeTable) -> ResolveResult<Vec<(String, TypeId)>> {
        let mut resolved = Vec::with_capacity(self.definitions.len());
        for definition in self.definitions() {
            let type_id = self.with_resolver(table, |resolver| resolver.resolve_named(&definition.name, Some(definition.position)))?;
            resolved.push((definition.name.clone(), type_id));
        }
        log::debug!("resolved {} definitions into {} types", resolved.len(), table.len());
        Ok(resolved)
    }

    /// Resolves the declared service, or returns `None` if the source declares none.
    pub fn actor_type(self: &Self, table: &mut TypeTable) -> ResolveResult<Option<TypeId>> {
        let actor = match &self.actor {
            Some(actor) => actor,
            None => return Ok(None),
        };
        self.with_resolver(table, |resolver| {
            match &actor.body {
                ast::ActorBody::Service(service) => {
                    let service = resolver.resolve_service(service)?;
                    Ok(Some(resolver.table.push(Type::Service(service))))
                },
                ast::ActorBody::Named(named) => {
                    let type_id = resolver.resolve_named(&named.name, Some(named.position))?;
                    match resolver.table.get(resolver.table.follow(type_id)) {
                        Type::Service(_) => Ok(Some(type_id)),
                        _ => Err(ResolveError::new(ResolveErrorKind::NotAService(named.name.clone()), Some(named.position))),
                    }
                },
            }
        })
    }

    /// Resolves the init arguments of a service constructor (`service : (args) -> { .. }`).
    pub fn actor_init(self: &Self, table: &mut TypeTable) -> ResolveResult<Option<Vec<Arg>>> {
        match self.actor.as_ref().and_then(|actor| actor.init.as_ref()) {
            Some(init) => self.with_resolver(table, |resolver| resolver.resolve_args(init)).map(Some),
            None => Ok(None),
        }
    }
}
