use std::collections::HashSet;
use crate::frontend::ast::*;
use crate::frontend::parser::error::{ParseError, ParseErrorKind};

/// Reports labels declared twice within one record or variant and methods declared twice within one service.
pub(super) fn check_program(program: &Program) -> Vec<ParseError> {
    let mut errors = Vec::new();
    for definition in program.definitions() {
        check_type(&definition.ty, &mut errors);
    }
    if let Some(actor) = &program.actor {
        for arg in actor.init.iter().flatten() {
            check_type(&arg.ty, &mut errors);
        }
        if let ActorBody::Service(service) = &actor.body {
            check_service(service, &mut errors);
        }
    }
    errors
}

fn check_type(ty: &TypeExpr, errors: &mut Vec<ParseError>) {
    match ty {
        TypeExpr::Primitive(_) | TypeExpr::Named(_) => { },
        TypeExpr::Vector(inner) | TypeExpr::Opt(inner) => check_type(inner, errors),
        TypeExpr::Record(fields) | TypeExpr::Variant(fields) => {
            let mut seen = HashSet::new();
            for field in fields {
                if !seen.insert(&field.label) {
                    errors.push(ParseError::new(ParseErrorKind::DuplicateField(field.label.to_string()), field.position));
                }
                if let Some(ty) = &field.ty {
                    check_type(ty, errors);
                }
            }
        },
        TypeExpr::Func(func) => check_func(func, errors),
        TypeExpr::Service(service) => check_service(service, errors),
    }
}

fn check_func(func: &FuncType, errors: &mut Vec<ParseError>) {
    for arg in func.args.iter().chain(func.rets.iter()) {
        check_type(&arg.ty, errors);
    }
}

fn check_service(service: &ServiceType, errors: &mut Vec<ParseError>) {
    let mut seen = HashSet::new();
    for method in &service.methods {
        if !seen.insert(method.name.as_str()) {
            errors.push(ParseError::new(ParseErrorKind::DuplicateMethod(method.name.clone()), method.position));
        }
        if let MethodType::Func(func) = &method.ty {
            check_func(func, errors);
        }
    }
}
