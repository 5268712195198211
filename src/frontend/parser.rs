//! Nom parsers used to generate the interface CST.

pub mod error;
mod check;
mod nomutil;
mod types;

use std::collections::BTreeSet;
use nom::branch::alt;
use nom::combinator::{map, opt};
use nom::multi::{many0, separated_list0};
use nom::sequence::{delimited, pair, preceded, terminated, tuple};
use crate::config::{Duplicates, FieldIndex, ParseOptions, Position};
use crate::frontend::ast::*;
use crate::frontend::lexer::{lex, token::{Keyword, Punct, Token}};
use crate::shared::error::Error;
use types::{Tokens, Lexeme, Output, Failure, attach_comments};
use error::{ParseError, ParseErrors, ParseErrorKind};
use nomutil::*;

// datatype

fn datatype(i: Tokens<'_>) -> Output<TypeExpr> {
    alt((
        map(primitive, TypeExpr::Primitive),
        constype,
        reftype,
        map(identifier, |lexeme| TypeExpr::Named(named_ref(lexeme))),
    ))(i)
}

fn named_ref(lexeme: &Lexeme<'_>) -> NamedTypeRef {
    NamedTypeRef {
        name    : lexeme.token.text.clone(),
        position: lexeme.token.position,
    }
}

// constructed types (blob, opt T, vec T, record { .. }, variant { .. })

fn constype(i: Tokens<'_>) -> Output<TypeExpr> {
    alt((
        map(keyword(Keyword::Blob), |_| TypeExpr::Vector(Box::new(TypeExpr::Primitive(Primitive::Nat8)))),
        map(preceded(keyword(Keyword::Opt), datatype), |t| TypeExpr::Opt(Box::new(t))),
        map(preceded(keyword(Keyword::Vec), datatype), |t| TypeExpr::Vector(Box::new(t))),
        map(preceded(keyword(Keyword::Record), fields), TypeExpr::Record),
        map(preceded(keyword(Keyword::Variant), fields), TypeExpr::Variant),
    ))(i)
}

/// A field before positional numbering: `None` label for bare datatypes.
struct FieldSyntax {
    label   : Option<Label>,
    ty      : Option<TypeExpr>,
    doc     : Option<String>,
    position: Position,
}

fn field_label(i: Tokens<'_>) -> Output<Label> {
    if let Ok((remaining, lexeme)) = natural(i.clone()) {
        return match lexeme.token.natural_value().and_then(|value| FieldIndex::try_from(value).ok()) {
            Some(id) => Ok((remaining, Label::Id(id))),
            None => Err(nom::Err::Failure(Failure { input: i, kind: ParseErrorKind::InvalidNumeral })),
        };
    }
    map(name, |(name, _)| Label::Named(name))(i)
}

/// A single record/variant field. The labelled form is tried first, a bare datatype only if that fails, so
/// `record { foo }` declares a field `foo` of type null rather than a positional field of type `foo`.
fn fieldtype(i: Tokens<'_>) -> Output<FieldSyntax> {
    let doc = i.first().and_then(|l| l.doc).map(str::to_string);
    let position = i.position();
    alt((
        map(
            pair(field_label, opt(preceded(punct(Punct::Colon), datatype))),
            |(label, ty)| (Some(label), ty)
        ),
        map(datatype, |ty| (None, Some(ty))),
    ))(i).map(|(remaining, (label, ty))| (remaining, FieldSyntax { label, ty, doc, position }))
}

fn fields(i: Tokens<'_>) -> Output<Vec<Field>> {
    map(
        delimited(
            punct(Punct::LBrace),
            terminated(separated_list0(punct(Punct::Semi), fieldtype), opt(punct(Punct::Semi))),
            punct(Punct::RBrace)
        ),
        |list| {
            let mut positional: FieldIndex = 0;
            list.into_iter().map(|field| {
                let label = field.label.unwrap_or_else(|| {
                    positional += 1;
                    Label::Unnamed(positional - 1)
                });
                Field {
                    label   : label,
                    ty      : field.ty,
                    doc     : field.doc,
                    position: field.position,
                }
            }).collect()
        }
    )(i)
}

// reference types (func .., service ..)

fn reftype(i: Tokens<'_>) -> Output<TypeExpr> {
    alt((
        map(preceded(keyword(Keyword::Func), functype), TypeExpr::Func),
        map(preceded(keyword(Keyword::Service), actortype), TypeExpr::Service),
    ))(i)
}

fn argtype(i: Tokens<'_>) -> Output<Arg> {
    alt((
        map(pair(terminated(name, punct(Punct::Colon)), datatype), |((name, _), ty)| Arg { name: Some(name), ty }),
        map(datatype, |ty| Arg { name: None, ty }),
    ))(i)
}

fn tuptype(i: Tokens<'_>) -> Output<Vec<Arg>> {
    delimited(
        punct(Punct::LParen),
        terminated(separated_list0(punct(Punct::Comma), argtype), opt(punct(Punct::Comma))),
        punct(Punct::RParen)
    )(i)
}

fn functype(i: Tokens<'_>) -> Output<FuncType> {
    map(
        tuple((tuptype, punct(Punct::Arrow), tuptype, many0(identifier))),
        |(args, _, rets, annotations)| FuncType {
            args        : args,
            rets        : rets,
            annotations : annotations.into_iter().map(|l| l.token.text.clone()).collect::<BTreeSet<_>>(),
        }
    )(i)
}

fn methtype(i: Tokens<'_>) -> Output<Method> {
    map(
        tuple((
            name,
            punct(Punct::Colon),
            alt((
                map(functype, MethodType::Func),
                map(identifier, |lexeme| MethodType::Named(named_ref(lexeme))),
            ))
        )),
        |((name, lexeme), _, ty)| Method {
            name    : name,
            ty      : ty,
            doc     : lexeme.doc.map(str::to_string),
            position: lexeme.token.position,
        }
    )(i)
}

fn actortype(i: Tokens<'_>) -> Output<ServiceType> {
    map(
        delimited(
            punct(Punct::LBrace),
            terminated(separated_list0(punct(Punct::Semi), methtype), opt(punct(Punct::Semi))),
            punct(Punct::RBrace)
        ),
        |methods| ServiceType { methods }
    )(i)
}

// service declaration

fn actor(i: Tokens<'_>) -> Output<ActorDecl> {
    map(
        tuple((
            keyword(Keyword::Service),
            opt(name),
            punct(Punct::Colon),
            opt(terminated(tuptype, punct(Punct::Arrow))),
            alt((
                map(actortype, ActorBody::Service),
                map(identifier, |lexeme| ActorBody::Named(named_ref(lexeme))),
            )),
            opt(punct(Punct::Semi)),
        )),
        |(service, name, _, init, body, _)| ActorDecl {
            name    : name.map(|(name, _)| name),
            init    : init,
            body    : body,
            doc     : service.doc.map(str::to_string),
            position: service.token.position,
        }
    )(i)
}

// top level items (import "path"; type Name = datatype;)

enum Item {
    Import(Import),
    Definition(Definition),
}

fn import(i: Tokens<'_>) -> Output<Import> {
    map(
        tuple((keyword(Keyword::Import), text, punct(Punct::Semi))),
        |(import, (path, _), _)| Import {
            path    : path,
            doc     : import.doc.map(str::to_string),
            position: import.token.position,
        }
    )(i)
}

fn definition(i: Tokens<'_>) -> Output<Definition> {
    map(
        tuple((keyword(Keyword::Type), identifier, punct(Punct::Equals), datatype, punct(Punct::Semi))),
        |(type_, ident, _, ty, _)| Definition {
            name    : ident.token.text.clone(),
            ty      : ty,
            doc     : type_.doc.map(str::to_string),
            position: ident.token.position,
        }
    )(i)
}

fn item(i: Tokens<'_>) -> Output<Item> {
    alt((
        map(import, Item::Import),
        map(definition, Item::Definition),
    ))(i)
}

/// Converts a failed parse into a positioned error.
fn to_error(err: nom::Err<Failure<'_>>, input: &Tokens<'_>) -> ParseError {
    match err {
        nom::Err::Failure(failure) => ParseError::new(failure.kind, failure.input.position()),
        // nom error is useless to us, but we stored the furthest failed offset on the input which is the most likely error position
        _ => ParseError::new(ParseErrorKind::SyntaxError, input.furthest_position()),
    }
}

/// Parses a token stream into a program. Returns the program together with every error encountered; a program
/// accompanied by errors is incomplete and must not be treated as valid.
pub fn parse_tokens(tokens: &[Token], options: &ParseOptions) -> (Program, Vec<ParseError>) {
    let end = tokens.last().map_or(Position(0), |t| Position(t.position.0 + t.text.len()));
    let lexemes = attach_comments(tokens, options.doc_comments);
    let mut rest = Tokens::new(&lexemes, end);
    let mut program = Program::new();
    let mut errors = Vec::new();

    while !rest.is_empty() {
        rest.reset_furthest();
        if rest.at_keyword(Keyword::Service) {
            match actor(rest.clone()) {
                Ok((remaining, actor)) => {
                    program.actor = Some(actor);
                    if !remaining.is_empty() {
                        errors.push(ParseError::new(ParseErrorKind::TrailingInput, remaining.position()));
                    }
                },
                Err(err) => errors.push(to_error(err, &rest)),
            }
            break;
        }
        match item(rest.clone()) {
            Ok((remaining, Item::Import(import))) => {
                program.imports.push(import);
                rest = remaining;
            },
            Ok((remaining, Item::Definition(definition))) => {
                if program.definitions.index_of(definition.name.as_str()).is_some() {
                    match options.duplicates {
                        Duplicates::Shadow => {
                            log::warn!("type '{}' redefined at {}, later definition shadows earlier one", definition.name, definition.position);
                            program.definitions.insert(definition.name.clone(), definition);
                        },
                        Duplicates::Reject => {
                            errors.push(ParseError::new(ParseErrorKind::DuplicateDefinition(definition.name.clone()), definition.position));
                        },
                    }
                } else {
                    program.definitions.insert(definition.name.clone(), definition);
                }
                rest = remaining;
            },
            Err(err) => {
                errors.push(to_error(err, &rest));
                rest = synchronize(rest);
            },
        }
    }

    errors.extend(check::check_program(&program));
    errors.sort_by_key(|e| e.position());
    log::debug!(
        "parsed {} imports, {} definitions, {} service, {} errors",
        program.imports.len(), program.definitions.len(), if program.actor.is_some() { "a" } else { "no" }, errors.len()
    );
    (program, errors)
}

/// Parses interface source code using the given options.
pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Program, Error> {
    let tokens = lex(src)?;
    let (program, errors) = parse_tokens(&tokens, options);
    if errors.is_empty() {
        Ok(program)
    } else {
        Err(ParseErrors(errors).into())
    }
}

/// Parses interface source code into a program.
///
/// ```
/// let program = tidl::parse("type List = opt record { head: nat; tail: List };").unwrap();
/// assert!(program.definition("List").is_some());
/// ```
pub fn parse(src: &str) -> Result<Program, Error> {
    parse_with(src, &ParseOptions::default())
}
