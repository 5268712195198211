use crate::frontend::lexer::token::{Keyword, Punct, TokenKind};
use crate::frontend::ast::Primitive;
use crate::frontend::parser::{types::{Tokens, Lexeme, Output, Failure}, error::ParseErrorKind};

impl<'a> nom::error::ParseError<Tokens<'a>> for Failure<'a> {
    fn from_error_kind(input: Tokens<'a>, _: nom::error::ErrorKind) -> Self {
        input.record_failure();
        Failure { input, kind: ParseErrorKind::SyntaxError }
    }
    fn append(_: Tokens<'a>, _: nom::error::ErrorKind, other: Self) -> Self {
        other.input.record_failure();
        other
    }
}

impl<'a> nom::InputLength for Tokens<'a> {
    #[inline]
    fn input_len(&self) -> usize {
        self.data.len()
    }
}

/// Consumes the next lexeme if the mapping function accepts its kind.
pub(super) fn next_map<'a, O, F>(f: F) -> impl FnMut(Tokens<'a>) -> Output<'a, (O, &'a Lexeme<'a>)>
where
    F: Fn(&'a TokenKind) -> Option<O>
{
    move |input: Tokens<'a>| {
        match input.first().and_then(|lexeme| f(&lexeme.token.kind).map(|o| (o, lexeme))) {
            Some(result) => Ok((input.advance(1), result)),
            None => Err(nom::Err::Error(nom::error::ParseError::from_error_kind(input, nom::error::ErrorKind::Tag))),
        }
    }
}

/// Consumes the next lexeme if it satisfies the predicate.
pub(super) fn next_if<'a, F>(predicate: F) -> impl FnMut(Tokens<'a>) -> Output<'a, &'a Lexeme<'a>>
where
    F: Fn(&TokenKind) -> bool
{
    let mut inner = next_map(move |kind| if predicate(kind) { Some(()) } else { None });
    move |input: Tokens<'a>| inner(input).map(|(remaining, (_, lexeme))| (remaining, lexeme))
}

/// Matches the given punctuation.
pub(super) fn punct<'a>(punct: Punct) -> impl FnMut(Tokens<'a>) -> Output<'a, &'a Lexeme<'a>> {
    next_if(move |kind| *kind == TokenKind::Punct(punct))
}

/// Matches the given keyword.
pub(super) fn keyword<'a>(keyword: Keyword) -> impl FnMut(Tokens<'a>) -> Output<'a, &'a Lexeme<'a>> {
    next_if(move |kind| *kind == TokenKind::Keyword(keyword))
}

/// Matches an identifier.
pub(super) fn identifier(i: Tokens<'_>) -> Output<&Lexeme> {
    next_if(|kind| *kind == TokenKind::Identifier)(i)
}

/// Matches a primitive type keyword.
pub(super) fn primitive(i: Tokens<'_>) -> Output<Primitive> {
    let (remaining, (primitive, _)) = next_map(|kind| match kind {
        TokenKind::Primitive(primitive) => Some(*primitive),
        _ => None,
    })(i)?;
    Ok((remaining, primitive))
}

/// Matches a string literal, returning its decoded contents.
pub(super) fn text(i: Tokens<'_>) -> Output<(String, &Lexeme)> {
    next_map(|kind| match kind {
        TokenKind::Text(value) => Some(value.clone()),
        _ => None,
    })(i)
}

/// Matches a natural number literal.
pub(super) fn natural(i: Tokens<'_>) -> Output<&Lexeme> {
    next_if(|kind| *kind == TokenKind::Natural)(i)
}

/// Matches a name: an identifier or a quoted string.
pub(super) fn name(i: Tokens<'_>) -> Output<(String, &Lexeme)> {
    if let Ok((remaining, lexeme)) = identifier(i.clone()) {
        return Ok((remaining, (lexeme.token.text.clone(), lexeme)));
    }
    text(i)
}

/// Skips past the next `;` that is not nested inside braces or parentheses. Always consumes at least one token.
pub(super) fn synchronize<'a>(input: Tokens<'a>) -> Tokens<'a> {
    let mut depth = 0usize;
    for (index, lexeme) in input.data.iter().enumerate() {
        match lexeme.token.kind {
            TokenKind::Punct(Punct::LBrace) | TokenKind::Punct(Punct::LParen) => depth += 1,
            TokenKind::Punct(Punct::RBrace) | TokenKind::Punct(Punct::RParen) => depth = depth.saturating_sub(1),
            TokenKind::Punct(Punct::Semi) if depth == 0 => return input.advance(index + 1),
            _ => { }
        }
    }
    input.advance(input.data.len())
}
