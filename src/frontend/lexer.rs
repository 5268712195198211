//! Nom parsers used to split interface source text into tokens.

pub mod error;
pub mod token;

use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{is_not, tag, take_until, take_while, take_while1, take_while_m_n};
use nom::character::complete::{char, multispace0, satisfy};
use nom::combinator::{cut, map, map_opt, recognize, value, verify};
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded, terminated};
use crate::config::Position;
use crate::frontend::ast::Primitive;
use error::{LexError, LexErrorKind, LexResult};
use token::{Keyword, Punct, Token, TokenKind};

/// Lexer error carrying the failing input and the reason.
#[derive(Debug)]
struct Failure<'a> {
    input: &'a str,
    kind: LexErrorKind,
}

impl<'a> nom::error::ParseError<&'a str> for Failure<'a> {
    fn from_error_kind(input: &'a str, _: nom::error::ErrorKind) -> Self {
        Failure { input, kind: LexErrorKind::UnexpectedCharacter(input.chars().next().unwrap_or('\0')) }
    }
    fn append(_: &'a str, _: nom::error::ErrorKind, other: Self) -> Self {
        other
    }
}

type Output<'a, O> = nom::IResult<&'a str, O, Failure<'a>>;

/// Runs the parser, turning any recoverable error into a failure of the given kind.
fn expect<'a, O, P>(mut parser: P, kind: LexErrorKind) -> impl FnMut(&'a str) -> Output<'a, O>
where
    P: Parser<&'a str, O, Failure<'a>>,
{
    move |input: &'a str| match parser.parse(input) {
        Err(nom::Err::Error(failure)) => Err(nom::Err::Failure(Failure { input: failure.input, kind: kind.clone() })),
        other => other,
    }
}

// comments (// line, /* block */)

fn line_comment(i: &str) -> Output<TokenKind> {
    value(TokenKind::LineComment, pair(tag("//"), take_while(|c: char| c != '\r' && c != '\n')))(i)
}

fn block_comment(i: &str) -> Output<TokenKind> {
    value(
        TokenKind::BlockComment,
        preceded(tag("/*"), expect(terminated(take_until("*/"), tag("*/")), LexErrorKind::UnterminatedComment))
    )(i)
}

// punctuation, multi-character first

fn punct(i: &str) -> Output<TokenKind> {
    map(
        alt((
            value(Punct::Arrow, tag(Punct::Arrow.as_str())),
            value(Punct::LParen, tag(Punct::LParen.as_str())),
            value(Punct::RParen, tag(Punct::RParen.as_str())),
            value(Punct::LBrace, tag(Punct::LBrace.as_str())),
            value(Punct::RBrace, tag(Punct::RBrace.as_str())),
            value(Punct::Colon, tag(Punct::Colon.as_str())),
            value(Punct::Semi, tag(Punct::Semi.as_str())),
            value(Punct::Comma, tag(Punct::Comma.as_str())),
            value(Punct::Equals, tag(Punct::Equals.as_str())),
        )),
        TokenKind::Punct
    )(i)
}

// natural (42, 1_000, 0xff)

fn natural(i: &str) -> Output<TokenKind> {
    value(
        TokenKind::Natural,
        alt((
            recognize(pair(tag("0x"), take_while1(|c: char| c.is_ascii_hexdigit() || c == '_'))),
            recognize(pair(satisfy(|c| c.is_ascii_digit()), take_while(|c: char| c.is_ascii_digit() || c == '_'))),
        ))
    )(i)
}

// identifier, keyword or primitive ([A-Za-z_][A-Za-z0-9_]*)

fn word(i: &str) -> Output<TokenKind> {
    map(
        recognize(pair(
            satisfy(|c| c.is_ascii_alphabetic() || c == '_'),
            take_while(|c: char| c.is_ascii_alphanumeric() || c == '_')
        )),
        |word: &str| {
            if let Some(keyword) = Keyword::from_str(word) {
                TokenKind::Keyword(keyword)
            } else if let Some(primitive) = Primitive::from_str(word) {
                TokenKind::Primitive(primitive)
            } else {
                TokenKind::Identifier
            }
        }
    )(i)
}

// string literal ("hello\n\u{1F600}\41")

/// A piece of a string literal.
enum Fragment<'a> {
    Literal(&'a str),
    Char(char),
    Byte(u8),
}

/// Parse a unicode sequence, of the form u{XXXX}, where XXXX is 1 to 6 hexadecimal numerals.
fn unicode(i: &str) -> Output<char> {
    let hex = take_while_m_n(1, 6, |c: char| c.is_ascii_hexdigit());
    let code = map_opt(preceded(char('u'), delimited(char('{'), hex, char('}'))), |hex: &str| u32::from_str_radix(hex, 16).ok());
    map_opt(code, std::char::from_u32)(i)
}

/// Parse a two digit hex escape producing a raw byte.
fn hex_byte(i: &str) -> Output<u8> {
    map_opt(take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit()), |hex: &str| u8::from_str_radix(hex, 16).ok())(i)
}

fn escaped(i: &str) -> Output<Fragment> {
    preceded(
        char('\\'),
        expect(alt((
            map(unicode, Fragment::Char),
            map(hex_byte, Fragment::Byte),
            map(alt((
                value('\n', char('n')),
                value('\r', char('r')),
                value('\t', char('t')),
                value('\\', char('\\')),
                value('"', char('"')),
                value('\'', char('\'')),
            )), Fragment::Char),
        )), LexErrorKind::InvalidEscape)
    )(i)
}

fn string(i: &str) -> Output<TokenKind> {
    let literal = map(verify(is_not("\"\\"), |s: &str| !s.is_empty()), Fragment::Literal);
    let body = fold_many0(alt((literal, escaped)), Vec::new, |mut bytes: Vec<u8>, fragment| {
        match fragment {
            Fragment::Literal(s) => bytes.extend_from_slice(s.as_bytes()),
            Fragment::Char(c) => bytes.extend_from_slice(c.encode_utf8(&mut [0; 4]).as_bytes()),
            Fragment::Byte(b) => bytes.push(b),
        }
        bytes
    });
    let start = i;
    let (remaining, bytes) = preceded(char('"'), cut(terminated(body, expect(char('"'), LexErrorKind::UnterminatedString))))(i)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok((remaining, TokenKind::Text(text))),
        Err(_) => Err(nom::Err::Failure(Failure { input: start, kind: LexErrorKind::InvalidEscape })),
    }
}

fn token(i: &str) -> Output<TokenKind> {
    alt((line_comment, block_comment, string, punct, natural, word))(i)
}

/// Splits the given source into tokens. Whitespace is dropped, comments are kept as tokens.
pub fn lex(src: &str) -> LexResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut rest = src;
    loop {
        rest = multispace0::<&str, Failure>(rest).map_or(rest, |(remaining, _)| remaining);
        if rest.is_empty() {
            break;
        }
        let position = Position(src.len() - rest.len());
        match token(rest) {
            Ok((remaining, kind)) => {
                let text = &rest[..rest.len() - remaining.len()];
                tokens.push(Token { kind, text: text.to_string(), position });
                rest = remaining;
            },
            Err(nom::Err::Failure(failure)) => {
                let position = match failure.kind {
                    LexErrorKind::UnexpectedCharacter(_) => Position(src.len() - failure.input.len()),
                    _ => position,
                };
                return Err(LexError::new(failure.kind, position));
            },
            Err(_) => {
                let chr = rest.chars().next().unwrap_or('\0');
                return Err(LexError::new(LexErrorKind::UnexpectedCharacter(chr), position));
            },
        }
    }
    log::trace!("lexed {} tokens", tokens.len());
    Ok(tokens)
}
