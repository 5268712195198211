use std::fmt::{self, Display};
use crate::config::Position;
use crate::frontend::ast::Primitive;

/// Reserved words of the interface language, excluding primitive type names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    Type,
    Import,
    Service,
    Func,
    Opt,
    Vec,
    Record,
    Variant,
    Blob,
}

impl Keyword {
    pub fn from_str(text: &str) -> Option<Keyword> {
        Some(match text {
            "type"      => Keyword::Type,
            "import"    => Keyword::Import,
            "service"   => Keyword::Service,
            "func"      => Keyword::Func,
            "opt"       => Keyword::Opt,
            "vec"       => Keyword::Vec,
            "record"    => Keyword::Record,
            "variant"   => Keyword::Variant,
            "blob"      => Keyword::Blob,
            _           => return None,
        })
    }
    pub fn as_str(self: &Self) -> &'static str {
        match self {
            Keyword::Type       => "type",
            Keyword::Import     => "import",
            Keyword::Service    => "service",
            Keyword::Func       => "func",
            Keyword::Opt        => "opt",
            Keyword::Vec        => "vec",
            Keyword::Record     => "record",
            Keyword::Variant    => "variant",
            Keyword::Blob       => "blob",
        }
    }
}

/// Punctuation, including the multi-character arrow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Punct {
    Arrow,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Colon,
    Semi,
    Comma,
    Equals,
}

impl Punct {
    pub fn as_str(self: &Self) -> &'static str {
        match self {
            Punct::Arrow    => "->",
            Punct::LParen   => "(",
            Punct::RParen   => ")",
            Punct::LBrace   => "{",
            Punct::RBrace   => "}",
            Punct::Colon    => ":",
            Punct::Semi     => ";",
            Punct::Comma    => ",",
            Punct::Equals   => "=",
        }
    }
}

/// The classification of a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    Primitive(Primitive),
    Punct(Punct),
    LineComment,
    BlockComment,
    /// String literal with escapes already decoded.
    Text(String),
    /// Natural number literal, decimal or `0x` hexadecimal, possibly containing `_` separators.
    Natural,
}

/// A lexed token. `text` is the raw source slice the token was read from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind    : TokenKind,
    pub text    : String,
    pub position: Position,
}

impl Token {
    pub fn is_comment(self: &Self) -> bool {
        matches!(self.kind, TokenKind::LineComment | TokenKind::BlockComment)
    }
    /// Comment contents without delimiters and surrounding whitespace.
    pub fn comment_text(self: &Self) -> Option<&str> {
        match self.kind {
            TokenKind::LineComment => Some(self.text.trim_start_matches('/').trim()),
            TokenKind::BlockComment => {
                let inner = self.text.strip_prefix("/*").unwrap_or(&self.text);
                let inner = inner.strip_suffix("*/").unwrap_or(inner);
                Some(inner.trim_matches('*').trim())
            },
            _ => None,
        }
    }
    /// Numeric value of a natural literal.
    pub fn natural_value(self: &Self) -> Option<u128> {
        if self.kind != TokenKind::Natural {
            return None;
        }
        let digits: String = self.text.chars().filter(|&c| c != '_').collect();
        if let Some(hex) = digits.strip_prefix("0x") {
            u128::from_str_radix(hex, 16).ok()
        } else {
            digits.parse::<u128>().ok()
        }
    }
}

impl Display for Token {
    fn fmt(self: &Self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
