use std::cell::Cell;
use std::rc::Rc;
use crate::config::Position;
use crate::frontend::lexer::token::{Token, TokenKind, Keyword};
use crate::frontend::parser::error::ParseErrorKind;

/// A significant token together with the comment immediately preceding it.
#[derive(Clone, Debug)]
pub(super) struct Lexeme<'a> {
    pub token   : &'a Token,
    pub doc     : Option<&'a str>,
}

/// Drops comment tokens, attaching the text of the last comment before a token to that token.
pub(super) fn attach_comments(tokens: &[Token], doc_comments: bool) -> Vec<Lexeme<'_>> {
    let mut lexemes = Vec::with_capacity(tokens.len());
    let mut pending = None;
    for token in tokens {
        if token.is_comment() {
            pending = token.comment_text().filter(|text| !text.is_empty());
        } else {
            let doc = pending.take();
            lexemes.push(Lexeme {
                token   : token,
                doc     : doc.filter(|_| doc_comments),
            });
        }
    }
    lexemes
}

/// Parser input: a view into the lexemes of one source, sharing the furthest failure position with all other views
/// created from the same parse call.
#[derive(Clone, Debug)]
pub(super) struct Tokens<'a> {
    pub data    : &'a [Lexeme<'a>],
    all         : &'a [Lexeme<'a>],
    end         : Position,
    furthest    : Rc<Cell<usize>>,
}

impl<'a> Tokens<'a> {
    pub fn new(all: &'a [Lexeme<'a>], end: Position) -> Self {
        Tokens {
            data    : all,
            all     : all,
            end     : end,
            furthest: Rc::new(Cell::new(all.len())),
        }
    }
    /// Returns a view of the same source starting at the given offset into this view.
    pub fn advance(self: &Self, count: usize) -> Self {
        Tokens {
            data    : &self.data[count.min(self.data.len())..],
            all     : self.all,
            end     : self.end,
            furthest: self.furthest.clone(),
        }
    }
    pub fn is_empty(self: &Self) -> bool {
        self.data.is_empty()
    }
    pub fn first(self: &Self) -> Option<&'a Lexeme<'a>> {
        self.data.first()
    }
    /// Whether the next token is the given keyword.
    pub fn at_keyword(self: &Self, keyword: Keyword) -> bool {
        self.first().map_or(false, |l| l.token.kind == TokenKind::Keyword(keyword))
    }
    /// Source position of the next token, or the end of the source.
    pub fn position(self: &Self) -> Position {
        self.first().map_or(self.end, |l| l.token.position)
    }
    /// Records a failed match at the start of this view.
    pub fn record_failure(self: &Self) {
        if self.data.len() < self.furthest.get() {
            self.furthest.set(self.data.len());
        }
    }
    /// Forgets failures recorded before this view.
    pub fn reset_furthest(self: &Self) {
        self.furthest.set(self.data.len());
    }
    /// Position of the furthest failed match, the most likely location of a syntax error.
    pub fn furthest_position(self: &Self) -> Position {
        let index = self.all.len() - self.furthest.get().min(self.all.len());
        self.all.get(index).map_or(self.end, |l| l.token.position)
    }
}

impl<'a> PartialEq for Tokens<'a> {
    fn eq(self: &Self, other: &Self) -> bool {
        self.data.len() == other.data.len()
    }
}

/// Parser output
pub(super) type Output<'a, O> = nom::IResult<Tokens<'a>, O, Failure<'a>>;

/// Parser error
#[derive(Debug)]
pub(super) struct Failure<'a> {
    pub input: Tokens<'a>,
    pub kind: ParseErrorKind,
}
