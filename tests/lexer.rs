mod util;
use util::*;
use pretty_assertions::assert_eq;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).unwrap().into_iter().map(|t| t.kind).collect()
}

#[test]
fn arrow_is_single_token() {
    assert_eq!(kinds("func (nat) -> (text)"), vec![
        TokenKind::Keyword(Keyword::Func),
        TokenKind::Punct(Punct::LParen),
        TokenKind::Primitive(ast::Primitive::Nat),
        TokenKind::Punct(Punct::RParen),
        TokenKind::Punct(Punct::Arrow),
        TokenKind::Punct(Punct::LParen),
        TokenKind::Primitive(ast::Primitive::Text),
        TokenKind::Punct(Punct::RParen),
    ]);
}

#[test]
fn arrow_without_whitespace() {
    assert_eq!(kinds("()->()"), vec![
        TokenKind::Punct(Punct::LParen),
        TokenKind::Punct(Punct::RParen),
        TokenKind::Punct(Punct::Arrow),
        TokenKind::Punct(Punct::LParen),
        TokenKind::Punct(Punct::RParen),
    ]);
}

#[test]
fn keywords_primitives_identifiers() {
    assert_eq!(kinds("type nat8 principal query Profile _x blob"), vec![
        TokenKind::Keyword(Keyword::Type),
        TokenKind::Primitive(ast::Primitive::Nat8),
        TokenKind::Primitive(ast::Primitive::Principal),
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Identifier,
        TokenKind::Keyword(Keyword::Blob),
    ]);
}

#[test]
fn identifier_with_keyword_prefix() {
    let tokens = lex("types vector natural").unwrap();
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn comments_are_tokens() {
    let tokens = lex("// line\n/* block */ foo").unwrap();
    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].kind, TokenKind::LineComment);
    assert_eq!(tokens[0].text, "// line");
    assert_eq!(tokens[0].comment_text(), Some("line"));
    assert_eq!(tokens[1].kind, TokenKind::BlockComment);
    assert_eq!(tokens[1].comment_text(), Some("block"));
    assert_eq!(tokens[2].kind, TokenKind::Identifier);
}

#[test]
fn unterminated_line_comment() {
    assert_eq!(kinds("//"), vec![ TokenKind::LineComment ]);
}

#[test]
fn multi_line_block_comment() {
    let tokens = lex("/*
        doc
    */ type").unwrap();
    assert_eq!(tokens[0].comment_text(), Some("doc"));
    assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Type));
}

#[test]
fn string_escapes() {
    let tokens = lex(r#""a\n\u{41}\42\"""#).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Text("a\nAB\"".to_string()));
}

#[test]
fn empty_string() {
    assert_eq!(kinds(r#""""#), vec![ TokenKind::Text(String::new()) ]);
}

#[test]
fn natural_literals() {
    let values: Vec<_> = lex("0x1F 1_000 42").unwrap().iter().map(|t| t.natural_value()).collect();
    assert_eq!(values, vec![ Some(31), Some(1000), Some(42) ]);
}

#[test]
fn token_positions() {
    let tokens = lex("type A =\n  nat;").unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| t.position.0).collect();
    assert_eq!(positions, vec![ 0, 5, 7, 11, 14 ]);
    assert_eq!(tokens[3].position.loc("type A =\n  nat;"), (2, 3));
}

#[test]
fn unexpected_character() {
    let src = "type A = nat;\n$";
    let error = lex(src).unwrap_err();
    assert_eq!(error.kind(), &LexErrorKind::UnexpectedCharacter('$'));
    assert_eq!(error.loc(src), (2, 1));
}

#[test]
fn lone_minus_is_not_an_arrow() {
    let error = lex("(nat) - (nat)").unwrap_err();
    assert_eq!(error.kind(), &LexErrorKind::UnexpectedCharacter('-'));
    assert_eq!(error.position(), Position(6));
}

#[test]
fn unterminated_string() {
    let error = lex("import \"base.did").unwrap_err();
    assert_eq!(error.kind(), &LexErrorKind::UnterminatedString);
    assert_eq!(error.position(), Position(7));
}

#[test]
fn unterminated_block_comment() {
    let error = lex("type /* A = nat;").unwrap_err();
    assert_eq!(error.kind(), &LexErrorKind::UnterminatedComment);
}

#[test]
fn invalid_escape() {
    let error = lex(r#""\q""#).unwrap_err();
    assert_eq!(error.kind(), &LexErrorKind::InvalidEscape);
}

#[test]
fn lex_error_surfaces_through_parse() {
    let error = parse("type A = nat; #").unwrap_err();
    assert!(matches!(error, Error::Lex(_)));
    assert!(error.is_malformed());
}
