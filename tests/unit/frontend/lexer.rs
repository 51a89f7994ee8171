use super::*;

fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src, "l.dc")
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn ident(s: &str) -> TokenKind {
    TokenKind::Ident(s.to_owned())
}

#[test]
fn keywords_punctuation_and_identifiers() {
    assert_eq!(
        kinds("namespace net { int port; };"),
        vec![
            TokenKind::KwNamespace,
            ident("net"),
            TokenKind::LBrace,
            TokenKind::KwInt,
            ident("port"),
            TokenKind::Semi,
            TokenKind::RBrace,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("::a::b.c = x_1;"),
        vec![
            TokenKind::PathSep,
            ident("a"),
            TokenKind::PathSep,
            ident("b"),
            TokenKind::Dot,
            ident("c"),
            TokenKind::Assign,
            ident("x_1"),
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn numbers_keep_their_text() {
    assert_eq!(
        kinds("42 -7 0x1F 0b101 1.5 -0.25 2e3 .5"),
        vec![
            TokenKind::Int("42".into()),
            TokenKind::Int("-7".into()),
            TokenKind::Int("0x1F".into()),
            TokenKind::Int("0b101".into()),
            TokenKind::Float("1.5".into()),
            TokenKind::Float("-0.25".into()),
            TokenKind::Float("2e3".into()),
            TokenKind::Float(".5".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn ranges_split_around_the_dots() {
    assert_eq!(
        kinds("[1..5] [..-1] [0.5..]"),
        vec![
            TokenKind::LBracket,
            TokenKind::Int("1".into()),
            TokenKind::DotDot,
            TokenKind::Int("5".into()),
            TokenKind::RBracket,
            TokenKind::LBracket,
            TokenKind::DotDot,
            TokenKind::Int("-1".into()),
            TokenKind::RBracket,
            TokenKind::LBracket,
            TokenKind::Float("0.5".into()),
            TokenKind::DotDot,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn strings_keep_quotes_and_escapes() {
    assert_eq!(
        kinds(r#""eth0" "a\"b" true false"#),
        vec![
            TokenKind::Str("\"eth0\"".into()),
            TokenKind::Str(r#""a\"b""#.into()),
            TokenKind::True,
            TokenKind::False,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped() {
    assert_eq!(
        kinds("int /* block\n comment */ x; // trailing\n"),
        vec![TokenKind::KwInt, ident("x"), TokenKind::Semi, TokenKind::Eof]
    );
}

#[test]
fn positions_are_one_based() {
    let toks = lex("int x;\n  x = 1;", "p.dc").unwrap();
    assert_eq!(toks[0].pos, SourcePosition::new("p.dc", 1, 1));
    assert_eq!(toks[1].pos, SourcePosition::new("p.dc", 1, 5));
    assert_eq!(toks[3].pos, SourcePosition::new("p.dc", 2, 3));
}

#[test]
fn line_markers_rebase_positions() {
    let src = "int a;\n#line 40 \"board.dc\"\nint b;\n# 7 \"other.dc\" 1 3\n  int c;";
    let toks = lex(src, "gen.dc").unwrap();
    let b = toks.iter().find(|t| t.kind == ident("b")).unwrap();
    assert_eq!(b.pos, SourcePosition::new("board.dc", 40, 5));
    let c = toks.iter().find(|t| t.kind == ident("c")).unwrap();
    assert_eq!(c.pos, SourcePosition::new("other.dc", 7, 7));
}

#[test]
fn line_marker_without_file_keeps_the_file() {
    let toks = lex("#line 10\nint a;", "keep.dc").unwrap();
    assert_eq!(toks[0].pos, SourcePosition::new("keep.dc", 10, 1));
}

#[test]
fn illegal_input_is_a_syntax_error() {
    let err = lex("int x; $", "e.dc").unwrap_err();
    assert_eq!(err.pos, SourcePosition::new("e.dc", 1, 8));
    assert_eq!(err.kind, ErrorKind::syntax("unexpected character '$'"));

    assert!(lex("\"open", "e.dc").is_err());
    assert!(lex("/* open", "e.dc").is_err());
    assert!(lex("#pragma once", "e.dc").is_err());
}
