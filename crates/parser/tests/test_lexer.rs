//! Integration tests for tokenization.

use hal_parser::error::ErrorKind;
use hal_parser::{TokenKind, tokenize};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap_or_else(|err| panic!("unexpected error: {}", err))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_declaration_header() {
    use TokenKind::*;
    assert_eq!(
        kinds("Global Function Integer foo(integer x, VAR string s)"),
        vec![
            Global, Function, Integer, Ident, LeftParen, Integer, Ident, Comma, Var, StringType,
            Ident, RightParen, Eof
        ]
    );
}

#[test]
fn test_all_type_keywords() {
    use TokenKind::*;
    assert_eq!(
        kinds("area boolean integer longint string val ulong64 date time roundmode array record row"),
        vec![
            Area, Boolean, Integer, LongInt, StringType, Val, ULong64, Date, Time, RoundMode,
            Array, Record, Row, Eof
        ]
    );
}

#[test]
fn test_identifiers_containing_keywords() {
    use TokenKind::*;
    assert_eq!(
        kinds("endloop if_ok beginning _end"),
        vec![Ident, Ident, Ident, Ident, Eof]
    );
}

#[test]
fn test_operators() {
    use TokenKind::*;
    assert_eq!(
        kinds("== <> != <= >= + - * / = < > ( ) [ ] . , : ; & !"),
        vec![
            EqualEqual, NotEqual, NotEqual, LessEqual, GreaterEqual, Plus, Minus, Star, Slash,
            Equal, Less, Greater, LeftParen, RightParen, LeftBracket, RightBracket, Dot, Comma,
            Colon, Semicolon, Ampersand, Bang, Eof
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    use TokenKind::*;
    let source = "a // line comment = 1\n/* block\n * comment */ b /**/ c";
    assert_eq!(kinds(source), vec![Ident, Ident, Ident, Eof]);
}

#[test]
fn test_token_text_and_positions() {
    let tokens = tokenize("x = 'a b';\n  y = 3.25;").unwrap();
    let texts: Vec<_> = tokens.iter().map(|t| t.text).collect();
    assert_eq!(texts, vec!["x", "=", "'a b'", ";", "y", "=", "3.25", ";", ""]);

    let y = &tokens[4];
    assert_eq!((y.start.line, y.start.column), (2, 3));
    assert_eq!((y.end.line, y.end.column), (2, 4));
}

#[test]
fn test_unterminated_string_is_invalid() {
    let err = tokenize("s = 'open").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidCharacter { .. }));
    assert_eq!((err.position.line, err.position.column), (1, 5));
}

#[test]
fn test_invalid_character_text_is_bounded() {
    let err = tokenize("x = $abcdefghijklmnopqrstuvwxyz").unwrap_err();
    let ErrorKind::InvalidCharacter { text } = err.kind else {
        panic!("expected an invalid character");
    };
    assert_eq!(text.chars().count(), 20);
    assert!(text.starts_with('$'));
}

#[test]
fn test_eof_position_after_trailing_newline() {
    let tokens = tokenize("a\n").unwrap();
    let eof = tokens.last().unwrap();
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!((eof.start.line, eof.start.column), (2, 1));
}
