//! Integration tests for error codes, positions and rendered diagnostics.

use hal_parser::error::{DiagnosticFormatter, Error, ErrorCode, ErrorConfig, ErrorKind};
use hal_parser::parse;

fn parse_error(source: &str) -> Box<Error> {
    match parse(source) {
        Ok(_) => panic!("expected an error for:\n{}", source),
        Err(err) => err,
    }
}

fn assert_error_at(source: &str, code: ErrorCode, line: u32, column: u32) {
    let err = parse_error(source);
    assert_eq!(err.code(), code, "wrong code for {}", err);
    assert_eq!(
        (err.position.line, err.position.column),
        (line, column),
        "wrong position for {}",
        err
    );
}

// ===== Codes and positions =====

#[test]
fn test_invalid_character() {
    assert_error_at("procedure p\nbegin\n  x = #;\nend;", ErrorCode::E1001, 3, 7);
}

#[test]
fn test_unexpected_token() {
    assert_error_at("procedure p(integer a begin end;", ErrorCode::E2001, 1, 23);
}

#[test]
fn test_expected_expression() {
    let err = parse_error("procedure p(integer a)\nbegin\n  a = * 2;\nend;");
    assert_eq!(err.code(), ErrorCode::E2002);
    assert_eq!(
        err.kind,
        ErrorKind::ExpectedExpression {
            found: "'*'".to_string()
        }
    );
}

#[test]
fn test_undeclared_variable_position() {
    assert_error_at(
        "procedure p\nbegin\n    integer x;\n    x = y + 1;\nend;",
        ErrorCode::E4001,
        4,
        9,
    );
}

#[test]
fn test_undefined_label_points_at_goto_target() {
    assert_error_at(
        "procedure p\nbegin\n  goto missing;\nend;",
        ErrorCode::E4002,
        3,
        8,
    );
}

#[test]
fn test_arity_mismatch_points_at_callee() {
    assert_error_at(
        "external function integer f(integer a, integer b);\nprocedure p\nbegin\n  f(1);\nend;",
        ErrorCode::E5001,
        4,
        3,
    );
}

#[test]
fn test_duplicate_declaration_points_at_second_name() {
    assert_error_at(
        "procedure p\nbegin\n  integer a, a;\nend;",
        ErrorCode::E3001,
        3,
        14,
    );
}

#[test]
fn test_declaration_error_codes() {
    let cases = [
        ("procedure p begin end;", ErrorCode::E3005),
        ("external global procedure p;", ErrorCode::E3003),
        ("external procedure p begin return; end;", ErrorCode::E3004),
        ("procedure p(integer) begin return; end;", ErrorCode::E3006),
        ("procedure p begin string s; end;", ErrorCode::E3007),
        ("procedure p begin l: l: return; end;", ErrorCode::E3008),
        ("procedure p begin if true then begin l: return; end end;", ErrorCode::E3009),
        ("procedure p begin return; end; procedure P begin return; end;", ErrorCode::E3002),
        ("procedure p begin q(); end;", ErrorCode::E5002),
        ("procedure p begin return 1; end;", ErrorCode::E2003),
    ];
    for (source, code) in cases {
        assert_eq!(parse_error(source).code(), code, "source: {}", source);
    }
}

// ===== Messages =====

#[test]
fn test_display_includes_code_message_and_position() {
    let err = parse_error("procedure p\nbegin\n    integer x;\n    x = y + 1;\nend;");
    assert_eq!(
        err.to_string(),
        "E4001: Undeclared variable 'y' at line 4, column 9"
    );
    assert_eq!(err.error_type(), "ReferenceError");
    assert_eq!(err.category(), "Reference");
}

#[test]
fn test_arity_message_pluralizes() {
    let err = parse_error("external procedure f(integer a);\nprocedure p begin f(); end;");
    assert_eq!(err.message(), "'f' expects 1 argument, got 0");
}

#[test]
fn test_rendered_diagnostic() {
    let source = "procedure p\nbegin\n    x = 1;\nend;";
    let err = parse_error(source);
    let diagnostic = err.to_diagnostic(source).with_filename("demo.hal".to_string());
    let formatter = DiagnosticFormatter::new(ErrorConfig::default().without_colors());
    let rendered = formatter.format(&diagnostic);

    assert!(rendered.contains("ReferenceError"), "{}", rendered);
    assert!(rendered.contains("[E4001]"), "{}", rendered);
    assert!(rendered.contains("Undeclared variable 'x'"), "{}", rendered);
    assert!(rendered.contains("demo.hal:3:5"), "{}", rendered);
    assert!(rendered.contains("    x = 1;"), "{}", rendered);
    assert!(rendered.contains('^'), "{}", rendered);
}
