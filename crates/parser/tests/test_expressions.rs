//! Integration tests for expression parsing and precedence.

use hal_parser::ast::*;
use hal_parser::error::ErrorKind;
use hal_parser::{parse, parse_with_functions};

const HEADER: &str = "external function integer len(string s);
external function string mid(string s, integer start, integer count);
procedure p(integer a, integer b, boolean c, string s, record Order o, array of integer xs)
begin
    integer r;
    boolean t;
    string 40 u;
";

/// Parse `stmt` inside a procedure with some variables in scope and return
/// the value of its final assignment.
fn value_of(stmt: &str) -> Expr {
    let source = format!("{}{}\nend;", HEADER, stmt);
    let output = match parse(&source) {
        Ok(output) => output,
        Err(err) => panic!("unexpected error: {}", err),
    };
    let p = output.program.subprograms().next().unwrap();
    match p.body.stmts.last() {
        Some(Stmt::Assign(assign)) => assign.value.clone(),
        other => panic!("expected an assignment, got {:?}", other),
    }
}

fn parse_err(stmt: &str) -> ErrorKind {
    let source = format!("{}{}\nend;", HEADER, stmt);
    match parse(&source) {
        Ok(_) => panic!("expected an error for:\n{}", stmt),
        Err(err) => err.kind,
    }
}

fn binary(expr: &Expr) -> &BinaryExpr {
    match expr {
        Expr::Binary(b) => b,
        other => panic!("expected a binary expression, got {}", other),
    }
}

// ===== Precedence =====

#[test]
fn test_multiplication_binds_tighter_than_addition() {
    let expr = value_of("r = a + b * 2;");
    let add = binary(&expr);
    assert_eq!(add.op, BinaryOp::Add);
    assert_eq!(binary(&add.right).op, BinaryOp::Mul);
}

#[test]
fn test_binary_operators_are_left_associative() {
    let expr = value_of("r = a - b - 1;");
    let outer = binary(&expr);
    assert_eq!(outer.op, BinaryOp::Sub);
    assert_eq!(binary(&outer.left).op, BinaryOp::Sub);
    assert_eq!(expr.to_string(), "a - b - 1");
}

#[test]
fn test_logical_operator_precedence() {
    let expr = value_of("t = a < b or c and not c;");
    let or = binary(&expr);
    assert_eq!(or.op, BinaryOp::Or);
    assert_eq!(binary(&or.left).op, BinaryOp::Lt);
    let and = binary(&or.right);
    assert_eq!(and.op, BinaryOp::And);
    assert!(matches!(&*and.right, Expr::Unary(u) if u.op == UnaryOp::Not));
}

#[test]
fn test_concatenation_shares_additive_level() {
    let expr = value_of("u = s & 'x' & s;");
    let outer = binary(&expr);
    assert_eq!(outer.op, BinaryOp::Concat);
    assert_eq!(binary(&outer.left).op, BinaryOp::Concat);
}

#[test]
fn test_comparison_operators() {
    for (source, op) in [
        ("t = a == b;", BinaryOp::Eq),
        ("t = a <> b;", BinaryOp::NotEq),
        ("t = a != b;", BinaryOp::NotEq),
        ("t = a <= b;", BinaryOp::LtE),
        ("t = a >= b;", BinaryOp::GtE),
        ("t = a > b;", BinaryOp::Gt),
    ] {
        assert_eq!(binary(&value_of(source)).op, op, "{}", source);
    }
}

#[test]
fn test_parentheses_are_kept() {
    let expr = value_of("r = (a + b) * 2;");
    let mul = binary(&expr);
    assert!(matches!(&*mul.left, Expr::Paren(_)));
    assert_eq!(expr.to_string(), "(a + b) * 2");
}

#[test]
fn test_unary_operators_nest() {
    let expr = value_of("r = - -a;");
    let Expr::Unary(outer) = &expr else {
        panic!("expected a unary expression");
    };
    assert_eq!(outer.op, UnaryOp::Minus);
    assert!(matches!(&*outer.operand, Expr::Unary(_)));
}

#[test]
fn test_bang_is_not() {
    let expr = value_of("t = !c;");
    assert!(matches!(expr, Expr::Unary(u) if u.op == UnaryOp::Not));
}

// ===== Primaries =====

#[test]
fn test_literals() {
    assert!(matches!(value_of("r = 42;"), Expr::Number(n) if n.text == "42" && n.is_integer()));
    assert!(matches!(value_of("r = 4.5;"), Expr::Number(n) if !n.is_integer()));
    assert!(matches!(value_of("u = 'it''s';"), Expr::String(s) if s.value == "it's"));
    assert!(matches!(value_of("u = \"dq\";"), Expr::String(s) if s.value == "dq"));
    assert!(matches!(value_of("t = TRUE;"), Expr::Boolean(b) if b.value));
}

#[test]
fn test_member_and_index_chains() {
    let expr = value_of("r = o.lines[a + 1].qty;");
    let Expr::Member(qty) = &expr else {
        panic!("expected a member access");
    };
    assert_eq!(qty.field, "qty");
    let Expr::Index(index) = &*qty.object else {
        panic!("expected an index");
    };
    assert!(matches!(&*index.array, Expr::Member(m) if m.field == "lines"));
    assert_eq!(expr.to_string(), "o.lines[a + 1].qty");
}

#[test]
fn test_calls_keep_callee_spelling() {
    let expr = value_of("r = LEN(mid(s, 1, a));");
    let Expr::Call(call) = &expr else {
        panic!("expected a call");
    };
    assert_eq!(call.callee, "LEN");
    assert!(matches!(&call.args[0], Expr::Call(inner) if inner.args.len() == 3));
}

#[test]
fn test_call_arity_is_checked() {
    let kind = parse_err("r = mid(s, 1);");
    assert_eq!(
        kind,
        ErrorKind::ArityMismatch {
            name: "mid".to_string(),
            expected: 3,
            found: 2,
        }
    );
}

#[test]
fn test_nested_call_arity_is_checked() {
    let kind = parse_err("r = len(mid(s));");
    assert!(matches!(kind, ErrorKind::ArityMismatch { expected: 3, found: 1, .. }));
}

#[test]
fn test_call_of_undeclared_function() {
    let kind = parse_err("r = size(s);");
    assert!(matches!(kind, ErrorKind::UndeclaredFunction { ref name } if name == "size"));
}

#[test]
fn test_spans_cover_source_text() {
    let source = format!("{}r = a * (b + 1);\nend;", HEADER);
    let output = parse_with_functions(&source, Default::default()).unwrap();
    let p = output.program.subprograms().next().unwrap();
    let Some(Stmt::Assign(assign)) = p.body.stmts.last() else {
        panic!("expected an assignment");
    };
    let span = assign.value.span();
    assert_eq!(&source[span], "a * (b + 1)");
}

#[test]
fn test_missing_operand() {
    let kind = parse_err("r = a + ;");
    assert!(matches!(kind, ErrorKind::ExpectedExpression { .. }));
}
