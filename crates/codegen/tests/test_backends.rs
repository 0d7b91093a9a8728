//! Backend Output Tests
//!
//! End-to-end rendering of small programs in every target language.

use hal_codegen::{CompileOptions, Target, compile_program};
use hal_parser::{parse, parse_with_functions};

const FOO: &str = "function integer foo(integer x, integer y)
begin
    integer z;
    z = x + y;
    return z;
end;";

const PRIMITIVES: &str = "external function integer len(string s);
external function string mid(string s, integer start, integer count);
external procedure logtext(integer indent, string text);";

fn compile(source: &str, target: Target) -> String {
    let output = parse(source).unwrap_or_else(|err| panic!("parse failed: {}", err));
    compile_program(&output.program, &output.functions, &CompileOptions::new(target))
        .unwrap_or_else(|err| panic!("codegen failed: {}", err))
}

fn compile_with_primitives(source: &str, target: Target) -> String {
    let builtins = parse(PRIMITIVES).unwrap().functions;
    let output = parse_with_functions(source, builtins)
        .unwrap_or_else(|err| panic!("parse failed: {}", err));
    compile_program(&output.program, &output.functions, &CompileOptions::new(target)).unwrap()
}

// ===== The foo example =====

#[test]
fn test_foo_javascript() {
    assert_eq!(
        compile(FOO, Target::JavaScript),
        "function foo(x, y) {
    let foo_result = 0;
    let z = 0;
    let pc = 0;
    pc_loop: while (true) {
        switch (pc) {
            case 0: {
                z = x + y;
                return z;
            }
            default:
                break pc_loop;
        }
    }
    return foo_result;
}
"
    );
}

#[test]
fn test_foo_python() {
    assert_eq!(
        compile(FOO, Target::Python),
        "def foo(x: int, y: int) -> int:
    foo_result = 0
    z = 0
    pc = 0
    while True:
        if pc == 0:
            z = x + y
            return z
        else:
            break
    return foo_result
"
    );
}

#[test]
fn test_foo_rust() {
    assert_eq!(
        compile(FOO, Target::Rust),
        "#[allow(dead_code)]
mod hal {
    pub type Area = i32;
    pub type Date = i64;
    pub type Time = i64;
    pub type RoundMode = i32;
}

fn foo(mut x: i32, mut y: i32) -> i32 {
    let mut foo_result: i32 = 0;
    let mut z: i32 = 0;
    let mut pc: usize = 0;
    'dispatch: loop {
        match pc {
            0 => {
                z = x + y;
                return z;
            }
            _ => break 'dispatch,
        }
    }
    foo_result
}
"
    );
}

// ===== Subprogram shapes =====

#[test]
fn test_procedure_falls_out_of_the_loop() {
    let js = compile(
        "procedure p(integer n) begin n = n + 1; end;",
        Target::JavaScript,
    );
    assert!(js.contains("case 0: {\n                n = n + 1;\n                break pc_loop;\n"), "{}", js);
    assert!(!js.contains("return"), "{}", js);
}

#[test]
fn test_empty_dispatch_has_only_default_arm() {
    let source = "function integer f begin f = 1; end;";
    let output = parse(source).unwrap();
    let mut program = output.program.clone();
    if let Some(sub) = program.items[0].as_subprogram_mut() {
        sub.body.stmts.clear();
    }
    let py = compile_program(&program, &output.functions, &CompileOptions::new(Target::Python))
        .unwrap();
    assert_eq!(
        py,
        "def f() -> int:
    f_result = 0
    pc = 0
    while True:
        break
    return f_result
"
    );
}

#[test]
fn test_global_is_public_in_rust_only() {
    let source = "global procedure run begin return; end;";
    assert!(compile(source, Target::Rust).contains("pub fn run() {"));
    assert!(compile(source, Target::JavaScript).contains("function run() {"));
    assert!(compile(source, Target::Python).contains("def run():"));
}

#[test]
fn test_bare_return_in_function_returns_accumulator() {
    let source = "function integer f(integer a) begin f = a * 2; return; end;";
    assert!(compile(source, Target::JavaScript).contains("f_result = a * 2;\n                return f_result;"));
    assert!(compile(source, Target::Rust).contains("return f_result;"));
}

#[test]
fn test_recursive_call_uses_function_name() {
    let source = "function integer fact(integer n)
begin
    if n <= 1 then return 1;
    fact = n * fact(n - 1);
end;";
    let py = compile(source, Target::Python);
    assert!(py.contains("fact_result = n * fact(n - 1)"), "{}", py);
    assert!(py.contains("return fact_result"), "{}", py);
}

#[test]
fn test_callee_uses_declared_spelling() {
    let source = "function integer Twice(integer n) begin return n * 2; end;
procedure p(integer a) begin a = TWICE(a); end;";
    assert!(compile(source, Target::JavaScript).contains("a = Twice(a);"));
}

// ===== Declarations and names =====

#[test]
fn test_default_values_per_target() {
    let source = "procedure p
begin
    boolean ok;
    string 10 s;
    val v;
    array of integer xs;
    record Order o;
    return;
end;";
    let js = compile(source, Target::JavaScript);
    for line in ["let ok = false;", "let s = \"\";", "let v = 0;", "let xs = [];", "let o = {};"] {
        assert!(js.contains(line), "missing {} in\n{}", line, js);
    }

    let py = compile(source, Target::Python);
    assert!(py.starts_with("from types import SimpleNamespace\n\n"), "{}", py);
    for line in ["ok = False", "s = \"\"", "v = 0.0", "xs = []", "o = SimpleNamespace()"] {
        assert!(py.contains(line), "missing {} in\n{}", line, py);
    }

    let rs = compile(source, Target::Rust);
    for line in [
        "let mut ok: bool = false;",
        "let mut s: String = String::new();",
        "let mut v: f64 = 0.0;",
        "let mut xs: Vec<i32> = Vec::new();",
        "let mut o: Order = Default::default();",
    ] {
        assert!(rs.contains(line), "missing {} in\n{}", line, rs);
    }
}

#[test]
fn test_shadowed_variable_is_renamed() {
    let source = "procedure p(integer a)
begin
    integer x;
    x = a;
    if a > 0 then
    begin
        integer x;
        x = 2;
    end
    a = x;
end;";
    let js = compile(source, Target::JavaScript);
    assert!(js.contains("let x_1 = 0;"), "{}", js);
    assert!(js.contains("x_1 = 2;"), "{}", js);
    assert!(js.contains("a = x;"), "{}", js);
}

const USE_BEFORE_SHADOW: &str = "function integer f(integer a)
begin
    integer x;
    if a > 0 then
    begin
        x = 1;
        integer x;
        x = 2;
    end
    return x;
end;";

#[test]
fn test_outer_variable_used_before_inner_declaration() {
    let py = compile(USE_BEFORE_SHADOW, Target::Python);
    assert!(
        py.contains(
            "            if a > 0:
                x = 1
                x_1 = 0
                x_1 = 2
            return x
"
        ),
        "{}",
        py
    );

    let js = compile(USE_BEFORE_SHADOW, Target::JavaScript);
    assert!(
        js.contains("x = 1;\n                    let x_1 = 0;\n                    x_1 = 2;"),
        "{}",
        js
    );
    assert!(js.contains("return x;"), "{}", js);

    let rs = compile(USE_BEFORE_SHADOW, Target::Rust);
    assert!(
        rs.contains("x = 1;\n                    let mut x_1: i32 = 0;\n                    x_1 = 2;"),
        "{}",
        rs
    );
}

#[test]
fn test_reserved_word_variable_is_escaped() {
    let source = "procedure p(integer from) begin integer loop; loop = from; end;";
    let py = compile(source, Target::Python);
    assert!(py.contains("def p(from_: int):"), "{}", py);
    assert!(py.contains("loop = from_"), "{}", py);
    let rs = compile(source, Target::Rust);
    assert!(rs.contains("loop_ = from;"), "{}", rs);
}

#[test]
fn test_external_declarations_are_comments() {
    let source = "external function integer width(string s);
procedure p begin return; end;";
    assert!(compile(source, Target::JavaScript).starts_with("// external function width\n\nfunction p()"));
    assert!(compile(source, Target::Python).starts_with("# external function width\n\ndef p():"));
}

// ===== Expressions =====

#[test]
fn test_operator_spelling() {
    let source = "procedure p(integer a, boolean b, string s)
begin
    b = a <> 1 and not b or a == 2;
    s = s & 'x';
end;";
    let js = compile(source, Target::JavaScript);
    assert!(js.contains("b = a != 1 && !b || a == 2;"), "{}", js);
    assert!(js.contains("s = s + \"x\";"), "{}", js);

    let py = compile(source, Target::Python);
    assert!(py.contains("b = a != 1 and not b or a == 2"), "{}", py);

    let rs = compile(source, Target::Rust);
    assert!(rs.contains("b = a != 1 && !b || a == 2;"), "{}", rs);
    assert!(rs.contains("s = format!(\"{}{}\", s, String::from(\"x\"));"), "{}", rs);
}

#[test]
fn test_parentheses_are_preserved() {
    let source = "procedure p(integer a, integer b) begin a = (a + b) * -(b - 1); end;";
    assert!(compile(source, Target::Python).contains("a = (a + b) * -(b - 1)"));
}

#[test]
fn test_not_over_comparison_in_python() {
    let source = "procedure p(integer a, boolean b) begin b = !(a > 1) == b; end;";
    let py = compile(source, Target::Python);
    assert!(py.contains("b = (not (a > 1)) == b"), "{}", py);
}

#[test]
fn test_builtins_are_inlined() {
    let source = "procedure p(string s, integer n)
begin
    n = len(s);
    s = mid(s, n, 2);
    logtext(2, s);
end;";
    let js = compile_with_primitives(source, Target::JavaScript);
    assert!(js.contains("n = s.length;"), "{}", js);
    assert!(js.contains("s = s.substring(n, n + 2);"), "{}", js);
    assert!(js.contains("logtext(2, s);"), "{}", js);

    let py = compile_with_primitives(source, Target::Python);
    assert!(py.starts_with("# external declarations: len, mid, logtext\n"), "{}", py);
    assert!(py.contains("n = len(s)"), "{}", py);
    assert!(py.contains("s = s[n:n + 2]"), "{}", py);
    assert!(py.contains("print(\" \" * 2 + s)"), "{}", py);

    let rs = compile_with_primitives(source, Target::Rust);
    assert!(rs.contains("n = (s.len() as i32);"), "{}", rs);
    assert!(
        rs.contains("s = s.chars().skip(n as usize).take(2 as usize).collect::<String>();"),
        "{}",
        rs
    );
}

#[test]
fn test_member_and_index_access() {
    let source = "procedure p(record Order o, array of integer xs, integer i)
begin
    xs[i + 1] = o.qty;
end;";
    assert!(compile(source, Target::JavaScript).contains("xs[i + 1] = o.qty;"));
    let rs = compile(source, Target::Rust);
    assert!(rs.contains("xs[(i + 1) as usize] = o.qty.clone();"), "{}", rs);
}

// ===== Control flow =====

#[test]
fn test_if_else_and_while() {
    let source = "procedure p(integer n)
begin
    while n > 0
    begin
        if n == 3 then n = 0; else n = n - 1;
    end
end;";
    let py = compile(source, Target::Python);
    assert!(
        py.contains(
            "            while n > 0:
                if n == 3:
                    n = 0
                else:
                    n = n - 1
"
        ),
        "{}",
        py
    );
    let js = compile(source, Target::JavaScript);
    assert!(js.contains("while (n > 0) {"), "{}", js);
    assert!(js.contains("} else {"), "{}", js);
}

#[test]
fn test_for_loop() {
    let source = "procedure p(integer n)
begin
    integer i;
    for (i = 0; i < n; i = i + 1) n = n - i;
end;";
    let js = compile(source, Target::JavaScript);
    assert!(js.contains("for (i = 0; i < n; i = i + 1) {"), "{}", js);

    let py = compile(source, Target::Python);
    assert!(
        py.contains(
            "            i = 0
            while i < n:
                n = n - i
                i = i + 1
"
        ),
        "{}",
        py
    );
}

#[test]
fn test_switch_rendering() {
    let source = "procedure p(integer n)
begin
    switch n
    case 1, 2: n = 10;
    case 3: n = 20;
    otherwise n = 0;
    end
end;";
    let js = compile(source, Target::JavaScript);
    assert!(js.contains("switch (n) {\n"), "{}", js);
    assert!(js.contains("case 1:\n                    case 2: {\n"), "{}", js);
    assert!(js.contains("default: {\n                        n = 0;\n                        break;\n"), "{}", js);

    let py = compile(source, Target::Python);
    assert!(py.contains("if n in (1, 2):"), "{}", py);
    assert!(py.contains("elif n == 3:"), "{}", py);

    let rs = compile(source, Target::Rust);
    assert!(rs.contains("match n {"), "{}", rs);
    assert!(rs.contains("1 | 2 => {"), "{}", rs);
    assert!(rs.contains("_ => {\n                        n = 0;"), "{}", rs);
}

#[test]
fn test_string_switch_is_an_if_chain_in_rust() {
    let source = "procedure p(string s, integer n)
begin
    switch s
    case 'a': n = 1;
    end
end;";
    let rs = compile(source, Target::Rust);
    assert!(rs.contains("if s == String::from(\"a\") {"), "{}", rs);
    assert!(!rs.contains("match s"), "{}", rs);
}
