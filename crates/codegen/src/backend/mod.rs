//! Target language backends.
//!
//! The shared emitter in [`crate::emit`] walks the optimized program and
//! asks a [`Backend`] for every piece of target syntax: literals, operators,
//! declarations, block delimiters and the dispatch loop that replaces
//! gotos. A backend never sees HAL statements directly.

pub mod js;
pub mod python;
pub mod rust;

use crate::emit::{Rendered, Writer, prec};
use crate::options::Target;
use hal_parser::ast::{BinaryOp, Param, TypeRef, UnaryOp};

pub use js::JsBackend;
pub use python::PythonBackend;
pub use rust::RustBackend;

/// A subprogram signature with target-side parameter names.
#[derive(Debug, Clone)]
pub struct Header<'a> {
    pub name: String,
    pub params: Vec<HeaderParam<'a>>,
    /// Present for functions.
    pub return_type: Option<&'a TypeRef>,
    pub is_global: bool,
}

#[derive(Debug, Clone)]
pub struct HeaderParam<'a> {
    pub name: String,
    pub ty: &'a TypeRef,
    pub by_ref: bool,
}

/// Facts about the whole program a prelude may depend on.
#[derive(Debug, Clone, Default)]
pub struct PreludeInfo {
    /// Externals known to the compile but not declared in this program.
    pub builtins: Vec<String>,
    pub uses_records: bool,
}

/// A goto, as seen from where it is emitted.
#[derive(Debug, Clone, Copy)]
pub struct JumpSite<'a> {
    pub pc: &'a str,
    pub target: usize,
    /// Number of `while`/`for` loops between the goto and the dispatch loop.
    pub loop_depth: usize,
    pub flag: &'a str,
}

/// How a switch statement is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchStyle {
    /// The target's own multi-way branch.
    Native,
    /// A chain of equality tests.
    IfChain,
}

/// Target syntax used by the shared emitter.
pub trait Backend {
    fn target(&self) -> Target;

    fn file_extension(&self) -> &'static str;

    /// Words that cannot be used as identifiers in generated code.
    fn reserved_words(&self) -> &'static [&'static str];

    fn comment(&self, text: &str) -> String;

    /// Lines written before the first item.
    fn prelude(&self, _info: &PreludeInfo) -> Vec<String> {
        Vec::new()
    }

    /// Rendering of an external declaration.
    fn external(&self, name: &str, returns_value: bool) -> String {
        let kind = if returns_value { "function" } else { "procedure" };
        self.comment(&format!("external {} {}", kind, name))
    }

    // ===== Expressions =====

    fn boolean(&self, value: bool) -> &'static str;

    fn string(&self, value: &str) -> Rendered {
        Rendered::atom(double_quoted(value))
    }

    fn binary_op(&self, op: BinaryOp) -> &'static str;

    fn unary_op(&self, op: UnaryOp) -> &'static str;

    fn unary_prec(&self, _op: UnaryOp) -> u8 {
        prec::UNARY
    }

    /// String concatenation, when it is not an infix operator.
    fn concat(&self, _left: &Rendered, _right: &Rendered) -> Option<Rendered> {
        None
    }

    fn member(&self, object: &Rendered, field: &str) -> Rendered {
        Rendered::atom(format!("{}.{}", object.wrapped(), field))
    }

    fn index(&self, array: &Rendered, index: &Rendered) -> Rendered {
        Rendered::atom(format!("{}[{}]", array.wrapped(), index.text))
    }

    /// Inline form of a well-known external, keyed by lowercase name.
    fn builtin(&self, _name: &str, _args: &[Rendered]) -> Option<Rendered> {
        None
    }

    /// One argument of a call to a declared subprogram.
    fn argument(&self, arg: Rendered, _param: Option<&Param>) -> String {
        arg.text
    }

    /// Right-hand side of an assignment from a place of type `ty`.
    fn copied(&self, value: Rendered, _ty: Option<&TypeRef>) -> String {
        value.text
    }

    // ===== Declarations =====

    /// Target spelling of a HAL type.
    fn type_name(&self, ty: &TypeRef) -> String;

    /// Default value of a freshly declared variable.
    fn default_value(&self, ty: &TypeRef) -> String;

    fn subprogram_header(&self, header: &Header<'_>) -> String;

    /// Declaration of a local with its type's default value.
    fn declare(&self, name: &str, ty: &TypeRef) -> String;

    /// Declaration of the dispatch index, starting at block 0.
    fn declare_index(&self, name: &str) -> String {
        self.declare(name, &TypeRef::INTEGER)
    }

    /// Declaration of the nested-loop jump flag, if the target needs one.
    fn declare_flag(&self, _name: &str) -> Option<String> {
        None
    }

    // ===== Statements =====

    fn statement(&self, text: &str) -> String;

    fn assign(&self, target: &str, value: &str) -> String {
        self.statement(&format!("{} = {}", target, value))
    }

    fn return_stmt(&self, value: Option<&str>) -> String {
        match value {
            Some(value) => self.statement(&format!("return {}", value)),
            None => self.statement("return"),
        }
    }

    /// The final return of a function, after the dispatch loop.
    fn tail_return(&self, value: &str) -> String {
        self.return_stmt(Some(value))
    }

    fn open(&self, w: &mut Writer, header: &str);

    fn close(&self, w: &mut Writer);

    fn open_else(&self, w: &mut Writer);

    fn open_else_if(&self, w: &mut Writer, condition: &str);

    fn if_header(&self, condition: &str) -> String;

    fn while_header(&self, condition: &str) -> String;

    /// A native counted loop header, or `None` to lower `for` to `while`.
    fn for_header(&self, _init: &str, _condition: &str, _update: &str) -> Option<String> {
        None
    }

    // ===== Switch =====

    /// `literal_cases` is true when every case value is an integer or
    /// boolean literal.
    fn switch_style(&self, literal_cases: bool) -> SwitchStyle;

    /// Test for one case of an [`SwitchStyle::IfChain`] switch.
    fn case_condition(&self, discriminant: &Rendered, values: &[Rendered]) -> String {
        let or = format!(" {} ", self.binary_op(BinaryOp::Or));
        values
            .iter()
            .map(|value| {
                format!(
                    "{} {} {}",
                    discriminant.at_least(prec::CMP + 1),
                    self.binary_op(BinaryOp::Eq),
                    value.at_least(prec::CMP + 1)
                )
            })
            .collect::<Vec<_>>()
            .join(&or)
    }

    fn open_switch(&self, _w: &mut Writer, _discriminant: &Rendered) {}

    fn open_case(&self, _w: &mut Writer, _values: &[Rendered]) {}

    fn open_default(&self, _w: &mut Writer) {}

    fn close_case(&self, w: &mut Writer) {
        self.close(w);
    }

    fn close_switch(&self, _w: &mut Writer, _has_default: bool) {}

    // ===== Dispatch loop =====

    fn open_dispatch(&self, w: &mut Writer, pc: &str);

    fn open_arm(&self, w: &mut Writer, pc: &str, index: usize);

    fn close_arm(&self, w: &mut Writer);

    /// Arm taken when the index is past the last block. `only` is set when
    /// there are no other arms.
    fn default_arm(&self, w: &mut Writer, pc: &str, only: bool);

    fn close_dispatch(&self, w: &mut Writer);

    fn jump(&self, w: &mut Writer, site: JumpSite<'_>);

    /// Leave the dispatch loop from an arm.
    fn leave_dispatch(&self, w: &mut Writer);

    /// Code after a loop whose body contains a goto, at `loop_depth` loops
    /// below the dispatch loop.
    fn after_loop(&self, _w: &mut Writer, _flag: &str, _loop_depth: usize) {}
}

/// The backend for `target`.
pub fn backend_for(target: Target) -> Box<dyn Backend> {
    match target {
        Target::JavaScript => Box::new(JsBackend),
        Target::Python => Box::new(PythonBackend),
        Target::Rust => Box::new(RustBackend),
    }
}

/// `value` as a double-quoted literal.
///
/// Backslash escapes in the HAL text are kept as written. Quotes and raw
/// control characters are escaped.
pub fn double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push_str("\\\\"),
            },
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Write `{`-delimited block syntax shared by the brace targets.
pub(crate) mod braces {
    use crate::emit::Writer;

    pub fn open(w: &mut Writer, header: &str) {
        w.line(format!("{} {{", header));
        w.indent();
    }

    pub fn close(w: &mut Writer) {
        w.dedent();
        w.line("}");
    }

    pub fn open_else(w: &mut Writer) {
        w.dedent();
        w.line("} else {");
        w.indent();
    }

    pub fn open_else_if(w: &mut Writer, header: &str) {
        w.dedent();
        w.line(format!("}} else {} {{", header));
        w.indent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_quoted_escapes_quotes() {
        assert_eq!(double_quoted("say \"hi\""), r#""say \"hi\"""#);
        assert_eq!(double_quoted("it's"), r#""it's""#);
    }

    #[test]
    fn test_double_quoted_keeps_backslash_escapes() {
        assert_eq!(double_quoted(r"a\nb"), r#""a\nb""#);
        assert_eq!(double_quoted(r"a\'b"), r#""a\'b""#);
        assert_eq!(double_quoted("end\\"), r#""end\\""#);
    }

    #[test]
    fn test_double_quoted_escapes_control_characters() {
        assert_eq!(double_quoted("a\tb\n"), r#""a\tb\n""#);
    }

    #[test]
    fn test_backend_for_every_target() {
        for target in Target::ALL {
            let backend = backend_for(target);
            assert_eq!(backend.target(), target);
            assert!(!backend.file_extension().is_empty());
        }
    }
}
