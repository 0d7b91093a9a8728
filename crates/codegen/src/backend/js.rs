//! JavaScript backend

use super::{Backend, Header, JumpSite, SwitchStyle, braces};
use crate::emit::{Rendered, Writer, prec};
use crate::options::Target;
use hal_parser::ast::{BinaryOp, ScalarType, TypeRef, UnaryOp};

const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "Infinity", "instanceof", "interface",
    "let", "NaN", "new", "null", "package", "private", "protected", "public", "return", "static",
    "super", "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void",
    "while", "with", "yield",
];

/// Label of the dispatch loop.
const LOOP_LABEL: &str = "pc_loop";

/// Plain ES2015 functions with `let` bindings.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsBackend;

impl Backend for JsBackend {
    fn target(&self) -> Target {
        Target::JavaScript
    }

    fn file_extension(&self) -> &'static str {
        "js"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}", text)
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn binary_op(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::NotEq => "!=",
            BinaryOp::Concat => "+",
            other => other.as_str(),
        }
    }

    fn unary_op(&self, op: UnaryOp) -> &'static str {
        match op {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }

    fn builtin(&self, name: &str, args: &[Rendered]) -> Option<Rendered> {
        match (name, args) {
            ("len", [s]) => Some(Rendered::atom(format!("{}.length", s.wrapped()))),
            ("mid", [s, start, count]) => Some(Rendered::atom(format!(
                "{}.substring({}, {} + {})",
                s.wrapped(),
                start.text,
                start.at_least(prec::ADD),
                count.at_least(prec::ADD + 1)
            ))),
            _ => None,
        }
    }

    fn type_name(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(ScalarType::Boolean) => "boolean".to_string(),
            TypeRef::Scalar(_) => "number".to_string(),
            TypeRef::String(_) => "string".to_string(),
            TypeRef::Array(inner) => format!("{}[]", self.type_name(inner)),
            TypeRef::Record(name) | TypeRef::Row(name) => name.clone(),
        }
    }

    fn default_value(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(ScalarType::Boolean) => "false",
            TypeRef::Scalar(_) => "0",
            TypeRef::String(_) => "\"\"",
            TypeRef::Array(_) => "[]",
            TypeRef::Record(_) | TypeRef::Row(_) => "{}",
        }
        .to_string()
    }

    fn subprogram_header(&self, header: &Header<'_>) -> String {
        let params: Vec<&str> = header.params.iter().map(|p| p.name.as_str()).collect();
        format!("function {}({})", header.name, params.join(", "))
    }

    fn declare(&self, name: &str, ty: &TypeRef) -> String {
        format!("let {} = {};", name, self.default_value(ty))
    }

    fn statement(&self, text: &str) -> String {
        format!("{};", text)
    }

    fn open(&self, w: &mut Writer, header: &str) {
        braces::open(w, header);
    }

    fn close(&self, w: &mut Writer) {
        braces::close(w);
    }

    fn open_else(&self, w: &mut Writer) {
        braces::open_else(w);
    }

    fn open_else_if(&self, w: &mut Writer, condition: &str) {
        braces::open_else_if(w, &self.if_header(condition));
    }

    fn if_header(&self, condition: &str) -> String {
        format!("if ({})", condition)
    }

    fn while_header(&self, condition: &str) -> String {
        format!("while ({})", condition)
    }

    fn for_header(&self, init: &str, condition: &str, update: &str) -> Option<String> {
        Some(format!("for ({}; {}; {})", init, condition, update))
    }

    fn switch_style(&self, _literal_cases: bool) -> SwitchStyle {
        SwitchStyle::Native
    }

    fn open_switch(&self, w: &mut Writer, discriminant: &Rendered) {
        braces::open(w, &format!("switch ({})", discriminant.text));
    }

    fn open_case(&self, w: &mut Writer, values: &[Rendered]) {
        if let Some((last, rest)) = values.split_last() {
            for value in rest {
                w.line(format!("case {}:", value.text));
            }
            braces::open(w, &format!("case {}:", last.text));
        }
    }

    fn open_default(&self, w: &mut Writer) {
        braces::open(w, "default:");
    }

    fn close_case(&self, w: &mut Writer) {
        w.line("break;");
        braces::close(w);
    }

    fn close_switch(&self, w: &mut Writer, _has_default: bool) {
        braces::close(w);
    }

    fn open_dispatch(&self, w: &mut Writer, pc: &str) {
        braces::open(w, &format!("{}: while (true)", LOOP_LABEL));
        braces::open(w, &format!("switch ({})", pc));
    }

    fn open_arm(&self, w: &mut Writer, _pc: &str, index: usize) {
        braces::open(w, &format!("case {}:", index));
    }

    fn close_arm(&self, w: &mut Writer) {
        braces::close(w);
    }

    fn default_arm(&self, w: &mut Writer, _pc: &str, _only: bool) {
        w.line("default:");
        w.indent();
        self.leave_dispatch(w);
        w.dedent();
    }

    fn close_dispatch(&self, w: &mut Writer) {
        braces::close(w);
        braces::close(w);
    }

    fn jump(&self, w: &mut Writer, site: JumpSite<'_>) {
        w.line(format!("{} = {};", site.pc, site.target));
        w.line(format!("continue {};", LOOP_LABEL));
    }

    fn leave_dispatch(&self, w: &mut Writer) {
        w.line(format!("break {};", LOOP_LABEL));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let js = JsBackend;
        assert_eq!(js.declare("n", &TypeRef::INTEGER), "let n = 0;");
        assert_eq!(js.declare("s", &TypeRef::String(Some(10))), "let s = \"\";");
        assert_eq!(
            js.declare("ok", &TypeRef::Scalar(ScalarType::Boolean)),
            "let ok = false;"
        );
        assert_eq!(
            js.declare("o", &TypeRef::Record("Order".to_string())),
            "let o = {};"
        );
    }

    #[test]
    fn test_type_names() {
        let js = JsBackend;
        let ty = TypeRef::Array(Box::new(TypeRef::String(None)));
        assert_eq!(js.type_name(&ty), "string[]");
        assert_eq!(js.type_name(&TypeRef::Scalar(ScalarType::Val)), "number");
    }

    #[test]
    fn test_builtins() {
        let js = JsBackend;
        let s = Rendered::atom("s");
        let start = Rendered::new("i + 1", prec::ADD);
        let count = Rendered::atom("3");
        assert_eq!(
            js.builtin("len", std::slice::from_ref(&s)).unwrap().text,
            "s.length"
        );
        assert_eq!(
            js.builtin("mid", &[s, start, count]).unwrap().text,
            "s.substring(i + 1, i + 1 + 3)"
        );
        assert!(js.builtin("logtext", &[]).is_none());
    }
}
