//! Python backend

use super::{Backend, Header, JumpSite, PreludeInfo, SwitchStyle};
use crate::emit::{Rendered, Writer, prec};
use crate::options::Target;
use hal_parser::ast::{BinaryOp, ScalarType, TypeRef, UnaryOp};

const RESERVED: &[&str] = &[
    "False", "None", "True", "SimpleNamespace", "and", "as", "assert", "async", "await", "break",
    "class", "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
    "global", "if", "import", "in", "is", "lambda", "len", "nonlocal", "not", "or", "pass",
    "print", "raise", "return", "try", "while", "with", "yield",
];

/// Python 3 functions with annotated parameters.
///
/// Python has no labeled loops, so a goto inside a nested loop sets a flag
/// and breaks out; every enclosing loop then re-checks the flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonBackend;

impl PythonBackend {
    /// Fill an empty block so it stays syntactically valid.
    fn fill(w: &mut Writer) {
        if !w.block_has_content() {
            w.line("pass");
        }
    }
}

impl Backend for PythonBackend {
    fn target(&self) -> Target {
        Target::Python
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn comment(&self, text: &str) -> String {
        format!("# {}", text)
    }

    fn prelude(&self, info: &PreludeInfo) -> Vec<String> {
        let mut lines = Vec::new();
        if !info.builtins.is_empty() {
            lines.push(self.comment(&format!(
                "external declarations: {}",
                info.builtins.join(", ")
            )));
        }
        if info.uses_records {
            lines.push("from types import SimpleNamespace".to_string());
        }
        lines
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    fn binary_op(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::NotEq => "!=",
            BinaryOp::Concat => "+",
            other => other.as_str(),
        }
    }

    fn unary_op(&self, op: UnaryOp) -> &'static str {
        op.as_str()
    }

    fn unary_prec(&self, op: UnaryOp) -> u8 {
        match op {
            UnaryOp::Not => prec::NOT_WORD,
            UnaryOp::Plus | UnaryOp::Minus => prec::UNARY,
        }
    }

    fn builtin(&self, name: &str, args: &[Rendered]) -> Option<Rendered> {
        match (name, args) {
            ("len", [s]) => Some(Rendered::atom(format!("len({})", s.text))),
            ("mid", [s, start, count]) => Some(Rendered::atom(format!(
                "{}[{}:{} + {}]",
                s.wrapped(),
                start.text,
                start.at_least(prec::ADD),
                count.at_least(prec::ADD + 1)
            ))),
            ("logtext", [indent, text]) => Some(Rendered::atom(format!(
                "print(\" \" * {} + {})",
                indent.at_least(prec::MUL + 1),
                text.at_least(prec::ADD + 1)
            ))),
            _ => None,
        }
    }

    fn type_name(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(ScalarType::Boolean) => "bool".to_string(),
            TypeRef::Scalar(ScalarType::Val) => "float".to_string(),
            TypeRef::Scalar(_) => "int".to_string(),
            TypeRef::String(_) => "str".to_string(),
            TypeRef::Array(inner) => format!("list[{}]", self.type_name(inner)),
            TypeRef::Record(_) | TypeRef::Row(_) => "SimpleNamespace".to_string(),
        }
    }

    fn default_value(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(ScalarType::Boolean) => "False",
            TypeRef::Scalar(ScalarType::Val) => "0.0",
            TypeRef::Scalar(_) => "0",
            TypeRef::String(_) => "\"\"",
            TypeRef::Array(_) => "[]",
            TypeRef::Record(_) | TypeRef::Row(_) => "SimpleNamespace()",
        }
        .to_string()
    }

    fn subprogram_header(&self, header: &Header<'_>) -> String {
        let params: Vec<String> = header
            .params
            .iter()
            .map(|p| format!("{}: {}", p.name, self.type_name(p.ty)))
            .collect();
        let mut text = format!("def {}({})", header.name, params.join(", "));
        if let Some(ty) = header.return_type {
            text.push_str(" -> ");
            text.push_str(&self.type_name(ty));
        }
        text
    }

    fn declare(&self, name: &str, ty: &TypeRef) -> String {
        format!("{} = {}", name, self.default_value(ty))
    }

    fn declare_flag(&self, name: &str) -> Option<String> {
        Some(format!("{} = False", name))
    }

    fn statement(&self, text: &str) -> String {
        text.to_string()
    }

    fn open(&self, w: &mut Writer, header: &str) {
        w.line(format!("{}:", header));
        w.indent();
    }

    fn close(&self, w: &mut Writer) {
        Self::fill(w);
        w.dedent();
    }

    fn open_else(&self, w: &mut Writer) {
        self.close(w);
        self.open(w, "else");
    }

    fn open_else_if(&self, w: &mut Writer, condition: &str) {
        self.close(w);
        self.open(w, &format!("elif {}", condition));
    }

    fn if_header(&self, condition: &str) -> String {
        format!("if {}", condition)
    }

    fn while_header(&self, condition: &str) -> String {
        format!("while {}", condition)
    }

    fn switch_style(&self, _literal_cases: bool) -> SwitchStyle {
        SwitchStyle::IfChain
    }

    fn case_condition(&self, discriminant: &Rendered, values: &[Rendered]) -> String {
        let subject = discriminant.at_least(prec::CMP + 1);
        match values {
            [value] => format!("{} == {}", subject, value.at_least(prec::CMP + 1)),
            _ => {
                let values: Vec<&str> = values.iter().map(|v| v.text.as_str()).collect();
                format!("{} in ({})", subject, values.join(", "))
            }
        }
    }

    fn open_dispatch(&self, w: &mut Writer, _pc: &str) {
        self.open(w, "while True");
    }

    fn open_arm(&self, w: &mut Writer, pc: &str, index: usize) {
        let keyword = if index == 0 { "if" } else { "elif" };
        self.open(w, &format!("{} {} == {}", keyword, pc, index));
    }

    fn close_arm(&self, w: &mut Writer) {
        self.close(w);
    }

    fn default_arm(&self, w: &mut Writer, _pc: &str, only: bool) {
        if only {
            self.leave_dispatch(w);
        } else {
            self.open(w, "else");
            self.leave_dispatch(w);
            self.close(w);
        }
    }

    fn close_dispatch(&self, w: &mut Writer) {
        self.close(w);
    }

    fn jump(&self, w: &mut Writer, site: JumpSite<'_>) {
        w.line(format!("{} = {}", site.pc, site.target));
        if site.loop_depth == 0 {
            w.line("continue");
        } else {
            w.line(format!("{} = True", site.flag));
            w.line("break");
        }
    }

    fn leave_dispatch(&self, w: &mut Writer) {
        w.line("break");
    }

    fn after_loop(&self, w: &mut Writer, flag: &str, loop_depth: usize) {
        self.open(w, &format!("if {}", flag));
        if loop_depth == 0 {
            w.line(format!("{} = False", flag));
            w.line("continue");
        } else {
            w.line("break");
        }
        self.close(w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_blocks_get_pass() {
        let py = PythonBackend;
        let mut w = Writer::new(4);
        py.open(&mut w, "if x");
        w.comment("# nothing");
        py.open_else(&mut w);
        w.line("y = 1");
        py.close(&mut w);
        assert_eq!(w.finish(), "if x:\n    # nothing\n    pass\nelse:\n    y = 1\n");
    }

    #[test]
    fn test_case_condition_uses_membership_for_several_values() {
        let py = PythonBackend;
        let d = Rendered::atom("n");
        let one = Rendered::atom("1");
        let two = Rendered::atom("2");
        assert_eq!(py.case_condition(&d, std::slice::from_ref(&one)), "n == 1");
        assert_eq!(py.case_condition(&d, &[one, two]), "n in (1, 2)");
    }

    #[test]
    fn test_goto_from_nested_loop_sets_flag() {
        let py = PythonBackend;
        let mut w = Writer::new(4);
        py.jump(
            &mut w,
            JumpSite {
                pc: "pc",
                target: 2,
                loop_depth: 1,
                flag: "jump",
            },
        );
        assert_eq!(w.finish(), "pc = 2\njump = True\nbreak\n");
    }

    #[test]
    fn test_after_outermost_loop_restarts_dispatch() {
        let py = PythonBackend;
        let mut w = Writer::new(4);
        py.after_loop(&mut w, "jump", 0);
        assert_eq!(w.finish(), "if jump:\n    jump = False\n    continue\n");
    }

    #[test]
    fn test_logtext_prints_indented_text() {
        let py = PythonBackend;
        let args = [Rendered::atom("2"), Rendered::atom("\"hi\"")];
        assert_eq!(
            py.builtin("logtext", &args).unwrap().text,
            "print(\" \" * 2 + \"hi\")"
        );
    }

    #[test]
    fn test_prelude_lists_builtins() {
        let py = PythonBackend;
        let info = PreludeInfo {
            builtins: vec!["len".to_string(), "mid".to_string()],
            uses_records: true,
        };
        assert_eq!(
            py.prelude(&info),
            vec![
                "# external declarations: len, mid".to_string(),
                "from types import SimpleNamespace".to_string()
            ]
        );
    }
}
