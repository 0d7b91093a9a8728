//! Rust backend

use super::{Backend, Header, JumpSite, PreludeInfo, SwitchStyle, braces, double_quoted};
use crate::emit::{Rendered, Writer, prec};
use crate::options::Target;
use hal_parser::ast::{BinaryOp, Param, ScalarType, TypeRef, UnaryOp};

const RESERVED: &[&str] = &[
    "Self", "String", "Vec", "abstract", "as", "async", "await", "become", "box", "break",
    "const", "continue", "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn",
    "for", "gen", "hal", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut",
    "override", "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait",
    "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while",
    "yield",
];

/// Label of the dispatch loop.
const LOOP_LABEL: &str = "'dispatch";

/// Typed Rust functions over owned values.
///
/// Parameters are taken by value; `var` parameters do not write back to
/// the caller. Strings, arrays and records are cloned when read from a
/// variable so the source stays usable.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

fn is_copy(ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Scalar(_))
}

fn cloned(value: Rendered, ty: Option<&TypeRef>) -> String {
    match ty {
        Some(ty) if !is_copy(ty) => format!("{}.clone()", value.wrapped()),
        _ => value.text,
    }
}

fn as_usize(value: &Rendered) -> String {
    format!("{} as usize", value.at_least(prec::UNARY))
}

impl Backend for RustBackend {
    fn target(&self) -> Target {
        Target::Rust
    }

    fn file_extension(&self) -> &'static str {
        "rs"
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn comment(&self, text: &str) -> String {
        format!("// {}", text)
    }

    fn prelude(&self, _info: &PreludeInfo) -> Vec<String> {
        [
            "#[allow(dead_code)]",
            "mod hal {",
            "    pub type Area = i32;",
            "    pub type Date = i64;",
            "    pub type Time = i64;",
            "    pub type RoundMode = i32;",
            "}",
        ]
        .into_iter()
        .map(str::to_string)
        .collect()
    }

    fn boolean(&self, value: bool) -> &'static str {
        if value { "true" } else { "false" }
    }

    fn string(&self, value: &str) -> Rendered {
        Rendered::atom(format!("String::from({})", double_quoted(value)))
    }

    fn binary_op(&self, op: BinaryOp) -> &'static str {
        match op {
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::NotEq => "!=",
            other => other.as_str(),
        }
    }

    fn unary_op(&self, op: UnaryOp) -> &'static str {
        match op {
            UnaryOp::Plus => "",
            UnaryOp::Minus => "-",
            UnaryOp::Not => "!",
        }
    }

    fn concat(&self, left: &Rendered, right: &Rendered) -> Option<Rendered> {
        Some(Rendered::atom(format!(
            "format!(\"{{}}{{}}\", {}, {})",
            left.text, right.text
        )))
    }

    fn index(&self, array: &Rendered, index: &Rendered) -> Rendered {
        Rendered::atom(format!("{}[{}]", array.wrapped(), as_usize(index)))
    }

    fn builtin(&self, name: &str, args: &[Rendered]) -> Option<Rendered> {
        match (name, args) {
            ("len", [s]) => Some(Rendered::atom(format!("({}.len() as i32)", s.wrapped()))),
            ("mid", [s, start, count]) => Some(Rendered::atom(format!(
                "{}.chars().skip({}).take({}).collect::<String>()",
                s.wrapped(),
                as_usize(start),
                as_usize(count)
            ))),
            _ => None,
        }
    }

    fn argument(&self, arg: Rendered, param: Option<&Param>) -> String {
        cloned(arg, param.map(|p| &p.ty))
    }

    fn copied(&self, value: Rendered, ty: Option<&TypeRef>) -> String {
        cloned(value, ty)
    }

    fn type_name(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(scalar) => match scalar {
                ScalarType::Boolean => "bool",
                ScalarType::Integer => "i32",
                ScalarType::LongInt => "i64",
                ScalarType::Val => "f64",
                ScalarType::ULong64 => "u64",
                ScalarType::Area => "hal::Area",
                ScalarType::Date => "hal::Date",
                ScalarType::Time => "hal::Time",
                ScalarType::RoundMode => "hal::RoundMode",
            }
            .to_string(),
            TypeRef::String(_) => "String".to_string(),
            TypeRef::Array(inner) => format!("Vec<{}>", self.type_name(inner)),
            TypeRef::Record(name) | TypeRef::Row(name) => name.clone(),
        }
    }

    fn default_value(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Scalar(ScalarType::Boolean) => "false",
            TypeRef::Scalar(ScalarType::Val) => "0.0",
            TypeRef::Scalar(_) => "0",
            TypeRef::String(_) => "String::new()",
            TypeRef::Array(_) => "Vec::new()",
            TypeRef::Record(_) | TypeRef::Row(_) => "Default::default()",
        }
        .to_string()
    }

    fn subprogram_header(&self, header: &Header<'_>) -> String {
        let params: Vec<String> = header
            .params
            .iter()
            .map(|p| format!("mut {}: {}", p.name, self.type_name(p.ty)))
            .collect();
        let mut text = String::new();
        if header.is_global {
            text.push_str("pub ");
        }
        text.push_str(&format!("fn {}({})", header.name, params.join(", ")));
        if let Some(ty) = header.return_type {
            text.push_str(" -> ");
            text.push_str(&self.type_name(ty));
        }
        text
    }

    fn declare(&self, name: &str, ty: &TypeRef) -> String {
        format!(
            "let mut {}: {} = {};",
            name,
            self.type_name(ty),
            self.default_value(ty)
        )
    }

    fn declare_index(&self, name: &str) -> String {
        format!("let mut {}: usize = 0;", name)
    }

    fn statement(&self, text: &str) -> String {
        format!("{};", text)
    }

    fn tail_return(&self, value: &str) -> String {
        value.to_string()
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
        format!("if {}", condition)
    }

    fn while_header(&self, condition: &str) -> String {
        format!("while {}", condition)
    }

    fn switch_style(&self, literal_cases: bool) -> SwitchStyle {
        if literal_cases {
            SwitchStyle::Native
        } else {
            SwitchStyle::IfChain
        }
    }

    fn open_switch(&self, w: &mut Writer, discriminant: &Rendered) {
        braces::open(w, &format!("match {}", discriminant.text));
    }

    fn open_case(&self, w: &mut Writer, values: &[Rendered]) {
        let patterns: Vec<&str> = values.iter().map(|v| v.text.as_str()).collect();
        braces::open(w, &format!("{} =>", patterns.join(" | ")));
    }

    fn open_default(&self, w: &mut Writer) {
        braces::open(w, "_ =>");
    }

    fn close_switch(&self, w: &mut Writer, has_default: bool) {
        if !has_default {
            w.line("_ => {}");
        }
        braces::close(w);
    }

    fn open_dispatch(&self, w: &mut Writer, pc: &str) {
        braces::open(w, &format!("{}: loop", LOOP_LABEL));
        braces::open(w, &format!("match {}", pc));
    }

    fn open_arm(&self, w: &mut Writer, _pc: &str, index: usize) {
        braces::open(w, &format!("{} =>", index));
    }

    fn close_arm(&self, w: &mut Writer) {
        braces::close(w);
    }

    fn default_arm(&self, w: &mut Writer, _pc: &str, _only: bool) {
        w.line(format!("_ => break {},", LOOP_LABEL));
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
