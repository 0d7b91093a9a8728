//! Expression rendering with minimal parentheses

use super::names::Names;
use crate::backend::Backend;
use hal_parser::FunctionTable;
use hal_parser::ast::*;
use hal_parser::symbol::SymbolTable;

/// Binding strength of rendered text, higher binds tighter.
pub mod prec {
    pub const OR: u8 = 10;
    pub const AND: u8 = 20;
    /// Word-form `not`, which binds looser than comparisons
    pub const NOT_WORD: u8 = 25;
    pub const CMP: u8 = 30;
    pub const ADD: u8 = 40;
    pub const MUL: u8 = 50;
    pub const UNARY: u8 = 60;
    pub const ATOM: u8 = 70;
}

pub fn binary_prec(op: BinaryOp) -> u8 {
    match op.precedence() {
        1 => prec::OR,
        2 => prec::AND,
        3 => prec::CMP,
        4 => prec::ADD,
        _ => prec::MUL,
    }
}

/// Target text of an expression and how tightly it binds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub prec: u8,
}

impl Rendered {
    pub fn new(text: impl Into<String>, prec: u8) -> Self {
        Rendered {
            text: text.into(),
            prec,
        }
    }

    pub fn atom(text: impl Into<String>) -> Self {
        Rendered::new(text, prec::ATOM)
    }

    /// The text, parenthesized unless it binds at least as tightly as `min`.
    pub fn at_least(&self, min: u8) -> String {
        if self.prec < min {
            format!("({})", self.text)
        } else {
            self.text.clone()
        }
    }

    /// The text, parenthesized unless it is atomic.
    pub fn wrapped(&self) -> String {
        self.at_least(prec::ATOM)
    }
}

/// Everything needed to render the expressions of one subprogram.
pub struct ExprRenderer<'a> {
    pub backend: &'a dyn Backend,
    pub functions: &'a FunctionTable,
    pub names: &'a Names,
    pub symbols: &'a SymbolTable,
}

impl ExprRenderer<'_> {
    pub fn render(&self, expr: &Expr) -> Rendered {
        match expr {
            Expr::Identifier(id) => Rendered::atom(self.identifier(id)),
            Expr::Number(n) => Rendered::atom(n.text.clone()),
            Expr::String(s) => self.backend.string(&s.value),
            Expr::Boolean(b) => Rendered::atom(self.backend.boolean(b.value)),
            Expr::Binary(b) => self.binary(b),
            Expr::Unary(u) => self.unary(u),
            Expr::Call(call) => self.call(call),
            Expr::Member(m) => {
                let object = self.render(&m.object);
                self.backend.member(&object, &m.field)
            }
            Expr::Index(i) => {
                let array = self.render(&i.array);
                let index = self.render(&i.index);
                self.backend.index(&array, &index)
            }
            Expr::Paren(p) => Rendered::atom(format!("({})", self.render(&p.inner).text)),
        }
    }

    pub fn identifier(&self, id: &Ident) -> String {
        match id.binding {
            Binding::ReturnValue => match self.names.result() {
                Some(result) => result.to_string(),
                None => self.names.escape(&id.name),
            },
            Binding::Variable(scope) => self
                .names
                .variable(scope, &id.name)
                .map_or_else(|| self.names.escape(&id.name), str::to_string),
        }
    }

    /// Declared type of the variable at the root of a place expression.
    pub fn root_type(&self, expr: &Expr) -> Option<&TypeRef> {
        let id = expr.root_ident()?;
        match id.binding {
            Binding::ReturnValue => self.symbols.return_value().map(|(_, info)| &info.ty),
            Binding::Variable(scope) => {
                self.symbols.lookup_local(scope, &id.name).map(|info| &info.ty)
            }
        }
    }

    pub fn call(&self, call: &CallExpr) -> Rendered {
        let sig = self.functions.get(&call.callee);
        let args: Vec<Rendered> = call.args.iter().map(|arg| self.render(arg)).collect();

        if let Some(sig) = sig
            && sig.kind.is_external()
            && let Some(rendered) = self.backend.builtin(&sig.name.to_ascii_lowercase(), &args)
        {
            return rendered;
        }

        let name = sig.map_or(call.callee.as_str(), |sig| sig.name.as_str());
        let args: Vec<String> = args
            .into_iter()
            .enumerate()
            .map(|(i, arg)| {
                let param = sig.and_then(|sig| sig.params.get(i));
                self.backend.argument(arg, param)
            })
            .collect();
        Rendered::atom(format!("{}({})", self.names.escape(name), args.join(", ")))
    }

    fn binary(&self, b: &BinaryExpr) -> Rendered {
        let left = self.render(&b.left);
        let right = self.render(&b.right);
        if b.op == BinaryOp::Concat
            && let Some(rendered) = self.backend.concat(&left, &right)
        {
            return rendered;
        }

        let p = binary_prec(b.op);
        // Comparisons do not chain, so an equal-level left operand is grouped.
        let left_min = if b.op.is_comparison() { p + 1 } else { p };
        Rendered::new(
            format!(
                "{} {} {}",
                left.at_least(left_min),
                self.backend.binary_op(b.op),
                right.at_least(p + 1)
            ),
            p,
        )
    }

    fn unary(&self, u: &UnaryExpr) -> Rendered {
        let operand = self.render(&u.operand);
        let p = self.backend.unary_prec(u.op);
        Rendered::new(
            format!("{}{}", self.backend.unary_op(u.op), operand.at_least(p + 1)),
            p,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_least_parenthesizes_looser_text() {
        let sum = Rendered::new("a + b", prec::ADD);
        assert_eq!(sum.at_least(prec::MUL), "(a + b)");
        assert_eq!(sum.at_least(prec::ADD), "a + b");
        assert_eq!(sum.wrapped(), "(a + b)");
        assert_eq!(Rendered::atom("x").wrapped(), "x");
    }

    #[test]
    fn test_binary_levels_follow_operator_precedence() {
        assert!(binary_prec(BinaryOp::Or) < binary_prec(BinaryOp::And));
        assert!(binary_prec(BinaryOp::And) < binary_prec(BinaryOp::Lt));
        assert!(binary_prec(BinaryOp::Eq) < binary_prec(BinaryOp::Concat));
        assert!(binary_prec(BinaryOp::Sub) < binary_prec(BinaryOp::Div));
        assert!(binary_prec(BinaryOp::Mul) < prec::UNARY);
    }
}
