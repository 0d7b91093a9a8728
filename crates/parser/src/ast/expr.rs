//! Expression AST nodes.

use super::ops::{BinaryOp, UnaryOp};
use crate::symbol::ScopeId;
use text_size::TextRange;

/// Expression types.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(Ident),
    Number(NumberLit),
    String(StringLit),
    Boolean(BoolLit),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Call(CallExpr),
    Member(MemberExpr),
    Index(IndexExpr),
    Paren(ParenExpr),
}

impl Expr {
    pub fn span(&self) -> TextRange {
        match self {
            Expr::Identifier(e) => e.span,
            Expr::Number(e) => e.span,
            Expr::String(e) => e.span,
            Expr::Boolean(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::Member(e) => e.span,
            Expr::Index(e) => e.span,
            Expr::Paren(e) => e.span,
        }
    }

    /// Whether this expression can appear on the left of `=`.
    pub fn is_place(&self) -> bool {
        matches!(self, Expr::Identifier(_) | Expr::Member(_) | Expr::Index(_))
    }

    /// Root identifier of a place expression (`a` in `a.b[c]`).
    pub fn root_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Identifier(id) => Some(id),
            Expr::Member(m) => m.object.root_ident(),
            Expr::Index(i) => i.array.root_ident(),
            Expr::Paren(p) => p.inner.root_ident(),
            _ => None,
        }
    }
}

/// What an identifier resolved to while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    /// A parameter or local variable declared in this scope.
    Variable(ScopeId),
    /// The implicit return accumulator of the enclosing function.
    ReturnValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub binding: Binding,
    pub span: TextRange,
}

impl Ident {
    pub fn is_return_value(&self) -> bool {
        self.binding == Binding::ReturnValue
    }

    /// Declaring scope of a variable reference.
    pub fn scope(&self) -> Option<ScopeId> {
        match self.binding {
            Binding::Variable(scope) => Some(scope),
            Binding::ReturnValue => None,
        }
    }
}

/// Number literal; keeps the source spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberLit {
    pub text: String,
    pub span: TextRange,
}

impl NumberLit {
    pub fn is_integer(&self) -> bool {
        !self.text.contains('.')
    }
}

/// String literal; `value` is the unquoted content with escapes left as written.
#[derive(Debug, Clone, PartialEq)]
pub struct StringLit {
    pub value: String,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoolLit {
    pub value: bool,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub op: UnaryOp,
    pub operand: Box<Expr>,
    pub span: TextRange,
}

/// A call; `callee` is spelled as written at the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: String,
    pub args: Vec<Expr>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub field: String,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexExpr {
    pub array: Box<Expr>,
    pub index: Box<Expr>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParenExpr {
    pub inner: Box<Expr>,
    pub span: TextRange,
}
