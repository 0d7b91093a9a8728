//! Core AST node definitions (program, items and statements).

use super::expr::{CallExpr, Expr};
use super::types::TypeRef;
use crate::symbol::{ScopeId, SymbolTable};
use smallvec::SmallVec;
use text_size::TextRange;

/// A parsed HAL program (root AST node).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub items: Vec<Item>,
}

impl Program {
    pub fn subprograms(&self) -> impl Iterator<Item = &Subprogram> {
        self.items.iter().filter_map(Item::as_subprogram)
    }

    pub fn has_global(&self) -> bool {
        self.items.iter().any(Item::is_global)
    }
}

/// Declaration modifier keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Global,
    External,
    Updating,
    Inner,
    Remote,
    Outer,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Global => "global",
            Modifier::External => "external",
            Modifier::Updating => "updating",
            Modifier::Inner => "inner",
            Modifier::Remote => "remote",
            Modifier::Outer => "outer",
        }
    }
}

pub type Modifiers = SmallVec<[Modifier; 2]>;

/// Parameter modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamModifier {
    /// Declared with a leading `var`.
    ByRef,
    /// Declared with an array type.
    Array,
}

/// A subprogram parameter. External signatures may leave it unnamed.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: TypeRef,
    pub name: Option<String>,
    pub modifiers: SmallVec<[ParamModifier; 2]>,
    pub span: TextRange,
}

impl Param {
    pub fn is_by_ref(&self) -> bool {
        self.modifiers.contains(&ParamModifier::ByRef)
    }

    pub fn is_array(&self) -> bool {
        self.modifiers.contains(&ParamModifier::Array)
    }
}

/// Top-level items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Function(Subprogram),
    Procedure(Subprogram),
    ExternalFunction(ExternalDecl),
    ExternalProcedure(ExternalDecl),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Function(s) | Item::Procedure(s) => &s.name,
            Item::ExternalFunction(e) | Item::ExternalProcedure(e) => &e.name,
        }
    }

    pub fn span(&self) -> TextRange {
        match self {
            Item::Function(s) | Item::Procedure(s) => s.span,
            Item::ExternalFunction(e) | Item::ExternalProcedure(e) => e.span,
        }
    }

    pub fn modifiers(&self) -> &[Modifier] {
        match self {
            Item::Function(s) | Item::Procedure(s) => &s.modifiers,
            Item::ExternalFunction(e) | Item::ExternalProcedure(e) => &e.modifiers,
        }
    }

    pub fn is_global(&self) -> bool {
        self.modifiers().contains(&Modifier::Global)
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Item::ExternalFunction(_) | Item::ExternalProcedure(_))
    }

    pub fn as_subprogram(&self) -> Option<&Subprogram> {
        match self {
            Item::Function(s) | Item::Procedure(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_subprogram_mut(&mut self) -> Option<&mut Subprogram> {
        match self {
            Item::Function(s) | Item::Procedure(s) => Some(s),
            _ => None,
        }
    }
}

/// A function or procedure with a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Subprogram {
    pub name: String,
    /// Declared return type; `None` for procedures and for functions that
    /// omit it (those return `integer`).
    pub return_type: Option<TypeRef>,
    pub params: Vec<Param>,
    pub modifiers: Modifiers,
    pub body: Block,
    /// Scopes of this subprogram; `body.scope` and every nested block index
    /// into it.
    pub symbols: SymbolTable,
    pub span: TextRange,
}

impl Subprogram {
    pub fn is_global(&self) -> bool {
        self.modifiers.contains(&Modifier::Global)
    }

    /// Whether this subprogram yields a value.
    pub fn is_function(&self) -> bool {
        self.symbols.return_value().is_some()
    }

    /// Type of the return accumulator for functions.
    pub fn result_type(&self) -> Option<&TypeRef> {
        self.symbols.return_value().map(|(_, info)| &info.ty)
    }
}

/// Signature-only declaration of something supplied elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDecl {
    pub name: String,
    pub return_type: Option<TypeRef>,
    pub params: Vec<Param>,
    pub modifiers: Modifiers,
    pub span: TextRange,
}

/// An ordered statement list with its own scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub scope: ScopeId,
    pub span: TextRange,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}

/// Statement types.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl(VarDecl),
    Assign(AssignStmt),
    Return(ReturnStmt),
    Expr(ExprStmt),
    If(IfStmt),
    While(WhileStmt),
    For(ForStmt),
    Switch(SwitchStmt),
    Label(LabelStmt),
    Goto(GotoStmt),
    AsyncCall(AsyncCallStmt),
}

impl Stmt {
    pub fn span(&self) -> TextRange {
        match self {
            Stmt::VarDecl(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Expr(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Label(s) => s.span,
            Stmt::Goto(s) => s.span,
            Stmt::AsyncCall(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: TypeRef,
    pub names: Vec<String>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub target: Expr,
    pub value: Expr,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub value: Option<Expr>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Expr,
    pub then_branch: Block,
    pub else_branch: Option<Block>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    pub init: Box<AssignStmt>,
    pub condition: Expr,
    pub update: Box<AssignStmt>,
    pub body: Block,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStmt {
    pub discriminant: Expr,
    pub cases: Vec<SwitchCase>,
    /// The `otherwise` arm.
    pub default: Option<Block>,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchCase {
    pub values: Vec<Expr>,
    pub body: Block,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelStmt {
    pub name: String,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GotoStmt {
    pub label: String,
    pub span: TextRange,
}

/// `remote queue.callee(args)`; parsed and checked, never executed.
#[derive(Debug, Clone, PartialEq)]
pub struct AsyncCallStmt {
    pub queue: String,
    pub call: CallExpr,
    pub span: TextRange,
}
