//! Walking functions for AST traversal.
//!
//! These provide the default traversal for each node type and are called
//! by the default implementations of the [`Visitor`] methods.

use super::Visitor;
use crate::ast::*;

/// Walk a program, visiting every item.
pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for item in &program.items {
        visitor.visit_item(item);
    }
}

/// Walk an item: parameter and return types, then the body if there is one.
pub fn walk_item<V: Visitor + ?Sized>(visitor: &mut V, item: &Item) {
    match item {
        Item::Function(s) | Item::Procedure(s) => {
            for param in &s.params {
                visitor.visit_type(&param.ty);
            }
            if let Some(ty) = &s.return_type {
                visitor.visit_type(ty);
            }
            visitor.visit_block(&s.body);
        }
        Item::ExternalFunction(e) | Item::ExternalProcedure(e) => {
            for param in &e.params {
                visitor.visit_type(&param.ty);
            }
            if let Some(ty) = &e.return_type {
                visitor.visit_type(ty);
            }
        }
    }
}

pub fn walk_block<V: Visitor + ?Sized>(visitor: &mut V, block: &Block) {
    for stmt in &block.stmts {
        visitor.visit_stmt(stmt);
    }
}

/// Walk a statement, visiting all child nodes.
pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::VarDecl(d) => visitor.visit_type(&d.ty),
        Stmt::Assign(a) => {
            visitor.visit_expr(&a.target);
            visitor.visit_expr(&a.value);
        }
        Stmt::Return(r) => {
            if let Some(value) = &r.value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Expr(e) => visitor.visit_expr(&e.expr),
        Stmt::If(i) => {
            visitor.visit_expr(&i.condition);
            visitor.visit_block(&i.then_branch);
            if let Some(else_branch) = &i.else_branch {
                visitor.visit_block(else_branch);
            }
        }
        Stmt::While(w) => {
            visitor.visit_expr(&w.condition);
            visitor.visit_block(&w.body);
        }
        Stmt::For(f) => {
            visitor.visit_expr(&f.init.target);
            visitor.visit_expr(&f.init.value);
            visitor.visit_expr(&f.condition);
            visitor.visit_expr(&f.update.target);
            visitor.visit_expr(&f.update.value);
            visitor.visit_block(&f.body);
        }
        Stmt::Switch(s) => {
            visitor.visit_expr(&s.discriminant);
            for case in &s.cases {
                for value in &case.values {
                    visitor.visit_expr(value);
                }
                visitor.visit_block(&case.body);
            }
            if let Some(default) = &s.default {
                visitor.visit_block(default);
            }
        }
        Stmt::Label(_) | Stmt::Goto(_) => {}
        Stmt::AsyncCall(a) => visitor.visit_call(&a.call),
    }
}

/// Walk an expression, visiting all child nodes.
pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Identifier(_) | Expr::Number(_) | Expr::String(_) | Expr::Boolean(_) => {}
        Expr::Binary(b) => {
            visitor.visit_expr(&b.left);
            visitor.visit_expr(&b.right);
        }
        Expr::Unary(u) => visitor.visit_expr(&u.operand),
        Expr::Call(c) => visitor.visit_call(c),
        Expr::Member(m) => visitor.visit_expr(&m.object),
        Expr::Index(i) => {
            visitor.visit_expr(&i.array);
            visitor.visit_expr(&i.index);
        }
        Expr::Paren(p) => visitor.visit_expr(&p.inner),
    }
}

pub fn walk_call<V: Visitor + ?Sized>(visitor: &mut V, call: &CallExpr) {
    for arg in &call.args {
        visitor.visit_expr(arg);
    }
}
