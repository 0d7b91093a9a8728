//! Visitor pattern for AST traversal.

pub mod walk;

use crate::ast::*;

/// Trait for visiting AST nodes.
///
/// Every method defaults to the matching `walk_*` function, so an
/// implementation only overrides the nodes it cares about.
pub trait Visitor {
    fn visit_program(&mut self, program: &Program) {
        walk::walk_program(self, program);
    }

    fn visit_item(&mut self, item: &Item) {
        walk::walk_item(self, item);
    }

    fn visit_block(&mut self, block: &Block) {
        walk::walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk::walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk::walk_expr(self, expr);
    }

    fn visit_call(&mut self, call: &CallExpr) {
        walk::walk_call(self, call);
    }

    fn visit_type(&mut self, _ty: &TypeRef) {}
}
