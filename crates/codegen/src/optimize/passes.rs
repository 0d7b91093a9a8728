//! Straight-line constant/copy propagation
//!
//! Applies to bodies made only of declarations, assignments and returns
//! with no label or goto. Simple assignments are folded into an
//! environment and substituted into later reads; member/index assignments
//! and returns are kept with both sides substituted. Whenever folding could
//! change behaviour the body is left untouched.

use crate::lowering::has_jumps;
use hal_parser::ast::*;
use hal_parser::visitor::{Visitor, walk};
use indexmap::{IndexMap, IndexSet};

/// What a folded binding is keyed by.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Slot {
    Var(String),
    /// The function's return accumulator, however it was spelled.
    Result,
}

impl Slot {
    fn of(ident: &Ident) -> Slot {
        match ident.binding {
            Binding::ReturnValue => Slot::Result,
            Binding::Variable(_) => Slot::Var(ident.name.clone()),
        }
    }
}

type Env = IndexMap<Slot, Expr>;

/// Facts about an expression needed by the soundness guards.
#[derive(Default)]
struct Reads {
    calls: bool,
    places: bool,
    slots: IndexSet<Slot>,
}

impl Reads {
    fn of(expr: &Expr) -> Reads {
        let mut reads = Reads::default();
        reads.visit_expr(expr);
        reads
    }
}

impl Visitor for Reads {
    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Identifier(ident) => {
                self.slots.insert(Slot::of(ident));
            }
            Expr::Member(_) | Expr::Index(_) => self.places = true,
            _ => {}
        }
        walk::walk_expr(self, expr);
    }

    fn visit_call(&mut self, call: &CallExpr) {
        self.calls = true;
        walk::walk_call(self, call);
    }
}

fn is_straight_line(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::VarDecl(_) | Stmt::Assign(_) | Stmt::Return(_))
}

/// Replace every bound identifier in `expr` by its binding.
fn substitute(expr: &Expr, env: &Env) -> Expr {
    match expr {
        Expr::Identifier(ident) => env
            .get(&Slot::of(ident))
            .cloned()
            .unwrap_or_else(|| expr.clone()),
        Expr::Number(_) | Expr::String(_) | Expr::Boolean(_) => expr.clone(),
        Expr::Binary(b) => Expr::Binary(BinaryExpr {
            op: b.op,
            left: Box::new(substitute(&b.left, env)),
            right: Box::new(substitute(&b.right, env)),
            span: b.span,
        }),
        Expr::Unary(u) => Expr::Unary(UnaryExpr {
            op: u.op,
            operand: Box::new(substitute(&u.operand, env)),
            span: u.span,
        }),
        Expr::Call(c) => Expr::Call(CallExpr {
            callee: c.callee.clone(),
            args: c.args.iter().map(|arg| substitute(arg, env)).collect(),
            span: c.span,
        }),
        Expr::Member(m) => Expr::Member(MemberExpr {
            object: Box::new(substitute(&m.object, env)),
            field: m.field.clone(),
            span: m.span,
        }),
        Expr::Index(i) => Expr::Index(IndexExpr {
            array: Box::new(substitute(&i.array, env)),
            index: Box::new(substitute(&i.index, env)),
            span: i.span,
        }),
        Expr::Paren(p) => Expr::Paren(ParenExpr {
            inner: Box::new(substitute(&p.inner, env)),
            span: p.span,
        }),
    }
}

/// Propagate through `sub`'s body. `None` means the body must be kept as is.
pub fn propagate(sub: &Subprogram) -> Option<Block> {
    let body = &sub.body;
    if has_jumps(body) || !body.stmts.iter().all(is_straight_line) {
        return None;
    }

    let by_ref: IndexSet<&str> = sub
        .params
        .iter()
        .filter(|p| p.is_by_ref())
        .filter_map(|p| p.name.as_deref())
        .collect();
    let mut locals: IndexSet<Slot> = IndexSet::new();

    let mut env = Env::new();
    let mut out = Vec::new();
    let mut returned = false;

    for stmt in &body.stmts {
        if returned {
            return None;
        }
        match stmt {
            Stmt::VarDecl(decl) => {
                locals.extend(decl.names.iter().cloned().map(Slot::Var));
            }
            Stmt::Assign(assign) => {
                let value = substitute(&assign.value, &env);
                match &assign.target {
                    Expr::Identifier(ident) => {
                        if Reads::of(&value).calls {
                            return None;
                        }
                        if !ident.is_return_value() && by_ref.contains(ident.name.as_str()) {
                            return None;
                        }
                        env.insert(Slot::of(ident), value);
                    }
                    target => {
                        let root = target.root_ident().map(Slot::of);
                        let disturbs_binding = env.values().any(|bound| {
                            let reads = Reads::of(bound);
                            reads.places || root.as_ref().is_some_and(|r| reads.slots.contains(r))
                        });
                        if disturbs_binding || root.as_ref().is_some_and(|r| env.contains_key(r)) {
                            return None;
                        }
                        out.push(Stmt::Assign(AssignStmt {
                            target: substitute(target, &env),
                            value,
                            span: assign.span,
                        }));
                    }
                }
            }
            Stmt::Return(ret) => {
                returned = true;
                let value = match &ret.value {
                    Some(value) => Some(substitute(value, &env)),
                    None if sub.is_function() => env.get(&Slot::Result).cloned(),
                    None => None,
                };
                out.push(Stmt::Return(ReturnStmt {
                    value,
                    span: ret.span,
                }));
            }
            _ => return None,
        }
    }

    if !returned
        && sub.is_function()
        && let Some(result) = env.get(&Slot::Result)
    {
        out.push(Stmt::Return(ReturnStmt {
            value: Some(result.clone()),
            span: body.span,
        }));
    }

    // Declarations are dropped, so nothing left may read a local directly.
    let mut remaining = Reads::default();
    for stmt in &out {
        remaining.visit_stmt(stmt);
    }
    if remaining.slots.iter().any(|slot| locals.contains(slot)) {
        return None;
    }

    Some(Block {
        stmts: out,
        scope: body.scope,
        span: body.span,
    })
}
