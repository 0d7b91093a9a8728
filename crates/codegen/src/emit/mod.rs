//! Shared emitter.
//!
//! Rendering is implemented once for every target: each subprogram is
//! linearized into basic blocks and written as a dispatch loop, with every
//! piece of target syntax supplied by a [`Backend`]. Structured statements
//! inside a block stay structured; gotos inside them set the dispatch index
//! and restart the loop.

mod expr;
mod names;
mod writer;

pub use expr::{ExprRenderer, Rendered, binary_prec, prec};
pub use names::{Names, escape};
pub use writer::Writer;

use crate::backend::{Backend, Header, HeaderParam, JumpSite, PreludeInfo, SwitchStyle};
use crate::error::{CodegenError, CodegenResult};
use crate::lowering::{Exit, LabelMap, contains_goto, has_goto_in_loop, linearize};
use crate::options::EmitOptions;
use hal_parser::FunctionTable;
use hal_parser::ast::*;
use hal_parser::symbol::ScopeId;
use hal_parser::visitor::Visitor;
use smallvec::{SmallVec, smallvec};

/// Render `program` with `backend`.
pub fn generate(
    program: &Program,
    functions: &FunctionTable,
    backend: &dyn Backend,
    options: &EmitOptions,
) -> CodegenResult<String> {
    Emitter::new(backend, functions, options).emit_program(program)
}

pub struct Emitter<'a> {
    backend: &'a dyn Backend,
    functions: &'a FunctionTable,
    options: &'a EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        functions: &'a FunctionTable,
        options: &'a EmitOptions,
    ) -> Self {
        Emitter {
            backend,
            functions,
            options,
        }
    }

    pub fn emit_program(&self, program: &Program) -> CodegenResult<String> {
        let mut w = Writer::new(self.options.indent_width);
        let prelude = self.backend.prelude(&self.prelude_info(program));
        let mut first = prelude.is_empty();
        for line in prelude {
            w.line(line);
        }

        for item in &program.items {
            if !first {
                w.blank_line();
            }
            first = false;
            match item {
                Item::Function(sub) | Item::Procedure(sub) => self.emit_subprogram(&mut w, sub)?,
                Item::ExternalFunction(decl) => w.comment(self.backend.external(&decl.name, true)),
                Item::ExternalProcedure(decl) => {
                    w.comment(self.backend.external(&decl.name, false))
                }
            }
        }
        Ok(w.finish())
    }

    fn prelude_info(&self, program: &Program) -> PreludeInfo {
        let builtins = self
            .functions
            .externals()
            .filter(|sig| {
                !program
                    .items
                    .iter()
                    .any(|item| item.name().eq_ignore_ascii_case(&sig.name))
            })
            .map(|sig| sig.name.clone())
            .collect();
        let mut records = RecordFinder::default();
        records.visit_program(program);
        PreludeInfo {
            builtins,
            uses_records: records.found,
        }
    }

    fn emit_subprogram(&self, w: &mut Writer, sub: &Subprogram) -> CodegenResult<()> {
        tracing::debug!(name = %sub.name, lang = %self.backend.target(), "emitting subprogram");
        let names = Names::new(sub, self.functions, self.backend.reserved_words());
        let root = sub.symbols.root();
        let header = Header {
            name: names.escape(&sub.name),
            params: sub
                .params
                .iter()
                .enumerate()
                .map(|(i, param)| HeaderParam {
                    name: param
                        .name
                        .as_deref()
                        .and_then(|name| names.variable(root, name))
                        .map_or_else(|| format!("arg{}", i), str::to_string),
                    ty: &param.ty,
                    by_ref: param.is_by_ref(),
                })
                .collect(),
            return_type: sub.result_type(),
            is_global: sub.is_global(),
        };

        self.backend.open(w, &self.backend.subprogram_header(&header));
        let linear = linearize(&sub.body);
        let mut body = BodyEmitter {
            backend: self.backend,
            functions: self.functions,
            sub,
            names: &names,
            labels: &linear.labels,
            scopes: smallvec![root],
            loop_depth: 0,
        };

        if let (Some(result), Some(ty)) = (names.result(), sub.result_type()) {
            w.line(self.backend.declare(result, ty));
        }
        for decl in &linear.hoisted {
            body.declare(w, decl);
        }
        let pc = names.pc();
        w.line(self.backend.declare_index(pc));
        if has_goto_in_loop(&sub.body)
            && let Some(line) = self.backend.declare_flag(names.jump())
        {
            w.line(line);
        }

        self.backend.open_dispatch(w, pc);
        for (index, block) in linear.blocks.iter().enumerate() {
            self.backend.open_arm(w, pc, index);
            for stmt in &block.stmts {
                body.emit_stmt(w, stmt)?;
            }
            if matches!(block.exit(), Exit::FallThrough) {
                match linear.next(index) {
                    Some(next) => body.jump(w, next),
                    None => self.backend.leave_dispatch(w),
                }
            }
            self.backend.close_arm(w);
        }
        self.backend.default_arm(w, pc, linear.blocks.is_empty());
        self.backend.close_dispatch(w);

        if let Some(result) = names.result() {
            w.line(self.backend.tail_return(result));
        }
        self.backend.close(w);
        Ok(())
    }
}

/// Renders the statements of one subprogram.
struct BodyEmitter<'e> {
    backend: &'e dyn Backend,
    functions: &'e FunctionTable,
    sub: &'e Subprogram,
    names: &'e Names,
    labels: &'e LabelMap,
    scopes: SmallVec<[ScopeId; 4]>,
    loop_depth: usize,
}

impl BodyEmitter<'_> {
    fn scope(&self) -> ScopeId {
        self.scopes.last().copied().unwrap_or(ScopeId::ROOT)
    }

    fn renderer(&self) -> ExprRenderer<'_> {
        ExprRenderer {
            backend: self.backend,
            functions: self.functions,
            names: self.names,
            symbols: &self.sub.symbols,
        }
    }

    fn expr(&self, expr: &Expr) -> Rendered {
        self.renderer().render(expr)
    }

    fn declare(&self, w: &mut Writer, decl: &VarDecl) {
        let scope = self.scope();
        for name in &decl.names {
            let target = self
                .names
                .variable(scope, name)
                .map_or_else(|| self.names.escape(name), str::to_string);
            w.line(self.backend.declare(&target, &decl.ty));
        }
    }

    /// `target = value` without a statement terminator.
    fn assignment(&self, assign: &AssignStmt) -> (String, String) {
        let renderer = self.renderer();
        let target = renderer.render(&assign.target).text;
        let value = renderer.render(&assign.value);
        let value = if assign.value.is_place() {
            self.backend.copied(value, renderer.root_type(&assign.value))
        } else {
            value.text
        };
        (target, value)
    }

    fn jump(&self, w: &mut Writer, target: usize) {
        self.backend.jump(
            w,
            JumpSite {
                pc: self.names.pc(),
                target,
                loop_depth: self.loop_depth,
                flag: self.names.jump(),
            },
        );
    }

    fn emit_block(&mut self, w: &mut Writer, block: &Block) -> CodegenResult<()> {
        self.scopes.push(block.scope);
        let result = block
            .stmts
            .iter()
            .try_for_each(|stmt| self.emit_stmt(w, stmt));
        self.scopes.pop();
        result
    }

    fn emit_stmt(&mut self, w: &mut Writer, stmt: &Stmt) -> CodegenResult<()> {
        match stmt {
            Stmt::VarDecl(decl) => self.declare(w, decl),
            Stmt::Assign(assign) => {
                let (target, value) = self.assignment(assign);
                w.line(self.backend.assign(&target, &value));
            }
            Stmt::Return(ret) => {
                let value = match &ret.value {
                    Some(value) => Some(self.expr(value).text),
                    None => self.names.result().map(str::to_string),
                };
                w.line(self.backend.return_stmt(value.as_deref()));
            }
            Stmt::Expr(e) => {
                let text = self.expr(&e.expr).text;
                w.line(self.backend.statement(&text));
            }
            Stmt::If(stmt) => {
                let condition = self.expr(&stmt.condition).text;
                self.backend.open(w, &self.backend.if_header(&condition));
                self.emit_block(w, &stmt.then_branch)?;
                if let Some(else_branch) = &stmt.else_branch {
                    self.backend.open_else(w);
                    self.emit_block(w, else_branch)?;
                }
                self.backend.close(w);
            }
            Stmt::While(stmt) => {
                let condition = self.expr(&stmt.condition).text;
                self.backend.open(w, &self.backend.while_header(&condition));
                self.emit_loop_body(w, &stmt.body, None)?;
            }
            Stmt::For(stmt) => self.emit_for(w, stmt)?,
            Stmt::Switch(stmt) => self.emit_switch(w, stmt)?,
            Stmt::Label(label) => {
                return Err(CodegenError::UnexpectedLabel {
                    subprogram: self.sub.name.clone(),
                    label: label.name.clone(),
                });
            }
            Stmt::Goto(goto) => {
                let target =
                    self.labels
                        .get(&goto.label)
                        .copied()
                        .ok_or_else(|| CodegenError::UnknownLabel {
                            subprogram: self.sub.name.clone(),
                            label: goto.label.clone(),
                        })?;
                self.jump(w, target);
            }
            Stmt::AsyncCall(call) => {
                let rendered = self.renderer().call(&call.call).text;
                w.comment(
                    self.backend
                        .comment(&format!("remote call on queue {}: {}", call.queue, rendered)),
                );
            }
        }
        Ok(())
    }

    /// Body of an already opened loop, closing it afterwards.
    fn emit_loop_body(
        &mut self,
        w: &mut Writer,
        body: &Block,
        update: Option<&str>,
    ) -> CodegenResult<()> {
        self.loop_depth += 1;
        let result = self.emit_block(w, body);
        self.loop_depth -= 1;
        result?;
        if let Some(update) = update {
            w.line(update);
        }
        self.backend.close(w);
        if contains_goto(body) {
            self.backend.after_loop(w, self.names.jump(), self.loop_depth);
        }
        Ok(())
    }

    fn emit_for(&mut self, w: &mut Writer, stmt: &ForStmt) -> CodegenResult<()> {
        let (init_target, init_value) = self.assignment(&stmt.init);
        let condition = self.expr(&stmt.condition).text;
        let (update_target, update_value) = self.assignment(&stmt.update);
        let init = format!("{} = {}", init_target, init_value);
        let update = format!("{} = {}", update_target, update_value);

        match self.backend.for_header(&init, &condition, &update) {
            Some(header) => {
                self.backend.open(w, &header);
                self.emit_loop_body(w, &stmt.body, None)
            }
            None => {
                w.line(self.backend.assign(&init_target, &init_value));
                self.backend.open(w, &self.backend.while_header(&condition));
                let update = self.backend.assign(&update_target, &update_value);
                self.emit_loop_body(w, &stmt.body, Some(&update))
            }
        }
    }

    fn emit_switch(&mut self, w: &mut Writer, stmt: &SwitchStmt) -> CodegenResult<()> {
        let discriminant = self.expr(&stmt.discriminant);
        let literal_cases = stmt
            .cases
            .iter()
            .flat_map(|case| &case.values)
            .all(is_pattern_literal);

        match self.backend.switch_style(literal_cases) {
            SwitchStyle::Native => {
                self.backend.open_switch(w, &discriminant);
                for case in &stmt.cases {
                    let values: SmallVec<[Rendered; 2]> =
                        case.values.iter().map(|v| self.expr(v)).collect();
                    self.backend.open_case(w, &values);
                    self.emit_block(w, &case.body)?;
                    self.backend.close_case(w);
                }
                if let Some(default) = &stmt.default {
                    self.backend.open_default(w);
                    self.emit_block(w, default)?;
                    self.backend.close_case(w);
                }
                self.backend.close_switch(w, stmt.default.is_some());
            }
            SwitchStyle::IfChain => {
                if stmt.cases.is_empty() {
                    if let Some(default) = &stmt.default {
                        self.emit_block(w, default)?;
                    }
                    return Ok(());
                }
                for (i, case) in stmt.cases.iter().enumerate() {
                    let values: SmallVec<[Rendered; 2]> =
                        case.values.iter().map(|v| self.expr(v)).collect();
                    let condition = self.backend.case_condition(&discriminant, &values);
                    if i == 0 {
                        self.backend.open(w, &self.backend.if_header(&condition));
                    } else {
                        self.backend.open_else_if(w, &condition);
                    }
                    self.emit_block(w, &case.body)?;
                }
                if let Some(default) = &stmt.default {
                    self.backend.open_else(w);
                    self.emit_block(w, default)?;
                }
                self.backend.close(w);
            }
        }
        Ok(())
    }
}

/// Integer and boolean literals, possibly negated.
fn is_pattern_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Number(n) => n.is_integer(),
        Expr::Boolean(_) => true,
        Expr::Unary(u) if u.op == UnaryOp::Minus => {
            matches!(&*u.operand, Expr::Number(n) if n.is_integer())
        }
        Expr::Paren(p) => is_pattern_literal(&p.inner),
        _ => false,
    }
}

#[derive(Default)]
struct RecordFinder {
    found: bool,
}

impl Visitor for RecordFinder {
    fn visit_type(&mut self, ty: &TypeRef) {
        if matches!(ty.element(), TypeRef::Record(_) | TypeRef::Row(_)) {
            self.found = true;
        }
    }
}
