use super::typeref::TypeSite;
use super::types::Parser;
use crate::ast::*;
use crate::error::{ErrorKind, ParseResult};
use crate::lexer::{Token, TokenKind};
use crate::symbol::{SymbolInfo, SymbolKind};

impl<'src> Parser<'src> {
    /// Parse statements until one of `terminators` (or end of input) is next.
    pub(super) fn parse_statements_until(
        &mut self,
        terminators: &[TokenKind],
    ) -> ParseResult<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while !self.is_at_end() && !terminators.contains(&self.peek().kind) {
            if let Some(stmt) = self.parse_stmt()? {
                stmts.push(stmt);
            }
        }
        Ok(stmts)
    }

    /// Parse one statement. A lone `;` yields `None`.
    pub(super) fn parse_stmt(&mut self) -> ParseResult<Option<Stmt>> {
        let token = self.peek();
        let stmt = match token.kind {
            TokenKind::Semicolon => {
                self.advance();
                return Ok(None);
            }
            TokenKind::Ident if self.peek_at(1).kind == TokenKind::Colon => self.parse_label()?,
            TokenKind::Ident if self.is_assignment_ahead() => {
                let assign = self.parse_assignment()?;
                self.match_token(TokenKind::Semicolon);
                Stmt::Assign(assign)
            }
            kind if kind.starts_type() => self.parse_var_decl()?,
            TokenKind::Goto => self.parse_goto()?,
            TokenKind::Return => self.parse_return()?,
            TokenKind::If => self.parse_if()?,
            TokenKind::While => self.parse_while()?,
            TokenKind::For => self.parse_for()?,
            TokenKind::Switch => self.parse_switch()?,
            TokenKind::Remote => self.parse_async_call()?,
            _ => {
                let expr = self.parse_expression()?;
                self.match_token(TokenKind::Semicolon);
                Stmt::Expr(ExprStmt {
                    expr,
                    span: self.span_from(&token),
                })
            }
        };
        Ok(Some(stmt))
    }

    /// `identifier {.field | [expr]} =` with bounded lookahead.
    fn is_assignment_ahead(&self) -> bool {
        let mut i = self.current + 1;
        loop {
            match self.tokens.get(i).map(|t| t.kind) {
                Some(TokenKind::Equal) => return true,
                Some(TokenKind::Dot) => i += 2,
                Some(TokenKind::LeftBracket) => {
                    let mut depth = 0usize;
                    loop {
                        match self.tokens.get(i).map(|t| t.kind) {
                            Some(TokenKind::LeftBracket) => depth += 1,
                            Some(TokenKind::RightBracket) => {
                                depth -= 1;
                                if depth == 0 {
                                    i += 1;
                                    break;
                                }
                            }
                            Some(TokenKind::Eof) | None => return false,
                            _ => {}
                        }
                        i += 1;
                    }
                }
                _ => return false,
            }
        }
    }

    /// `place = expr`, without the optional trailing `;`.
    pub(super) fn parse_assignment(&mut self) -> ParseResult<AssignStmt> {
        let start = self.peek();
        if start.kind != TokenKind::Ident {
            return Err(self.unexpected("an assignment"));
        }
        let target = self.parse_postfix()?;
        if !target.is_place() {
            return Err(self.error_at(
                ErrorKind::InvalidSyntax {
                    message: format!("Cannot assign to '{}'", target),
                },
                &start,
            ));
        }
        self.consume(TokenKind::Equal, "'='")?;
        let value = self.parse_expression()?;
        Ok(AssignStmt {
            target,
            value,
            span: self.span_from(&start),
        })
    }

    /// `Type name {, name} ;`
    fn parse_var_decl(&mut self) -> ParseResult<Stmt> {
        let start = self.peek();
        let ty = self.parse_type(TypeSite::Local)?;

        let mut names = Vec::new();
        loop {
            let name_tok = self.consume_ident("a variable name")?;
            let scope = self.body.scope;
            self.body
                .symbols
                .declare(
                    scope,
                    name_tok.text,
                    SymbolInfo {
                        ty: ty.clone(),
                        kind: SymbolKind::Local,
                        span: name_tok.span,
                    },
                )
                .map_err(|e| e.at(name_tok.start))?;
            names.push(name_tok.text.to_string());

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }
        self.consume(TokenKind::Semicolon, "';'")?;

        Ok(Stmt::VarDecl(VarDecl {
            ty,
            names,
            span: self.span_from(&start),
        }))
    }

    /// `name : [;]`; only allowed in the top-level statement list.
    fn parse_label(&mut self) -> ParseResult<Stmt> {
        let name_tok = self.advance();
        self.advance();
        self.match_token(TokenKind::Semicolon);

        let name = name_tok.text.to_string();
        if self.body.depth > 0 {
            return Err(self.error_at(ErrorKind::NestedLabel { name }, &name_tok));
        }
        if self.body.labels.contains_key(&name) {
            return Err(self.error_at(ErrorKind::DuplicateLabel { name }, &name_tok));
        }
        self.body.labels.insert(name.clone(), name_tok.span);

        Ok(Stmt::Label(LabelStmt {
            name,
            span: name_tok.span,
        }))
    }

    /// `goto name [;]`; the target is checked once the body is complete.
    fn parse_goto(&mut self) -> ParseResult<Stmt> {
        let start = self.advance();
        let label_tok = self.consume_ident("a label name")?;
        self.match_token(TokenKind::Semicolon);

        let label = label_tok.text.to_string();
        self.body
            .gotos
            .push((label.clone(), label_tok.span, label_tok.start));

        Ok(Stmt::Goto(GotoStmt {
            label,
            span: self.span_from(&start),
        }))
    }

    /// `return [expr] [;]`
    fn parse_return(&mut self) -> ParseResult<Stmt> {
        let start = self.advance();
        let value = if self.peek().kind.starts_expression() {
            let value_start = self.peek();
            let expr = self.parse_expression()?;
            if !self.body.is_function {
                return Err(self.error_at(
                    ErrorKind::InvalidSyntax {
                        message: format!(
                            "Procedure '{}' cannot return a value",
                            self.body.name
                        ),
                    },
                    &value_start,
                ));
            }
            Some(expr)
        } else {
            None
        };
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::Return(ReturnStmt {
            value,
            span: self.span_from(&start),
        }))
    }

    /// `if expr then Body [else Body]`
    fn parse_if(&mut self) -> ParseResult<Stmt> {
        let start = self.advance();
        let condition = self.parse_expression()?;
        self.consume(TokenKind::Then, "'then'")?;
        let then_branch = self.parse_body()?;
        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_body()?)
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(&start),
        }))
    }

    /// `while expr Body`
    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let start = self.advance();
        let condition = self.parse_expression()?;
        let body = self.parse_body()?;

        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            span: self.span_from(&start),
        }))
    }

    /// `for ( assign ; expr ; assign ) Body`
    fn parse_for(&mut self) -> ParseResult<Stmt> {
        let start = self.advance();
        self.consume(TokenKind::LeftParen, "'('")?;
        let init = self.parse_assignment()?;
        self.consume(TokenKind::Semicolon, "';'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "';'")?;
        let update = self.parse_assignment()?;
        self.consume(TokenKind::RightParen, "')'")?;
        let body = self.parse_body()?;

        Ok(Stmt::For(ForStmt {
            init: Box::new(init),
            condition,
            update: Box::new(update),
            body,
            span: self.span_from(&start),
        }))
    }

    /// `switch expr {case v {, v} : stmts} [otherwise [:] stmts] end [;]`
    fn parse_switch(&mut self) -> ParseResult<Stmt> {
        const ARM_END: &[TokenKind] = &[TokenKind::Case, TokenKind::Otherwise, TokenKind::End];

        let start = self.advance();
        let discriminant = self.parse_expression()?;

        let mut cases = Vec::new();
        while self.check(TokenKind::Case) {
            let case_start = self.advance();
            let mut values = vec![self.parse_expression()?];
            while self.match_token(TokenKind::Comma) {
                values.push(self.parse_expression()?);
            }
            self.consume(TokenKind::Colon, "':'")?;
            let body = self.nested_block(&case_start, |p| p.parse_statements_until(ARM_END))?;
            cases.push(SwitchCase {
                values,
                body,
                span: self.span_from(&case_start),
            });
        }

        let default = if self.check(TokenKind::Otherwise) {
            let otherwise = self.advance();
            self.match_token(TokenKind::Colon);
            Some(self.nested_block(&otherwise, |p| p.parse_statements_until(ARM_END))?)
        } else {
            None
        };

        if !self.check(TokenKind::End) {
            return Err(self.unexpected("'case', 'otherwise' or 'end'"));
        }
        self.advance();
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::Switch(SwitchStmt {
            discriminant,
            cases,
            default,
            span: self.span_from(&start),
        }))
    }

    /// `remote queue.callee(args) [;]`
    fn parse_async_call(&mut self) -> ParseResult<Stmt> {
        let start = self.advance();
        let queue = self.consume_ident("a queue name")?;
        self.consume(TokenKind::Dot, "'.'")?;
        let callee = self.consume_ident("a procedure name")?;
        let call = self.parse_call(callee)?;
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::AsyncCall(AsyncCallStmt {
            queue: queue.text.to_string(),
            call,
            span: self.span_from(&start),
        }))
    }

    /// `begin stmts end [;]` or a single statement, in a nested scope.
    pub(super) fn parse_body(&mut self) -> ParseResult<Block> {
        let start = self.peek();
        self.nested_block(&start, |p| {
            if p.match_token(TokenKind::Begin) {
                let stmts = p.parse_statements_until(&[TokenKind::End])?;
                p.consume(TokenKind::End, "'end'")?;
                p.match_token(TokenKind::Semicolon);
                Ok(stmts)
            } else {
                Ok(p.parse_stmt()?.into_iter().collect())
            }
        })
    }

    /// Run `parse` inside a fresh child scope one level deeper.
    fn nested_block(
        &mut self,
        start: &Token<'_>,
        parse: impl FnOnce(&mut Self) -> ParseResult<Vec<Stmt>>,
    ) -> ParseResult<Block> {
        let parent = self.body.scope;
        let scope = self.body.symbols.push_scope(parent);
        self.body.scope = scope;
        self.body.depth += 1;

        let result = parse(self);

        self.body.scope = parent;
        self.body.depth -= 1;

        Ok(Block {
            stmts: result?,
            scope,
            span: self.span_from(start),
        })
    }
}
