use super::types::Parser;
use crate::ast::*;
use crate::error::{ErrorKind, ParseResult};
use crate::lexer::{Token, TokenKind};
use crate::symbol::SymbolKind;
use text_size::TextRange;

fn join(left: &Expr, right: &Expr) -> TextRange {
    TextRange::new(left.span().start(), right.span().end())
}

/// Strip the delimiters and collapse doubled delimiter characters.
/// Backslash escapes are kept as written.
fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let Some(quote) = chars.next() else {
        return String::new();
    };
    let inner = chars.as_str();
    let inner = inner.strip_suffix(quote).unwrap_or(inner);

    let mut value = String::with_capacity(inner.len());
    let mut rest = inner.chars().peekable();
    while let Some(c) = rest.next() {
        value.push(c);
        if c == '\\' {
            if let Some(escaped) = rest.next() {
                value.push(escaped);
            }
        } else if c == quote && rest.peek() == Some(&quote) {
            rest.next();
        }
    }
    value
}

fn binary(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        op,
        span: join(&left, &right),
        left: Box::new(left),
        right: Box::new(right),
    })
}

impl<'src> Parser<'src> {
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_and()?;
        while self.match_token(TokenKind::Or) {
            let right = self.parse_and()?;
            left = binary(BinaryOp::Or, left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;
        while self.match_token(TokenKind::And) {
            let right = self.parse_comparison()?;
            left = binary(BinaryOp::And, left, right);
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::EqualEqual => BinaryOp::Eq,
                TokenKind::NotEqual => BinaryOp::NotEq,
                TokenKind::Less => BinaryOp::Lt,
                TokenKind::LessEqual => BinaryOp::LtE,
                TokenKind::Greater => BinaryOp::Gt,
                TokenKind::GreaterEqual => BinaryOp::GtE,
                _ => break,
            };
            self.advance();
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                TokenKind::Ampersand => BinaryOp::Concat,
                _ => break,
            };
            self.advance();
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let op = match self.peek().kind {
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Not | TokenKind::Bang => UnaryOp::Not,
            _ => return self.parse_postfix(),
        };
        let start = self.advance();
        let operand = self.parse_unary()?;
        Ok(Expr::Unary(UnaryExpr {
            op,
            span: TextRange::new(start.span.start(), operand.span().end()),
            operand: Box::new(operand),
        }))
    }

    /// Primary followed by any `.field` / `[index]` chain.
    pub(super) fn parse_postfix(&mut self) -> ParseResult<Expr> {
        let start = self.peek();
        let mut expr = self.parse_primary()?;
        loop {
            if self.match_token(TokenKind::Dot) {
                let field = self.consume_field()?;
                expr = Expr::Member(MemberExpr {
                    object: Box::new(expr),
                    field,
                    span: self.span_from(&start),
                });
            } else if self.match_token(TokenKind::LeftBracket) {
                let index = self.parse_expression()?;
                self.consume(TokenKind::RightBracket, "']'")?;
                expr = Expr::Index(IndexExpr {
                    array: Box::new(expr),
                    index: Box::new(index),
                    span: self.span_from(&start),
                });
            } else {
                return Ok(expr);
            }
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        let token = self.peek();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Number(NumberLit {
                    text: token.text.to_string(),
                    span: token.span,
                }))
            }
            TokenKind::StringLit => {
                self.advance();
                Ok(Expr::String(StringLit {
                    value: unquote(token.text),
                    span: token.span,
                }))
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(Expr::Boolean(BoolLit {
                    value: token.kind == TokenKind::True,
                    span: token.span,
                }))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.consume(TokenKind::RightParen, "')'")?;
                Ok(Expr::Paren(ParenExpr {
                    inner: Box::new(inner),
                    span: self.span_from(&token),
                }))
            }
            TokenKind::Ident => {
                self.advance();
                if self.check(TokenKind::LeftParen) {
                    Ok(Expr::Call(self.parse_call(token)?))
                } else {
                    Ok(Expr::Identifier(self.resolve_ident(&token)?))
                }
            }
            _ => Err(self.error_at(
                ErrorKind::ExpectedExpression {
                    found: token.describe(),
                },
                &token,
            )),
        }
    }

    /// `( args )` after an already consumed callee name, checked against
    /// the function table.
    pub(super) fn parse_call(&mut self, callee: Token<'src>) -> ParseResult<CallExpr> {
        self.consume(TokenKind::LeftParen, "'('")?;
        let mut args = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "')'")?;

        let Some(sig) = self.functions.get(callee.text) else {
            return Err(self.error_at(
                ErrorKind::UndeclaredFunction {
                    name: callee.text.to_string(),
                },
                &callee,
            ));
        };
        if sig.arity() != args.len() {
            return Err(self.error_at(
                ErrorKind::ArityMismatch {
                    name: sig.name.clone(),
                    expected: sig.arity(),
                    found: args.len(),
                },
                &callee,
            ));
        }

        Ok(CallExpr {
            callee: callee.text.to_string(),
            args,
            span: self.span_from(&callee),
        })
    }

    /// Resolve a variable reference in the live scope chain, falling back to
    /// the enclosing function's own name. The binding records the declaring
    /// scope as it stands at this point of the parse.
    fn resolve_ident(&self, token: &Token<'src>) -> ParseResult<Ident> {
        let binding = match self.body.symbols.find(self.body.scope, token.text) {
            Some((_, info)) if info.kind == SymbolKind::ReturnValue => Binding::ReturnValue,
            Some((scope, _)) => Binding::Variable(scope),
            None if self.body.is_function && token.text.eq_ignore_ascii_case(&self.body.name) => {
                Binding::ReturnValue
            }
            None => {
                return Err(self.error_at(
                    ErrorKind::UndeclaredVariable {
                        name: token.text.to_string(),
                    },
                    token,
                ));
            }
        };
        Ok(Ident {
            name: token.text.to_string(),
            binding,
            span: token.span,
        })
    }

    /// Record field names may collide with keywords (`r.date`).
    fn consume_field(&mut self) -> ParseResult<String> {
        let token = self.peek();
        let is_word = token
            .text
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if is_word && token.kind != TokenKind::StringLit {
            self.advance();
            Ok(token.text.to_string())
        } else {
            Err(self.unexpected("a field name"))
        }
    }
}
