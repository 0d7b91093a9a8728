use super::typeref::TypeSite;
use super::types::{BodyContext, Parser};
use crate::ast::*;
use crate::error::{ErrorKind, ParseResult, error};
use crate::lexer::TokenKind;
use crate::symbol::{FunctionKind, FunctionSig, SymbolInfo, SymbolKind, SymbolTable};
use smallvec::SmallVec;

fn modifier_for(kind: TokenKind) -> Option<Modifier> {
    match kind {
        TokenKind::Global => Some(Modifier::Global),
        TokenKind::External => Some(Modifier::External),
        TokenKind::Updating => Some(Modifier::Updating),
        TokenKind::Inner => Some(Modifier::Inner),
        TokenKind::Remote => Some(Modifier::Remote),
        TokenKind::Outer => Some(Modifier::Outer),
        _ => None,
    }
}

impl<'src> Parser<'src> {
    /// `{modifier} (function [Type] | procedure) name [(params)] (body | [;])`
    pub(super) fn parse_item(&mut self) -> ParseResult<Item> {
        let start = self.peek();

        let mut modifiers = Modifiers::new();
        while let Some(modifier) = modifier_for(self.peek().kind) {
            self.advance();
            modifiers.push(modifier);
        }

        let is_function = match self.peek().kind {
            TokenKind::Function => true,
            TokenKind::Procedure => false,
            _ => return Err(self.unexpected("'function' or 'procedure'")),
        };
        self.advance();

        let return_type = if is_function && self.peek().kind.starts_type() {
            Some(self.parse_type(TypeSite::Return)?)
        } else {
            None
        };

        let name_tok = self.consume_ident("a subprogram name")?;
        let name = name_tok.text.to_string();
        let is_external = modifiers.contains(&Modifier::External);

        self.body = BodyContext {
            name: name.clone(),
            is_function,
            symbols: SymbolTable::new(),
            ..BodyContext::default()
        };
        if is_function && !is_external {
            let root = self.body.symbols.root();
            self.body
                .symbols
                .declare(
                    root,
                    &name,
                    SymbolInfo {
                        ty: return_type.clone().unwrap_or(TypeRef::INTEGER),
                        kind: SymbolKind::ReturnValue,
                        span: name_tok.span,
                    },
                )
                .map_err(|e| e.at(name_tok.start))?;
        }

        let params = if self.match_token(TokenKind::LeftParen) {
            let params = self.parse_params(&name, is_external)?;
            self.consume(TokenKind::RightParen, "')'")?;
            params
        } else {
            Vec::new()
        };

        if is_external && modifiers.contains(&Modifier::Global) {
            return Err(self.error_at(ErrorKind::IncompatibleModifiers { name }, &name_tok));
        }

        let kind = match (is_function, is_external) {
            (true, false) => FunctionKind::Function,
            (false, false) => FunctionKind::Procedure,
            (true, true) => FunctionKind::ExternalFunction,
            (false, true) => FunctionKind::ExternalProcedure,
        };
        self.functions
            .register(FunctionSig {
                name: name.clone(),
                kind,
                return_type: return_type.clone(),
                params: params.clone(),
                span: name_tok.span,
            })
            .map_err(|e| e.at(name_tok.start))?;

        if is_external {
            if self.check(TokenKind::Begin) {
                return Err(self.error_at(ErrorKind::ExternalWithBody { name }, &self.peek()));
            }
            self.match_token(TokenKind::Semicolon);

            let decl = ExternalDecl {
                name,
                return_type,
                params,
                modifiers,
                span: self.span_from(&start),
            };
            return Ok(if is_function {
                Item::ExternalFunction(decl)
            } else {
                Item::ExternalProcedure(decl)
            });
        }

        let body = self.parse_subprogram_body()?;
        let context = std::mem::take(&mut self.body);
        let subprogram = Subprogram {
            name,
            return_type,
            params,
            modifiers,
            body,
            symbols: context.symbols,
            span: self.span_from(&start),
        };

        Ok(if is_function {
            Item::Function(subprogram)
        } else {
            Item::Procedure(subprogram)
        })
    }

    /// Parameters are declared in the root scope as they are parsed.
    fn parse_params(&mut self, function: &str, is_external: bool) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();
        if self.check(TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            let start = self.peek();
            let mut modifiers = SmallVec::new();
            if self.match_token(TokenKind::Var) {
                modifiers.push(ParamModifier::ByRef);
            }
            if !self.peek().kind.starts_type() {
                return Err(self.unexpected("a parameter type"));
            }
            let ty = self.parse_type(TypeSite::Param)?;
            if ty.is_array() {
                modifiers.push(ParamModifier::Array);
            }

            let name = if self.check(TokenKind::Ident) {
                let name_tok = self.advance();
                if !is_external {
                    let root = self.body.symbols.root();
                    self.body
                        .symbols
                        .declare(
                            root,
                            name_tok.text,
                            SymbolInfo {
                                ty: ty.clone(),
                                kind: SymbolKind::Parameter,
                                span: name_tok.span,
                            },
                        )
                        .map_err(|e| e.at(name_tok.start))?;
                }
                Some(name_tok.text.to_string())
            } else if is_external {
                None
            } else {
                return Err(self.error_at(
                    ErrorKind::MissingParameterName {
                        function: function.to_string(),
                    },
                    &self.peek(),
                ));
            };

            params.push(Param {
                ty,
                name,
                modifiers,
                span: self.span_from(&start),
            });

            if !self.match_token(TokenKind::Comma) {
                return Ok(params);
            }
        }
    }

    /// `begin stmts end [;]` in the root scope; the statement list may not be empty.
    fn parse_subprogram_body(&mut self) -> ParseResult<Block> {
        let begin = self.peek();
        if !self.match_token(TokenKind::Begin) {
            return Err(self.error_at(
                ErrorKind::MissingBody {
                    name: self.body.name.clone(),
                },
                &begin,
            ));
        }

        let stmts = self.parse_statements_until(&[TokenKind::End])?;
        self.consume(TokenKind::End, "'end'")?;
        self.match_token(TokenKind::Semicolon);

        if stmts.is_empty() {
            return Err(self.error_at(
                ErrorKind::MissingBody {
                    name: self.body.name.clone(),
                },
                &begin,
            ));
        }

        for (label, span, position) in &self.body.gotos {
            if !self.body.labels.contains_key(label) {
                return Err(error(
                    ErrorKind::UndefinedLabel {
                        name: label.clone(),
                    },
                    *span,
                )
                .at(*position));
            }
        }

        Ok(Block {
            stmts,
            scope: self.body.symbols.root(),
            span: self.span_from(&begin),
        })
    }
}
