use crate::ast::*;
use crate::error::{Error, ErrorKind, ParseResult, error};
use crate::lexer::{Position, Token, TokenKind};
use crate::symbol::{FunctionTable, ScopeId, SymbolTable};
use indexmap::IndexMap;
use text_size::TextRange;

/// State for the subprogram body currently being parsed.
#[derive(Debug, Default)]
pub(super) struct BodyContext {
    /// Name of the enclosing subprogram as declared.
    pub(super) name: String,
    /// Functions may reference their own name as the return accumulator.
    pub(super) is_function: bool,
    pub(super) symbols: SymbolTable,
    pub(super) scope: ScopeId,
    /// Block nesting below the top-level statement list.
    pub(super) depth: usize,
    pub(super) labels: IndexMap<String, TextRange>,
    pub(super) gotos: Vec<(String, TextRange, Position)>,
}

/// Recursive-descent HAL parser.
///
/// Identifier and call checks run while parsing: every reference must
/// resolve in the live scope chain and every call must match a signature
/// already in the function table. The first violation aborts the parse.
pub struct Parser<'src> {
    pub(super) tokens: Vec<Token<'src>>,
    pub(super) current: usize,
    pub(super) functions: FunctionTable,
    pub(super) body: BodyContext,
}

impl<'src> Parser<'src> {
    /// Create a parser over `tokens` that registers into `functions`.
    pub fn new(tokens: Vec<Token<'src>>, functions: FunctionTable) -> Self {
        Parser {
            tokens,
            current: 0,
            functions,
            body: BodyContext::default(),
        }
    }

    /// Parse every top-level item until end of input.
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.parse_item()?);
        }
        Ok(Program { items })
    }

    /// Give back the function table, including everything registered so far.
    pub fn into_functions(self) -> FunctionTable {
        self.functions
    }

    pub(super) fn peek(&self) -> Token<'src> {
        self.peek_at(0)
    }

    pub(super) fn peek_at(&self, offset: usize) -> Token<'src> {
        let idx = (self.current + offset).min(self.tokens.len().saturating_sub(1));
        self.tokens[idx]
    }

    pub(super) fn prev(&self) -> Token<'src> {
        self.tokens[self.current.saturating_sub(1)]
    }

    pub(super) fn advance(&mut self) -> Token<'src> {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind`; `expected` names it in the error message.
    pub(super) fn consume(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token<'src>> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    pub(super) fn consume_ident(&mut self, expected: &str) -> ParseResult<Token<'src>> {
        self.consume(TokenKind::Ident, expected)
    }

    /// Error for the current token.
    pub(super) fn unexpected(&self, expected: &str) -> Box<Error> {
        let token = self.peek();
        self.error_at(
            ErrorKind::UnexpectedToken {
                expected: expected.to_string(),
                found: token.describe(),
            },
            &token,
        )
    }

    pub(super) fn error_at(&self, kind: ErrorKind, token: &Token<'_>) -> Box<Error> {
        error(kind, token.span).at(token.start)
    }

    /// Span from `start` up to the end of the last consumed token.
    pub(super) fn span_from(&self, start: &Token<'_>) -> TextRange {
        let end = self.prev().span.end().max(start.span.start());
        TextRange::new(start.span.start(), end)
    }
}
