//! HAL front end: lexer, recursive-descent parser and scoped tables.
//!
//! Parsing and checking happen in one pass. Every identifier must resolve
//! in the live block-scoped symbol table and every call must match a
//! signature already registered in the [`FunctionTable`], so a program that
//! parses is known to satisfy declaration-before-use and call arity.
//!
//! The function table is an explicit value. A compile threads one table
//! through the primitives file and then the user file:
//!
//! ```
//! use hal_parser::{parse, parse_with_functions};
//!
//! let builtins = parse("external function integer len(string s);").unwrap();
//! let output = parse_with_functions(
//!     "function integer size(string s) begin return len(s); end;",
//!     builtins.functions,
//! )
//! .unwrap();
//!
//! assert_eq!(output.program.items.len(), 1);
//! assert_eq!(output.functions.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symbol;
pub mod visitor;

pub use ast::{Expr, Item, Program, Stmt};
pub use error::{Diagnostic, DiagnosticFormatter, Error, ErrorConfig, ErrorKind, ParseResult};
pub use lexer::{Lexer, Position, Token, TokenKind, tokenize};
pub use parser::Parser;
pub use symbol::{FunctionKind, FunctionSig, FunctionTable, SymbolTable};
pub use visitor::Visitor;

/// A parsed program together with the function table it was checked against.
#[derive(Debug, Clone)]
pub struct ParseOutput {
    pub program: Program,
    /// Every signature known after parsing, including those passed in.
    pub functions: FunctionTable,
}

/// Parse `source` with an empty function table.
pub fn parse(source: &str) -> ParseResult<ParseOutput> {
    parse_with_functions(source, FunctionTable::new())
}

/// Parse `source`, resolving calls against (and registering into) `functions`.
pub fn parse_with_functions(source: &str, functions: FunctionTable) -> ParseResult<ParseOutput> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens, functions);
    let program = parser.parse_program()?;
    Ok(ParseOutput {
        program,
        functions: parser.into_functions(),
    })
}
