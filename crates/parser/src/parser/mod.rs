//! Recursive-descent parser.

mod decl;
mod expr;
mod stmt;
mod typeref;
mod types;

pub use types::Parser;
