//! Scoped symbol tables and the per-compile function table.

mod functions;
mod scope;

pub use functions::{FunctionKind, FunctionSig, FunctionTable};
pub use scope::{ScopeId, SymbolInfo, SymbolKind, SymbolTable};
