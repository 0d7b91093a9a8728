//! Abstract Syntax Tree (AST) definition.

pub mod display;
pub mod expr;
pub mod nodes;
pub mod ops;
pub mod types;

pub use expr::*;
pub use nodes::*;
pub use ops::{BinaryOp, UnaryOp};
pub use types::{ScalarType, TypeRef};
