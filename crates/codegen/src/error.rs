//! Codegen error types

use thiserror::Error;

/// Internal invariant breaches found while rendering.
///
/// The parser rejects undefined and nested labels, so these only surface
/// when an AST was built or rewritten by hand.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodegenError {
    #[error("Goto in '{subprogram}' targets unknown label '{label}'")]
    UnknownLabel { subprogram: String, label: String },

    #[error("Label '{label}' in '{subprogram}' is not at the top level of the body")]
    UnexpectedLabel { subprogram: String, label: String },
}

pub type CodegenResult<T> = Result<T, CodegenError>;
