//! Centralized error handling for the HAL front end.
//!
//! Every lexical, syntactic and semantic failure is an [`ErrorKind`] with a
//! stable code, a category and a source span. The first error aborts the
//! compile, so results carry a single boxed [`Error`].

pub mod catalog;
pub mod codes;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod formatter;
pub mod kinds;
pub mod types;

pub use catalog::{ErrorCategory, ErrorMetadata};
pub use codes::{ErrorCode, Severity};
pub use config::ErrorConfig;
pub use context::ErrorContext;
pub use diagnostic::Diagnostic;
pub use formatter::DiagnosticFormatter;
pub use kinds::ErrorKind;
pub use types::{Error, error};

/// Result type used throughout the lexer and parser.
pub type ParseResult<T> = Result<T, Box<Error>>;
