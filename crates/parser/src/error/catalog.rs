//! Error metadata catalog.
//!
//! Maps each [`ErrorKind`] to its code, severity, category, type name,
//! title and suggestion.

use super::codes::{ErrorCode, Severity};
use super::kinds::ErrorKind;

/// Error category for organizing different types of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Declaration,
    Reference,
    Arity,
}

impl ErrorCategory {
    /// Get the string representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Lexical => "Lexical",
            ErrorCategory::Syntax => "Syntax",
            ErrorCategory::Declaration => "Declaration",
            ErrorCategory::Reference => "Reference",
            ErrorCategory::Arity => "Arity",
        }
    }

    /// Error type name reported for this category.
    pub fn error_type(&self) -> &'static str {
        match self {
            ErrorCategory::Lexical => "LexError",
            ErrorCategory::Syntax => "ParseError",
            ErrorCategory::Declaration => "DeclarationError",
            ErrorCategory::Reference => "ReferenceError",
            ErrorCategory::Arity => "ArityError",
        }
    }
}

/// Metadata for each error kind.
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: ErrorCode,
    pub severity: Severity,
    pub category: ErrorCategory,
    pub error_type: &'static str,
    pub title: &'static str,
    pub suggestion: Option<&'static str>,
}

impl ErrorMetadata {
    fn new(
        code: ErrorCode,
        category: ErrorCategory,
        title: &'static str,
        suggestion: Option<&'static str>,
    ) -> Self {
        ErrorMetadata {
            code,
            severity: Severity::Error,
            category,
            error_type: category.error_type(),
            title,
            suggestion,
        }
    }
}

impl ErrorKind {
    /// Get metadata for this error kind.
    pub fn metadata(&self) -> ErrorMetadata {
        use ErrorCategory::*;

        match self {
            ErrorKind::InvalidCharacter { .. } => ErrorMetadata::new(
                ErrorCode::E1001,
                Lexical,
                "Invalid character in source code",
                Some("Remove the character or place it inside a string literal"),
            ),

            ErrorKind::UnexpectedToken { .. } => ErrorMetadata::new(
                ErrorCode::E2001,
                Syntax,
                "Unexpected token",
                Some("Look for a missing keyword, parenthesis or semicolon near this location"),
            ),
            ErrorKind::ExpectedExpression { .. } => ErrorMetadata::new(
                ErrorCode::E2002,
                Syntax,
                "Expected an expression",
                None,
            ),
            ErrorKind::InvalidSyntax { .. } => {
                ErrorMetadata::new(ErrorCode::E2003, Syntax, "Invalid syntax", None)
            }

            ErrorKind::DuplicateDeclaration { .. } => ErrorMetadata::new(
                ErrorCode::E3001,
                Declaration,
                "Duplicate declaration",
                Some("Rename one of the variables or move it into a nested block"),
            ),
            ErrorKind::DuplicateFunction { .. } => ErrorMetadata::new(
                ErrorCode::E3002,
                Declaration,
                "Duplicate function or procedure",
                Some("Each function and procedure name may be declared only once"),
            ),
            ErrorKind::IncompatibleModifiers { .. } => ErrorMetadata::new(
                ErrorCode::E3003,
                Declaration,
                "Incompatible modifiers",
                Some("Remove either 'external' or 'global'"),
            ),
            ErrorKind::ExternalWithBody { .. } => ErrorMetadata::new(
                ErrorCode::E3004,
                Declaration,
                "External declaration with a body",
                Some("Remove the body or the 'external' modifier"),
            ),
            ErrorKind::MissingBody { .. } => ErrorMetadata::new(
                ErrorCode::E3005,
                Declaration,
                "Missing body",
                Some("Add a begin ... end block with at least one statement"),
            ),
            ErrorKind::MissingParameterName { .. } => ErrorMetadata::new(
                ErrorCode::E3006,
                Declaration,
                "Missing parameter name",
                Some("Only external declarations may omit parameter names"),
            ),
            ErrorKind::MissingStringLength { .. } => ErrorMetadata::new(
                ErrorCode::E3007,
                Declaration,
                "Missing string length",
                Some("Declare local strings with a length, e.g. 'string 30 name;'"),
            ),
            ErrorKind::DuplicateLabel { .. } => ErrorMetadata::new(
                ErrorCode::E3008,
                Declaration,
                "Duplicate label",
                None,
            ),
            ErrorKind::NestedLabel { .. } => ErrorMetadata::new(
                ErrorCode::E3009,
                Declaration,
                "Label inside a nested block",
                Some("Move the label to the outermost begin ... end of the body"),
            ),

            ErrorKind::UndeclaredVariable { .. } => ErrorMetadata::new(
                ErrorCode::E4001,
                Reference,
                "Undeclared variable",
                Some("Declare the variable before using it"),
            ),
            ErrorKind::UndefinedLabel { .. } => ErrorMetadata::new(
                ErrorCode::E4002,
                Reference,
                "Undefined label",
                None,
            ),

            ErrorKind::ArityMismatch { .. } => ErrorMetadata::new(
                ErrorCode::E5001,
                Arity,
                "Wrong number of arguments",
                None,
            ),
            ErrorKind::UndeclaredFunction { .. } => ErrorMetadata::new(
                ErrorCode::E5002,
                Arity,
                "Undeclared function or procedure",
                Some("Declare it earlier in the file or in the primitives file"),
            ),
        }
    }
}
