//! Diagnostic reporting for HAL errors.

use super::codes::{ErrorCode, Severity};
use super::context::ErrorContext;

/// A diagnostic report for one error.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Error severity
    pub severity: Severity,
    /// Error code
    pub code: Option<ErrorCode>,
    /// Error type name (e.g., "ParseError", "ArityError")
    pub error_type: Option<String>,
    /// Error title (short description)
    pub title: Option<String>,
    /// Primary error message
    pub message: String,
    /// Error context
    pub context: Option<ErrorContext>,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(severity: Severity, message: String) -> Self {
        Diagnostic {
            severity,
            code: None,
            error_type: None,
            title: None,
            message,
            context: None,
        }
    }

    /// Create an error diagnostic.
    pub fn error(message: String) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Set the error type name.
    pub fn with_error_type(mut self, error_type: String) -> Self {
        self.error_type = Some(error_type);
        self
    }

    /// Set the error title.
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the error context.
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Set the filename shown in the location line.
    pub fn with_filename(mut self, filename: String) -> Self {
        if let Some(context) = self.context.take() {
            self.context = Some(context.with_filename(filename));
        }
        self
    }
}
