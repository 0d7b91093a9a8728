//! Unified error type for all HAL front-end errors.

use super::codes::ErrorCode;
use super::context::ErrorContext;
use super::diagnostic::Diagnostic;
use super::kinds::ErrorKind;
use crate::lexer::Position;
use text_size::TextRange;
use thin_vec::ThinVec;

/// Unified error type for lexer and parser failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub span: TextRange,
    pub position: Position,
    pub notes: ThinVec<String>,
}

impl Error {
    /// Create a new error with the given kind and span.
    pub fn new(kind: ErrorKind, span: TextRange) -> Self {
        Self {
            kind,
            span,
            position: Position::default(),
            notes: ThinVec::new(),
        }
    }

    /// Attach the line/column of the offending token.
    pub fn at(mut self: Box<Self>, position: Position) -> Box<Self> {
        self.position = position;
        self
    }

    /// Add a note to the error.
    pub fn with_note(mut self: Box<Self>, note: String) -> Box<Self> {
        self.notes.push(note);
        self
    }

    /// Convert this error to a diagnostic for display.
    pub fn to_diagnostic(&self, source: &str) -> Diagnostic {
        let metadata = self.kind.metadata();

        let mut context = ErrorContext::new(source.to_string(), self.span);
        if let Some(suggestion) = metadata.suggestion {
            context = context.with_suggestion(suggestion.to_string());
        }
        for note in &self.notes {
            context.add_note(note.clone());
        }

        Diagnostic::new(metadata.severity, self.kind.format_message())
            .with_code(metadata.code)
            .with_error_type(metadata.error_type.to_string())
            .with_title(metadata.title.to_string())
            .with_context(context)
    }

    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        self.kind.metadata().code
    }

    /// Get the error category.
    pub fn category(&self) -> &'static str {
        self.kind.metadata().category.as_str()
    }

    /// Get the error type name.
    pub fn error_type(&self) -> &'static str {
        self.kind.metadata().error_type
    }

    /// Get the error title.
    pub fn title(&self) -> &'static str {
        self.kind.metadata().title
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        self.kind.format_message()
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} at {}",
            self.code(),
            self.kind.format_message(),
            self.position
        )
    }
}

impl std::error::Error for Error {}

/// Creates a new error with the given kind and span.
/// Returns a boxed error to keep Result types small.
#[inline]
pub fn error(kind: ErrorKind, span: TextRange) -> Box<Error> {
    Box::new(Error::new(kind, span))
}
