//! Error codes and severities for HAL diagnostics.

/// Error severity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational message
    Info,
    /// Warning that doesn't prevent compilation
    Warning,
    /// Error that aborts compilation
    Error,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // ===== Lexical Errors (E1xxx) =====
    E1001, // Invalid character

    // ===== Syntax Errors (E2xxx) =====
    E2001, // Unexpected token
    E2002, // Expected expression
    E2003, // Invalid syntax

    // ===== Declaration Errors (E3xxx) =====
    E3001, // Duplicate declaration
    E3002, // Duplicate function
    E3003, // Incompatible modifiers
    E3004, // External with body
    E3005, // Missing body
    E3006, // Missing parameter name
    E3007, // Missing string length
    E3008, // Duplicate label
    E3009, // Nested label

    // ===== Reference Errors (E4xxx) =====
    E4001, // Undeclared variable
    E4002, // Undefined label

    // ===== Arity Errors (E5xxx) =====
    E5001, // Arity mismatch
    E5002, // Undeclared function
}

impl ErrorCode {
    /// Numeric part of the code.
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::E1001 => 1001,
            ErrorCode::E2001 => 2001,
            ErrorCode::E2002 => 2002,
            ErrorCode::E2003 => 2003,
            ErrorCode::E3001 => 3001,
            ErrorCode::E3002 => 3002,
            ErrorCode::E3003 => 3003,
            ErrorCode::E3004 => 3004,
            ErrorCode::E3005 => 3005,
            ErrorCode::E3006 => 3006,
            ErrorCode::E3007 => 3007,
            ErrorCode::E3008 => 3008,
            ErrorCode::E3009 => 3009,
            ErrorCode::E4001 => 4001,
            ErrorCode::E4002 => 4002,
            ErrorCode::E5001 => 5001,
            ErrorCode::E5002 => 5002,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}
