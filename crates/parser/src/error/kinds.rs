//! Error kind definitions for every failure the HAL front end reports.

/// Comprehensive error kind enum covering lexer and parser failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// No token pattern matches at this position
    InvalidCharacter { text: String },

    /// Unexpected token encountered during parsing
    UnexpectedToken { expected: String, found: String },

    /// An expression was required
    ExpectedExpression { found: String },

    /// Grammar violation not covered by a more specific kind
    InvalidSyntax { message: String },

    /// Name declared twice in the same scope
    DuplicateDeclaration { name: String },

    /// Subprogram declared twice
    DuplicateFunction { name: String },

    /// `external` combined with `global`
    IncompatibleModifiers { name: String },

    /// External declaration followed by a body
    ExternalWithBody { name: String },

    /// Non-external declaration without a body
    MissingBody { name: String },

    /// Parameter without a name in a non-external declaration
    MissingParameterName { function: String },

    /// `string` without a length in a local declaration
    MissingStringLength { name: String },

    /// Label declared twice in one body
    DuplicateLabel { name: String },

    /// Label inside a nested block
    NestedLabel { name: String },

    /// Identifier not visible in any enclosing scope
    UndeclaredVariable { name: String },

    /// Goto whose target label does not exist
    UndefinedLabel { name: String },

    /// Call with the wrong number of arguments
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Call to a name missing from the function table
    UndeclaredFunction { name: String },
}

impl ErrorKind {
    /// Format the error message with the kind's details.
    pub fn format_message(&self) -> String {
        match self {
            ErrorKind::InvalidCharacter { text } => {
                format!("Unrecognized input '{}'", text)
            }
            ErrorKind::UnexpectedToken { expected, found } => {
                format!("Expected {}, found {}", expected, found)
            }
            ErrorKind::ExpectedExpression { found } => {
                format!("Expected expression, found {}", found)
            }
            ErrorKind::InvalidSyntax { message } => message.clone(),
            ErrorKind::DuplicateDeclaration { name } => {
                format!("'{}' is already declared in this scope", name)
            }
            ErrorKind::DuplicateFunction { name } => {
                format!("Function or procedure '{}' is already declared", name)
            }
            ErrorKind::IncompatibleModifiers { name } => {
                format!("'{}' cannot be both external and global", name)
            }
            ErrorKind::ExternalWithBody { name } => {
                format!("External declaration '{}' cannot have a body", name)
            }
            ErrorKind::MissingBody { name } => {
                format!("'{}' requires a non-empty begin ... end body", name)
            }
            ErrorKind::MissingParameterName { function } => {
                format!("Parameter of '{}' requires a name", function)
            }
            ErrorKind::MissingStringLength { name } => {
                format!("Local string '{}' requires a length", name)
            }
            ErrorKind::DuplicateLabel { name } => {
                format!("Label '{}' is already defined", name)
            }
            ErrorKind::NestedLabel { name } => {
                format!("Label '{}' must appear at the top level of a body", name)
            }
            ErrorKind::UndeclaredVariable { name } => {
                format!("Undeclared variable '{}'", name)
            }
            ErrorKind::UndefinedLabel { name } => {
                format!("Goto targets undefined label '{}'", name)
            }
            ErrorKind::ArityMismatch {
                name,
                expected,
                found,
            } => format!(
                "'{}' expects {} argument{}, got {}",
                name,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            ErrorKind::UndeclaredFunction { name } => {
                format!("Call to undeclared function or procedure '{}'", name)
            }
        }
    }
}
