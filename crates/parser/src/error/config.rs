//! Error reporting configuration.

/// Configuration for error reporting behavior.
#[derive(Debug, Clone)]
pub struct ErrorConfig {
    /// Whether to show error codes
    pub show_codes: bool,
    /// Whether to show source context
    pub show_context: bool,
    /// Number of context lines to show
    pub context_lines: usize,
    /// Whether to use colored output
    pub use_colors: bool,
}

impl ErrorConfig {
    /// Create a new error configuration with defaults.
    pub fn new() -> Self {
        ErrorConfig {
            show_codes: true,
            show_context: true,
            context_lines: 2,
            use_colors: true,
        }
    }

    /// Create a minimal error configuration (codes only, no context).
    pub fn minimal() -> Self {
        ErrorConfig {
            show_codes: true,
            show_context: false,
            context_lines: 0,
            use_colors: false,
        }
    }

    /// Disable ANSI colors.
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self::new()
    }
}
