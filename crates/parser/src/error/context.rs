//! Error context for rich diagnostics.

use text_size::TextRange;

/// Context information for an error.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// The source file name (if available)
    pub filename: Option<String>,
    /// The source code
    pub source: String,
    /// The error location
    pub span: TextRange,
    /// Suggestion for fixing the error
    pub suggestion: Option<String>,
    /// Extra notes shown under the snippet
    pub notes: Vec<String>,
}

impl ErrorContext {
    /// Create a new error context.
    pub fn new(source: String, span: TextRange) -> Self {
        ErrorContext {
            filename: None,
            source,
            span,
            suggestion: None,
            notes: Vec::new(),
        }
    }

    /// Set the filename.
    pub fn with_filename(mut self, filename: String) -> Self {
        self.filename = Some(filename);
        self
    }

    /// Add a suggestion for fixing the error.
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub fn add_note(&mut self, note: String) {
        self.notes.push(note);
    }

    fn start(&self) -> usize {
        usize::from(self.span.start()).min(self.source.len())
    }

    /// Get the line and column number for the error.
    pub fn line_and_column(&self) -> (usize, usize) {
        let start = self.start();
        let line = self.source[..start].chars().filter(|&c| c == '\n').count() + 1;
        let line_start = self.source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = self.source[line_start..start].chars().count() + 1;
        (line, col)
    }

    /// Get the line containing the error.
    pub fn error_line(&self) -> &str {
        let start = self.start();
        let line_start = self.source[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
        let line_end = self.source[start..]
            .find('\n')
            .map(|i| start + i)
            .unwrap_or(self.source.len());

        &self.source[line_start..line_end]
    }

    /// Get context lines around the error.
    pub fn context_lines(&self, num_lines: usize) -> Vec<(usize, String)> {
        let start = self.start();
        let lines: Vec<&str> = self.source.lines().collect();
        let error_line_num = self.source[..start].chars().filter(|&c| c == '\n').count();

        let start_line = error_line_num.saturating_sub(num_lines);
        let end_line = (error_line_num + num_lines + 1).min(lines.len());
        if start_line >= end_line {
            return Vec::new();
        }

        lines[start_line..end_line]
            .iter()
            .enumerate()
            .map(|(i, line)| (start_line + i + 1, line.to_string()))
            .collect()
    }
}
