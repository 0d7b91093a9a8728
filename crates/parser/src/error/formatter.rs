//! Error formatting and display.

use super::codes::Severity;
use super::config::ErrorConfig;
use super::diagnostic::Diagnostic;
use owo_colors::{OwoColorize, Style};

/// Formatter for diagnostic messages.
pub struct DiagnosticFormatter {
    config: ErrorConfig,
}

impl DiagnosticFormatter {
    /// Create a new formatter with the given configuration.
    pub fn new(config: ErrorConfig) -> Self {
        DiagnosticFormatter { config }
    }

    fn paint(&self, text: &str, style: Style) -> String {
        if self.config.use_colors {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a diagnostic for display.
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();

        // Header: "Error: ParseError [E2001]"
        let (label, style) = match diagnostic.severity {
            Severity::Error => ("Error", Style::new().bold().red()),
            Severity::Warning => ("Warning", Style::new().bold().yellow()),
            Severity::Info => ("Info", Style::new().bold().cyan()),
        };
        output.push_str(&self.paint(label, style));
        if let Some(error_type) = &diagnostic.error_type {
            output.push_str(": ");
            output.push_str(&self.paint(error_type, Style::new().bold()));
        }
        if self.config.show_codes
            && let Some(code) = &diagnostic.code
        {
            output.push_str(&format!(
                " [{}]",
                self.paint(&code.to_string(), Style::new().dimmed())
            ));
        }
        output.push('\n');

        let bar = self.paint("|", Style::new().blue());
        output.push_str(&format!("  {}\n", bar));
        output.push_str(&format!(
            "  {} {}: {}\n",
            bar,
            self.paint("Message", Style::new().bold()),
            diagnostic.message
        ));

        let Some(context) = &diagnostic.context else {
            return output;
        };

        let (line, col) = context.line_and_column();
        let location = match &context.filename {
            Some(filename) => format!("{}:{}:{}", filename, line, col),
            None => format!("line {}, column {}", line, col),
        };
        output.push_str(&format!("  {}\n", bar));
        output.push_str(&format!(
            "  +--> {}: {}\n",
            self.paint("Location", Style::new().cyan().bold()),
            location
        ));

        if self.config.show_context {
            output.push_str(&format!("  {}\n", bar));
            let start: usize = usize::from(context.span.start()).min(context.source.len());
            let end: usize = usize::from(context.span.end()).min(context.source.len());
            let length = context.source[start..end].chars().count().max(1);

            for (line_num, line_text) in context.context_lines(self.config.context_lines) {
                if line_num == line {
                    output.push_str(&format!("  |{:5} | {}\n", line_num, line_text));
                    output.push_str(&format!(
                        "  |      | {}{}\n",
                        " ".repeat(col - 1),
                        self.paint(&"^".repeat(length), Style::new().bright_yellow().bold())
                    ));
                } else {
                    output.push_str(&format!(
                        "  |{:5} | {}\n",
                        line_num,
                        self.paint(&line_text, Style::new().dimmed())
                    ));
                }
            }
            output.push_str(&format!("  {}\n", bar));
        }

        for note in &context.notes {
            output.push_str(&format!(
                "  = {}: {}\n",
                self.paint("note", Style::new().cyan().bold()),
                note
            ));
        }

        if let Some(suggestion) = &context.suggestion {
            output.push_str(&format!(
                "  +--> {}: {}\n",
                self.paint("Suggestion", Style::new().green().bold()),
                suggestion
            ));
        }

        output
    }

    /// Format multiple diagnostics.
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| self.format(d))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::new(ErrorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, error};
    use text_size::{TextRange, TextSize};

    #[test]
    fn test_plain_report_contains_code_and_snippet() {
        let source = "procedure p\nbegin\n  y = 1;\nend;";
        let span = TextRange::at(TextSize::from(20), TextSize::from(1));
        let err = error(
            ErrorKind::UndeclaredVariable {
                name: "y".to_string(),
            },
            span,
        );
        let formatter = DiagnosticFormatter::new(ErrorConfig::default().without_colors());
        let report = formatter.format(&err.to_diagnostic(source));

        assert!(report.starts_with("Error: ReferenceError [E4001]"));
        assert!(report.contains("Undeclared variable 'y'"));
        assert!(report.contains("line 3, column 3"));
        assert!(report.contains("    3 |   y = 1;"));
        assert!(!report.contains('\u{1b}'));
    }

    #[test]
    fn test_minimal_config_omits_snippet() {
        let source = "x";
        let err = error(
            ErrorKind::InvalidCharacter {
                text: "x".to_string(),
            },
            TextRange::at(TextSize::from(0), TextSize::from(1)),
        );
        let report = DiagnosticFormatter::new(ErrorConfig::minimal()).format(&err.to_diagnostic(source));
        assert!(report.contains("LexError"));
        assert!(!report.contains('^'));
    }
}
