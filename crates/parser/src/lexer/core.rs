//! Main lexer implementation for HAL source code.

use super::token::{LogosToken, Position, Token, TokenKind};
use crate::error::{ErrorKind, ParseResult, error};
use logos::Logos;
use text_size::{TextRange, TextSize};

/// Maximum number of characters of offending input quoted in a lexical error.
const MAX_ERROR_TEXT: usize = 20;

/// Lexer that turns HAL source text into positioned tokens.
///
/// Whitespace and comments are skipped by the logos table; the lexer itself
/// only maps byte offsets to line/column pairs and converts token kinds.
pub struct Lexer<'src> {
    source: &'src str,
    line: u32,
    column: u32,
    offset: usize,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Get the source text.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Advance the line/column cursor up to `target` bytes into the source.
    fn advance_to(&mut self, target: usize) -> Position {
        for ch in self.source[self.offset..target].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.offset = target;
        Position::new(self.line, self.column)
    }

    /// Tokenize the entire input.
    ///
    /// The returned stream always ends with an [`TokenKind::Eof`] token. The
    /// first unmatched character aborts tokenization.
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token<'src>>> {
        let mut tokens = Vec::new();
        let mut lex = LogosToken::lexer(self.source);

        while let Some(result) = lex.next() {
            let range = lex.span();
            let start = self.advance_to(range.start);
            let span = TextRange::new(
                TextSize::from(range.start as u32),
                TextSize::from(range.end as u32),
            );

            match result {
                Ok(tok) => {
                    let end = self.advance_to(range.end);
                    tokens.push(Token::new(
                        TokenKind::from(tok),
                        &self.source[range.clone()],
                        span,
                        start,
                        end,
                    ));
                }
                Err(()) => {
                    let text: String = self.source[range.start..]
                        .chars()
                        .take_while(|c| !c.is_whitespace())
                        .take(MAX_ERROR_TEXT)
                        .collect();
                    let text = if text.is_empty() {
                        self.source[range.clone()].to_string()
                    } else {
                        text
                    };
                    return Err(error(ErrorKind::InvalidCharacter { text }, span).at(start));
                }
            }
        }

        let eof = self.advance_to(self.source.len());
        let eof_offset = TextSize::from(self.source.len() as u32);
        tokens.push(Token::new(
            TokenKind::Eof,
            "",
            TextRange::empty(eof_offset),
            eof,
            eof,
        ));
        Ok(tokens)
    }
}

/// Tokenize `source` in one call.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token<'_>>> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("BEGIN End gOtO"),
            vec![TokenKind::Begin, TokenKind::End, TokenKind::Goto, TokenKind::Eof]
        );
    }

    #[test]
    fn test_keyword_prefix_stays_identifier() {
        assert_eq!(
            kinds("beginning integers"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_multi_char_operators_win() {
        assert_eq!(
            kinds("<= >= <> != == < ="),
            vec![
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::NotEqual,
                TokenKind::NotEqual,
                TokenKind::EqualEqual,
                TokenKind::Less,
                TokenKind::Equal,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_advance_position() {
        let tokens = tokenize("// header\n/* a\n b */ x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].start, Position::new(3, 7));
    }

    #[test]
    fn test_string_literals() {
        let tokens = tokenize(r#"'it''s' "say \"hi\"""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLit);
        assert_eq!(tokens[0].text, "'it''s'");
        assert_eq!(tokens[1].kind, TokenKind::StringLit);
    }

    #[test]
    fn test_numbers() {
        let tokens = tokenize("42 3.14 7.").unwrap();
        assert_eq!(tokens[0].text, "42");
        assert_eq!(tokens[1].text, "3.14");
        assert_eq!(tokens[2].text, "7.");
        assert!(tokens[..3].iter().all(|t| t.kind == TokenKind::Number));
    }

    #[test]
    fn test_invalid_character_reports_position() {
        let err = tokenize("x = 1;\n  y = @oops").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidCharacter { ref text } if text == "@oops"));
        assert_eq!(err.position, Position::new(2, 7));
    }

    #[test]
    fn test_ends_with_eof() {
        let tokens = tokenize("").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }
}
