use super::types::Parser;
use crate::ast::{ScalarType, TypeRef};
use crate::error::{ErrorKind, ParseResult};
use crate::lexer::TokenKind;

/// Where a type descriptor appears; only locals must give string lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum TypeSite {
    Local,
    Param,
    Return,
}

fn scalar_for(kind: TokenKind) -> Option<ScalarType> {
    match kind {
        TokenKind::Area => Some(ScalarType::Area),
        TokenKind::Boolean => Some(ScalarType::Boolean),
        TokenKind::Integer => Some(ScalarType::Integer),
        TokenKind::LongInt => Some(ScalarType::LongInt),
        TokenKind::Val => Some(ScalarType::Val),
        TokenKind::ULong64 => Some(ScalarType::ULong64),
        TokenKind::Date => Some(ScalarType::Date),
        TokenKind::Time => Some(ScalarType::Time),
        TokenKind::RoundMode => Some(ScalarType::RoundMode),
        _ => None,
    }
}

impl<'src> Parser<'src> {
    /// `array [of] T | record Name | row Name | string [N] | scalar`
    pub(super) fn parse_type(&mut self, site: TypeSite) -> ParseResult<TypeRef> {
        let token = self.peek();
        if let Some(scalar) = scalar_for(token.kind) {
            self.advance();
            return Ok(TypeRef::Scalar(scalar));
        }

        match token.kind {
            TokenKind::Array => {
                self.advance();
                self.match_token(TokenKind::Of);
                if !self.peek().kind.starts_type() {
                    return Err(self.unexpected("an array element type"));
                }
                Ok(TypeRef::Array(Box::new(self.parse_type(site)?)))
            }
            TokenKind::Record => {
                self.advance();
                let name = self.consume_ident("a record name")?;
                Ok(TypeRef::Record(name.text.to_string()))
            }
            TokenKind::Row => {
                self.advance();
                let name = self.consume_ident("a row name")?;
                Ok(TypeRef::Row(name.text.to_string()))
            }
            TokenKind::StringType => {
                self.advance();
                if self.check(TokenKind::Number) {
                    let length = self.advance();
                    let value = length.text.parse::<u32>().map_err(|_| {
                        self.error_at(
                            ErrorKind::InvalidSyntax {
                                message: format!(
                                    "String length must be a whole number, found '{}'",
                                    length.text
                                ),
                            },
                            &length,
                        )
                    })?;
                    Ok(TypeRef::String(Some(value)))
                } else if site == TypeSite::Local {
                    let next = self.peek();
                    let name = if next.kind == TokenKind::Ident {
                        next.text.to_string()
                    } else {
                        "string".to_string()
                    };
                    Err(self.error_at(ErrorKind::MissingStringLength { name }, &next))
                } else {
                    Ok(TypeRef::String(None))
                }
            }
            _ => Err(self.unexpected("a type")),
        }
    }
}
