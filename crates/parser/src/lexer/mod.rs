mod core;
mod token;

pub use core::{Lexer, tokenize};
pub use token::{LogosToken, Position, Token, TokenKind};
