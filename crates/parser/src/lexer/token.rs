//! Token definition and types.

use logos::Logos;
use std::fmt;
use text_size::{TextRange, TextSize};

/// A 1-based line/column location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A positioned token borrowing its raw text from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: TextRange,
    pub start: Position,
    pub end: Position,
}

impl<'src> Token<'src> {
    pub fn new(
        kind: TokenKind,
        text: &'src str,
        span: TextRange,
        start: Position,
        end: Position,
    ) -> Self {
        Token {
            kind,
            text,
            span,
            start,
            end,
        }
    }

    pub fn offset(&self) -> TextSize {
        self.span.start()
    }

    /// Human-readable description used in diagnostics.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of file".to_string(),
            TokenKind::Ident => format!("identifier '{}'", self.text),
            TokenKind::Number => format!("number '{}'", self.text),
            TokenKind::StringLit => format!("string {}", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

/// Lexical token kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum TokenKind {
    // Keywords
    Otherwise,
    Procedure,
    Function,
    External,
    Updating,
    Global,
    Begin,
    End,
    If,
    Then,
    Else,
    For,
    While,
    Repeat,
    Goto,
    Var,
    Array,
    Record,
    Row,
    Of,
    Return,
    Switch,
    Case,
    Const,
    True,
    False,
    Null,
    Window,
    Remote,
    Inner,
    Outer,
    And,
    Or,
    Not,

    // Built-in type names
    Area,
    Boolean,
    Integer,
    LongInt,
    StringType,
    Val,
    ULong64,
    Date,
    Time,
    RoundMode,

    // Literals and names
    StringLit,
    Number,
    Ident,

    // Operators and punctuation
    EqualEqual,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    Less,
    Greater,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Dot,
    Comma,
    Colon,
    Semicolon,
    Ampersand,
    Bang,

    Eof,
}

impl TokenKind {
    /// Whether this token names one of the scalar built-in types.
    pub fn is_scalar_type(self) -> bool {
        matches!(
            self,
            TokenKind::Area
                | TokenKind::Boolean
                | TokenKind::Integer
                | TokenKind::LongInt
                | TokenKind::StringType
                | TokenKind::Val
                | TokenKind::ULong64
                | TokenKind::Date
                | TokenKind::Time
                | TokenKind::RoundMode
        )
    }

    /// Whether a type descriptor can start with this token.
    pub fn starts_type(self) -> bool {
        self.is_scalar_type()
            || matches!(self, TokenKind::Array | TokenKind::Record | TokenKind::Row)
    }

    /// Whether this token is a declaration modifier keyword.
    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            TokenKind::Global
                | TokenKind::External
                | TokenKind::Updating
                | TokenKind::Inner
                | TokenKind::Remote
                | TokenKind::Outer
        )
    }

    /// Whether an expression can start with this token.
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Number
                | TokenKind::StringLit
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LeftParen
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Not
                | TokenKind::Bang
        )
    }
}

/// Logos-based lexer token enum.
///
/// Keywords and type names match case-insensitively; logos prefers the
/// longest match, so `beginning` stays an identifier and `<=` wins over `<`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\f\r\n]+|//[^\n]*|/\*([^*]|\*+[^*/])*\*+/")]
pub enum LogosToken {
    #[token("otherwise", ignore(ascii_case))]
    Otherwise,
    #[token("procedure", ignore(ascii_case))]
    Procedure,
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("external", ignore(ascii_case))]
    External,
    #[token("updating", ignore(ascii_case))]
    Updating,
    #[token("global", ignore(ascii_case))]
    Global,
    #[token("begin", ignore(ascii_case))]
    Begin,
    #[token("end", ignore(ascii_case))]
    End,
    #[token("if", ignore(ascii_case))]
    If,
    #[token("then", ignore(ascii_case))]
    Then,
    #[token("else", ignore(ascii_case))]
    Else,
    #[token("for", ignore(ascii_case))]
    For,
    #[token("while", ignore(ascii_case))]
    While,
    #[token("repeat", ignore(ascii_case))]
    Repeat,
    #[token("goto", ignore(ascii_case))]
    Goto,
    #[token("var", ignore(ascii_case))]
    Var,
    #[token("array", ignore(ascii_case))]
    Array,
    #[token("record", ignore(ascii_case))]
    Record,
    #[token("row", ignore(ascii_case))]
    Row,
    #[token("of", ignore(ascii_case))]
    Of,
    #[token("return", ignore(ascii_case))]
    Return,
    #[token("switch", ignore(ascii_case))]
    Switch,
    #[token("case", ignore(ascii_case))]
    Case,
    #[token("const", ignore(ascii_case))]
    Const,
    #[token("true", ignore(ascii_case))]
    True,
    #[token("false", ignore(ascii_case))]
    False,
    #[token("null", ignore(ascii_case))]
    Null,
    #[token("window", ignore(ascii_case))]
    Window,
    #[token("remote", ignore(ascii_case))]
    Remote,
    #[token("inner", ignore(ascii_case))]
    Inner,
    #[token("outer", ignore(ascii_case))]
    Outer,
    #[token("and", ignore(ascii_case))]
    And,
    #[token("or", ignore(ascii_case))]
    Or,
    #[token("not", ignore(ascii_case))]
    Not,

    #[token("area", ignore(ascii_case))]
    Area,
    #[token("boolean", ignore(ascii_case))]
    Boolean,
    #[token("integer", ignore(ascii_case))]
    Integer,
    #[token("longint", ignore(ascii_case))]
    LongInt,
    #[token("string", ignore(ascii_case))]
    StringType,
    #[token("val", ignore(ascii_case))]
    Val,
    #[token("ulong64", ignore(ascii_case))]
    ULong64,
    #[token("date", ignore(ascii_case))]
    Date,
    #[token("time", ignore(ascii_case))]
    Time,
    #[token("roundmode", ignore(ascii_case))]
    RoundMode,

    // Quoted with ' or ", backslash escapes, doubled quote characters
    #[regex(r#"'(?:\\.|''|[^'\\])*'|"(?:\\.|""|[^"\\])*""#)]
    StringLit,

    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("==")]
    EqualEqual,
    #[token("<>")]
    #[token("!=")]
    NotEqual,
    #[token("<=")]
    LessEqual,
    #[token(">=")]
    GreaterEqual,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equal,
    #[token("<")]
    Less,
    #[token(">")]
    Greater,
    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token(".")]
    Dot,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token("&")]
    Ampersand,
    #[token("!")]
    Bang,
}

impl From<LogosToken> for TokenKind {
    fn from(tok: LogosToken) -> Self {
        match tok {
            LogosToken::Otherwise => TokenKind::Otherwise,
            LogosToken::Procedure => TokenKind::Procedure,
            LogosToken::Function => TokenKind::Function,
            LogosToken::External => TokenKind::External,
            LogosToken::Updating => TokenKind::Updating,
            LogosToken::Global => TokenKind::Global,
            LogosToken::Begin => TokenKind::Begin,
            LogosToken::End => TokenKind::End,
            LogosToken::If => TokenKind::If,
            LogosToken::Then => TokenKind::Then,
            LogosToken::Else => TokenKind::Else,
            LogosToken::For => TokenKind::For,
            LogosToken::While => TokenKind::While,
            LogosToken::Repeat => TokenKind::Repeat,
            LogosToken::Goto => TokenKind::Goto,
            LogosToken::Var => TokenKind::Var,
            LogosToken::Array => TokenKind::Array,
            LogosToken::Record => TokenKind::Record,
            LogosToken::Row => TokenKind::Row,
            LogosToken::Of => TokenKind::Of,
            LogosToken::Return => TokenKind::Return,
            LogosToken::Switch => TokenKind::Switch,
            LogosToken::Case => TokenKind::Case,
            LogosToken::Const => TokenKind::Const,
            LogosToken::True => TokenKind::True,
            LogosToken::False => TokenKind::False,
            LogosToken::Null => TokenKind::Null,
            LogosToken::Window => TokenKind::Window,
            LogosToken::Remote => TokenKind::Remote,
            LogosToken::Inner => TokenKind::Inner,
            LogosToken::Outer => TokenKind::Outer,
            LogosToken::And => TokenKind::And,
            LogosToken::Or => TokenKind::Or,
            LogosToken::Not => TokenKind::Not,

            LogosToken::Area => TokenKind::Area,
            LogosToken::Boolean => TokenKind::Boolean,
            LogosToken::Integer => TokenKind::Integer,
            LogosToken::LongInt => TokenKind::LongInt,
            LogosToken::StringType => TokenKind::StringType,
            LogosToken::Val => TokenKind::Val,
            LogosToken::ULong64 => TokenKind::ULong64,
            LogosToken::Date => TokenKind::Date,
            LogosToken::Time => TokenKind::Time,
            LogosToken::RoundMode => TokenKind::RoundMode,

            LogosToken::StringLit => TokenKind::StringLit,
            LogosToken::Number => TokenKind::Number,
            LogosToken::Ident => TokenKind::Ident,

            LogosToken::EqualEqual => TokenKind::EqualEqual,
            LogosToken::NotEqual => TokenKind::NotEqual,
            LogosToken::LessEqual => TokenKind::LessEqual,
            LogosToken::GreaterEqual => TokenKind::GreaterEqual,
            LogosToken::Plus => TokenKind::Plus,
            LogosToken::Minus => TokenKind::Minus,
            LogosToken::Star => TokenKind::Star,
            LogosToken::Slash => TokenKind::Slash,
            LogosToken::Equal => TokenKind::Equal,
            LogosToken::Less => TokenKind::Less,
            LogosToken::Greater => TokenKind::Greater,
            LogosToken::LeftParen => TokenKind::LeftParen,
            LogosToken::RightParen => TokenKind::RightParen,
            LogosToken::LeftBracket => TokenKind::LeftBracket,
            LogosToken::RightBracket => TokenKind::RightBracket,
            LogosToken::Dot => TokenKind::Dot,
            LogosToken::Comma => TokenKind::Comma,
            LogosToken::Colon => TokenKind::Colon,
            LogosToken::Semicolon => TokenKind::Semicolon,
            LogosToken::Ampersand => TokenKind::Ampersand,
            LogosToken::Bang => TokenKind::Bang,
        }
    }
}
