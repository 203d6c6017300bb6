//! Lexical tokens.
//!
//! Tokens keep their raw source text so a tree can be rendered back to SQL
//! without the original buffer; decoded literal values live on the
//! `Literal` node that wraps them.

use std::fmt;

use obparse_types::{DialectMode, Span};
use serde::Serialize;

use crate::Keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// A word the active dialect classifies as a keyword (reserved or not).
    Keyword(Keyword),
    /// Unquoted identifier.
    Ident,
    /// Backtick (MySQL) or double-quote (Oracle) delimited identifier.
    QuotedIdent,
    /// `'...'`, MySQL `"..."`, Oracle `q'[...]'`.
    String,
    /// `N'...'`.
    NationalString,
    /// MySQL `_charset` prefix glued to the following string literal.
    CharsetIntroducer,
    /// `X'0A'` or `0x0A`.
    HexString,
    /// `B'01'` or `0b01`.
    BitString,
    Integer,
    /// `1.5`, `.5`, `1.`
    Decimal,
    /// Scientific notation `1e10`, `2.5E-3`.
    Float,
    /// Oracle `1.5f` / `1.5d`.
    BinaryFloat,
    /// `?`
    QuestionMark,
    /// Oracle `:name` or `:1`.
    NamedParam,
    /// `@name`, `@'name'`, `` @`name` ``.
    UserVariable,
    /// `@@name`, `@@global.name`, `@@session.name`.
    SystemVariable,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Ampersand,
    Pipe,
    Tilde,
    Bang,
    ShiftLeft,
    ShiftRight,
    Eq,
    /// `<=>`
    NullSafeEq,
    /// `!=`, `<>`, Oracle `^=` and `~=`.
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    /// `||`: OR in MySQL, concatenation in Oracle.
    DoublePipe,
    /// `&&`
    DoubleAmp,
    /// `:=`
    Assign,
    /// `->`
    Arrow,
    /// `->>`
    DoubleArrow,
    /// `=>`
    FatArrow,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,

    /// `/*+ ... */` directly after a hint-accepting keyword.
    HintComment,
    /// Text the lexer could not classify; always paired with a lexical error.
    Invalid,
    Eof,
}

impl TokenKind {
    /// Short label used in expected-token sets and error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Keyword(kw) => kw.as_str(),
            Self::Ident | Self::QuotedIdent => "identifier",
            Self::String | Self::NationalString => "string literal",
            Self::CharsetIntroducer => "charset introducer",
            Self::HexString => "hex literal",
            Self::BitString => "bit literal",
            Self::Integer => "integer literal",
            Self::Decimal | Self::Float | Self::BinaryFloat => "numeric literal",
            Self::QuestionMark => "'?'",
            Self::NamedParam => "bind variable",
            Self::UserVariable => "user variable",
            Self::SystemVariable => "system variable",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Caret => "'^'",
            Self::Ampersand => "'&'",
            Self::Pipe => "'|'",
            Self::Tilde => "'~'",
            Self::Bang => "'!'",
            Self::ShiftLeft => "'<<'",
            Self::ShiftRight => "'>>'",
            Self::Eq => "'='",
            Self::NullSafeEq => "'<=>'",
            Self::NotEq => "'<>'",
            Self::Lt => "'<'",
            Self::Le => "'<='",
            Self::Gt => "'>'",
            Self::Ge => "'>='",
            Self::DoublePipe => "'||'",
            Self::DoubleAmp => "'&&'",
            Self::Assign => "':='",
            Self::Arrow => "'->'",
            Self::DoubleArrow => "'->>'",
            Self::FatArrow => "'=>'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBracket => "'['",
            Self::RightBracket => "']'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::HintComment => "hint comment",
            Self::Invalid => "invalid token",
            Self::Eof => "end of input",
        }
    }

    #[must_use]
    pub const fn is_keyword(self, kw: Keyword) -> bool {
        matches!(self, Self::Keyword(k) if k as u16 == kw as u16)
    }

    /// Identifier-shaped tokens: unquoted identifiers and keywords.
    #[must_use]
    pub const fn is_word(self) -> bool {
        matches!(self, Self::Ident | Self::Keyword(_))
    }

    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::NationalString
                | Self::HexString
                | Self::BitString
                | Self::Integer
                | Self::Decimal
                | Self::Float
                | Self::BinaryFloat
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text, quotes and prefixes included.
    pub text: String,
    pub span: Span,
    /// 1-based line of the first character.
    pub line: u32,
    /// 1-based column of the first character.
    pub col: u32,
    /// Dialect the token was classified under.
    pub mode: DialectMode,
}

impl Token {
    #[must_use]
    pub const fn is_kw(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    /// True for a keyword token or an unquoted identifier spelled `word`.
    #[must_use]
    pub fn is_word(&self, word: &str) -> bool {
        self.kind.is_word() && self.text.eq_ignore_ascii_case(word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
