//! Static grammar tables: reserved words, the symbol set, and the order in which lexical
//! categories are tried.

use std::fmt::{Display, Formatter};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use thiserror::Error;

/// The reserved words of the language
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, EnumString, IntoStaticStr, EnumIter, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Class,
    Constructor,
    Function,
    Method,
    Field,
    Static,
    Var,
    Int,
    Char,
    Boolean,
    Void,
    True,
    False,
    Null,
    This,
    Let,
    Do,
    If,
    Else,
    While,
    Return,
}

impl Keyword {
    /// The reserved spelling of this keyword
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Iterates over every reserved word
pub fn keywords() -> impl Iterator<Item = Keyword> {
    Keyword::iter()
}

/// Every character that forms a single-character symbol
pub const SYMBOLS: &str = "{}()[].,;+-*/&|<>=~";

/// The largest value an integer constant may denote
pub const MAX_INTEGER_CONSTANT: u16 = 32767;

/// A single-character symbol
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, EnumIter)]
pub enum Symbol {
    LCurly,
    RCurly,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Dot,
    Comma,
    SemiColon,
    Plus,
    Minus,
    Star,
    Slash,
    Amp,
    Pipe,
    Lt,
    Gt,
    Eq,
    Tilde,
}

impl Symbol {
    pub fn as_char(&self) -> char {
        match self {
            Symbol::LCurly => '{',
            Symbol::RCurly => '}',
            Symbol::LParen => '(',
            Symbol::RParen => ')',
            Symbol::LBracket => '[',
            Symbol::RBracket => ']',
            Symbol::Dot => '.',
            Symbol::Comma => ',',
            Symbol::SemiColon => ';',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Star => '*',
            Symbol::Slash => '/',
            Symbol::Amp => '&',
            Symbol::Pipe => '|',
            Symbol::Lt => '<',
            Symbol::Gt => '>',
            Symbol::Eq => '=',
            Symbol::Tilde => '~',
        }
    }
}

impl TryFrom<char> for Symbol {
    type Error = NotASymbol;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Symbol::iter()
            .find(|symbol| symbol.as_char() == value)
            .ok_or(NotASymbol(value))
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A character outside of [SYMBOLS] was used as a symbol
#[derive(Debug, Error, PartialEq)]
#[error("{0:?} is not a symbol")]
pub struct NotASymbol(pub char);

/// The lexical categories a lexeme can be classified into
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, IntoStaticStr, EnumIter, strum::Display)]
pub enum TokenCategory {
    #[strum(serialize = "keyword")]
    Keyword,
    #[strum(serialize = "identifier")]
    Identifier,
    #[strum(serialize = "symbol")]
    Symbol,
    #[strum(serialize = "stringConstant")]
    StringConstant,
    #[strum(serialize = "integerConstant")]
    IntegerConstant,
}

impl TokenCategory {
    /// Classification order; the first category to match wins.
    ///
    /// Keywords must come before identifiers, otherwise every reserved word would be classified as
    /// an identifier.
    pub const PRIORITY: [TokenCategory; 5] = [
        TokenCategory::Keyword,
        TokenCategory::Identifier,
        TokenCategory::Symbol,
        TokenCategory::StringConstant,
        TokenCategory::IntegerConstant,
    ];

    /// The element name used when rendering a token of this category
    pub fn tag(&self) -> &'static str {
        self.into()
    }
}

/// Whether `c` can continue an identifier. A keyword must be followed by a character that is not.
pub fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whitespace separating lexemes
pub fn is_whitespace(c: char) -> bool {
    c.is_ascii_whitespace()
}
