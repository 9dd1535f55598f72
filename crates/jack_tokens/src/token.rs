//! A lexical token from a source unit

use crate::grammar::{Keyword, Symbol, TokenCategory};
use crate::spanned::{Span, Spanned};
use std::fmt::{Debug, Display, Formatter};

/// A lexical token from a source unit
#[derive(Clone)]
pub struct Token {
    span: Span,
    kind: TokenKind,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind) -> Self {
        Self { span, kind }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Takes the kind out of this token, dropping its location
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.kind, f)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl PartialEq<TokenKind> for Token {
    fn eq(&self, other: &TokenKind) -> bool {
        &self.kind == other
    }
}

/// The kind for a token, along with its value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Symbol(Symbol),
    IntegerConstant(Integer),
    /// The contents of a string constant, without its quotes
    StringConstant(String),
}

impl TokenKind {
    /// The lexical category of this token
    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Keyword(_) => TokenCategory::Keyword,
            TokenKind::Identifier(_) => TokenCategory::Identifier,
            TokenKind::Symbol(_) => TokenCategory::Symbol,
            TokenKind::IntegerConstant(_) => TokenCategory::IntegerConstant,
            TokenKind::StringConstant(_) => TokenCategory::StringConstant,
        }
    }

    /// The value of this token as it is rendered: string constants lose their quotes.
    pub fn value(&self) -> String {
        match self {
            TokenKind::StringConstant(s) => s.clone(),
            other => other.lexeme(),
        }
    }

    /// The exact spelling of this token in source
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Keyword(keyword) => keyword.as_str().to_string(),
            TokenKind::Identifier(id) => id.clone(),
            TokenKind::Symbol(symbol) => symbol.as_char().to_string(),
            TokenKind::IntegerConstant(i) => i.digits().to_string(),
            TokenKind::StringConstant(s) => format!("\"{s}\""),
        }
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == keyword)
    }

    pub fn is_symbol(&self, symbol: Symbol) -> bool {
        matches!(self, TokenKind::Symbol(s) if *s == symbol)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Keyword(k) => write!(f, "keyword '{k}'"),
            TokenKind::Identifier(id) => write!(f, "identifier '{id}'"),
            TokenKind::Symbol(s) => write!(f, "symbol '{s}'"),
            TokenKind::IntegerConstant(i) => write!(f, "integer constant {i}"),
            TokenKind::StringConstant(s) => write!(f, "string constant \"{s}\""),
        }
    }
}

/// An integer constant, keeping the digits it was written with.
///
/// `007` and `7` share a value but not a spelling, so they are different constants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    value: u16,
    digits: String,
}

impl Integer {
    /// Creates an integer constant from its value and the digits it was written with
    pub fn new(value: u16, digits: impl Into<String>) -> Self {
        Self {
            value,
            digits: digits.into(),
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    /// The digits exactly as they appeared in source
    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl From<u16> for Integer {
    fn from(value: u16) -> Self {
        Self::new(value, value.to_string())
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.digits)
    }
}

impl From<Keyword> for TokenKind {
    fn from(value: Keyword) -> Self {
        TokenKind::Keyword(value)
    }
}

impl From<Symbol> for TokenKind {
    fn from(value: Symbol) -> Self {
        TokenKind::Symbol(value)
    }
}

/// A trait to convert something back into the terminal tokens it was derived from
pub trait ToTokens {
    /// Gets the tokens, in source order
    fn to_tokens(&self) -> Vec<TokenKind>;
}

impl<T: ToTokens> ToTokens for Option<T> {
    fn to_tokens(&self) -> Vec<TokenKind> {
        match self {
            None => vec![],
            Some(s) => s.to_tokens(),
        }
    }
}

impl<T: ToTokens> ToTokens for Vec<T> {
    fn to_tokens(&self) -> Vec<TokenKind> {
        self.iter().flat_map(|t| t.to_tokens()).collect()
    }
}

impl ToTokens for Token {
    fn to_tokens(&self) -> Vec<TokenKind> {
        vec![self.kind.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_lexeme_and_value() {
        let s = TokenKind::StringConstant("hello // world".to_string());
        assert_eq!(s.lexeme(), "\"hello // world\"");
        assert_eq!(s.value(), "hello // world");
        assert_eq!(TokenKind::Symbol(Symbol::Lt).lexeme(), "<");
        assert_eq!(TokenKind::IntegerConstant(32767_u16.into()).lexeme(), "32767");
        assert_eq!(TokenKind::Keyword(Keyword::Class).lexeme(), "class");
    }

    #[test]
    fn test_integer_keeps_its_spelling() {
        let padded = TokenKind::IntegerConstant(Integer::new(7, "007"));
        assert_eq!(padded.lexeme(), "007");
        assert_eq!(padded.value(), "007");
        assert_ne!(padded, TokenKind::IntegerConstant(7_u16.into()));
        assert_eq!(padded.to_string(), "integer constant 007");
    }

    #[test]
    fn test_equality_ignores_span() {
        let a = Token::new(Span::new(0, 4, 1, 1), TokenKind::Identifier("Main".to_string()));
        let b = Token::new(Span::new(9, 4, 3, 2), TokenKind::Identifier("Main".to_string()));
        assert_eq!(a, b);
        assert_eq!(a, TokenKind::Identifier("Main".to_string()));
    }

    #[test]
    fn test_vec_to_tokens() {
        let tokens = vec![
            Token::new(Span::default(), Keyword::Class.into()),
            Token::new(Span::default(), Symbol::LCurly.into()),
        ];
        assert_eq!(
            tokens.to_tokens(),
            vec![TokenKind::Keyword(Keyword::Class), TokenKind::Symbol(Symbol::LCurly)]
        );
    }
}
