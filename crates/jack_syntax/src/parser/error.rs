use crate::lexer::LexingError;
use itertools::Itertools as _;
use jack_tokens::{Span, Spanned, Token, TokenKind};
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing
#[derive(Debug, thiserror::Error)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub location: Option<Span>,
    /// The grammar procedure that was active when parsing failed
    pub non_terminal: Option<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind,
        location: Option<Span>,
        non_terminal: Option<&'static str>,
    ) -> Self {
        Self {
            kind,
            location,
            non_terminal,
        }
    }

    /// An error for when `found` is not any of the `expected` constructs
    pub fn expected<I, S>(expected: I, found: Option<&Token>, non_terminal: &'static str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let expected = expected.into_iter().map(Into::into).collect();
        match found {
            Some(token) => Self::new(
                ErrorKind::ExpectedToken {
                    expected,
                    found: token.kind().clone(),
                },
                Some(token.span()),
                Some(non_terminal),
            ),
            None => Self::new(
                ErrorKind::UnexpectedEof { expected },
                None,
                Some(non_terminal),
            ),
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error")?;
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        write!(f, ": {}", self.kind)?;
        if let Some(non_terminal) = self.non_terminal {
            write!(f, " (while parsing {non_terminal})")?;
        }
        Ok(())
    }
}

impl From<LexingError> for SyntaxError {
    fn from(value: LexingError) -> Self {
        let location = value.location;
        Self::new(ErrorKind::Lex(value), Some(location), None)
    }
}

/// [SyntaxError] kind
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {}, found {found}", .expected.iter().join(" or "))]
    ExpectedToken {
        expected: Vec<String>,
        found: TokenKind,
    },
    #[error("expected {}, found end of input", .expected.iter().join(" or "))]
    UnexpectedEof { expected: Vec<String> },
    #[error("unexpected {0} after the end of the class")]
    TrailingTokens(TokenKind),
    #[error("source unit contains no tokens")]
    EmptyUnit,
    #[error(transparent)]
    Lex(#[from] LexingError),
}

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;
    use jack_tokens::Symbol;
    use test_log::test;

    #[test]
    fn test_expected_message() {
        let found = Token::new(Span::new(6, 1, 1, 7), TokenKind::Symbol(Symbol::LCurly));
        let error = SyntaxError::expected(["identifier"], Some(&found), "class");
        assert_eq!(
            error.to_string(),
            "syntax error at 1:7: expected identifier, found symbol '{' (while parsing class)"
        );
    }

    #[test]
    fn test_unexpected_eof_message() {
        let error = SyntaxError::expected(["'}'", "statement"], None, "subroutineBody");
        assert!(matches!(error.kind, ErrorKind::UnexpectedEof { .. }));
        assert_eq!(
            error.to_string(),
            "syntax error: expected '}' or statement, found end of input (while parsing subroutineBody)"
        );
    }
}
