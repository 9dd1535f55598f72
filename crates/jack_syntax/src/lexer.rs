//! Responsible with turning comment-stripped source text into a stream of tokens

use crate::comments::strip_comments;
use crate::lexer::token_parsing::{classify, Unclassified};
use jack_tokens::grammar::{is_whitespace, MAX_INTEGER_CONSTANT};
use jack_tokens::spanned::advance_position;
use jack_tokens::{Span, Spanned, Token};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::trace;

mod token_parsing;

/// How much of the unconsumed text is kept in a [LexingError]
const REMAINDER_PREVIEW: usize = 32;

/// A pull-based stream of tokens over a single source unit.
///
/// The stream keeps the most recently classified, not yet consumed token. [peek](Self::peek)
/// classifies without moving the cursor, [consume_current](Self::consume_current) commits the
/// cursor past the span of that classification, and [advance](Self::advance) does both.
///
/// # Examples
/// ```
/// # use jack_syntax::lexer::TokenStream;
/// # use jack_tokens::{Keyword, TokenKind};
/// let mut stream = TokenStream::new("class Main {}");
/// assert_eq!(stream.peek().unwrap().map(|t| t.kind().clone()), Some(TokenKind::Keyword(Keyword::Class)));
/// assert_eq!(stream.advance().unwrap().map(|t| t.kind().clone()), Some(TokenKind::Keyword(Keyword::Class)));
/// assert!(stream.has_more_tokens());
/// ```
#[derive(Debug)]
pub struct TokenStream {
    src: String,
    cursor: usize,
    line: usize,
    column: usize,
    pending: Option<Pending>,
}

/// A classified token and the position just past its lexeme
#[derive(Debug)]
struct Pending {
    token: Token,
    end: usize,
    end_line: usize,
    end_column: usize,
}

impl TokenStream {
    /// Creates a stream over text that has already had its comments removed
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            src: text.into(),
            cursor: 0,
            line: 1,
            column: 1,
            pending: None,
        }
    }

    /// Creates a stream over raw source text, stripping its comments first
    pub fn from_source(src: &str) -> Self {
        Self::new(strip_comments(src))
    }

    /// The text that has not been consumed yet
    pub fn remaining(&self) -> &str {
        &self.src[self.cursor..]
    }

    /// The number of bytes consumed so far
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// True iff any characters remain after discarding leading whitespace
    pub fn has_more_tokens(&self) -> bool {
        !self.remaining().trim_start_matches(is_whitespace).is_empty()
    }

    /// Classifies the next token without consuming it.
    ///
    /// Returns `Ok(None)` once the stream is exhausted. Calling this repeatedly without consuming
    /// always yields the same token.
    pub fn peek(&mut self) -> LexResult<Option<&Token>> {
        if self.pending.is_none() {
            self.pending = self.classify_next()?;
        }
        Ok(self.pending.as_ref().map(|pending| &pending.token))
    }

    /// Classifies and consumes the next token
    pub fn advance(&mut self) -> LexResult<Option<Token>> {
        self.peek()?;
        Ok(self.consume_current())
    }

    /// Commits the cursor past the most recently classified token and returns it.
    ///
    /// Returns `None`, leaving the cursor where it was, if nothing has been classified since the
    /// last consume.
    pub fn consume_current(&mut self) -> Option<Token> {
        let pending = self.pending.take()?;
        trace!("consumed {:?} at {}", pending.token, pending.token.span());
        self.cursor = pending.end;
        self.line = pending.end_line;
        self.column = pending.end_column;
        Some(pending.token)
    }

    /// Consumes the next token only if `predicate` accepts it
    pub fn consume_if<F>(&mut self, predicate: F) -> LexResult<Option<Token>>
    where
        F: FnOnce(&Token) -> bool,
    {
        let should_consume = self.peek()?.map(predicate).unwrap_or(false);
        if should_consume {
            Ok(self.consume_current())
        } else {
            Ok(None)
        }
    }

    fn classify_next(&self) -> LexResult<Option<Pending>> {
        let remaining = self.remaining();
        let trimmed = remaining.trim_start_matches(is_whitespace);
        if trimmed.is_empty() {
            return Ok(None);
        }
        let skipped = &remaining[..remaining.len() - trimmed.len()];
        let offset = self.cursor + skipped.len();
        let (line, column) = advance_position(self.line, self.column, skipped);

        let (len, kind) = classify(trimmed).map_err(|unclassified| {
            let span = Span::new(offset, 0, line, column);
            LexingError::new(unclassified.into(), span, trimmed)
        })?;
        let lexeme = &trimmed[..len];
        let (end_line, end_column) = advance_position(line, column, lexeme);
        let token = Token::new(Span::new(offset, len, line, column), kind);
        trace!("classified {token:?} at {line}:{column}");

        Ok(Some(Pending {
            token,
            end: offset + len,
            end_line,
            end_column,
        }))
    }
}

impl Iterator for TokenStream {
    type Item = LexResult<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().transpose()
    }
}

/// Strips comments from `src` and tokenizes all of it
pub fn tokenize(src: &str) -> LexResult<Vec<Token>> {
    TokenStream::from_source(src).collect()
}

pub type LexResult<T> = Result<T, LexingError>;

/// No lexical category matched the text at some position
#[derive(Debug, Error, PartialEq)]
pub struct LexingError {
    pub kind: LexingErrorKind,
    pub location: Span,
    /// The start of the unconsumed text, up to the end of its line
    pub remainder: String,
}

impl LexingError {
    fn new(kind: LexingErrorKind, location: Span, remaining: &str) -> Self {
        let remainder = remaining
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(REMAINDER_PREVIEW)
            .collect();
        Self {
            kind,
            location,
            remainder,
        }
    }
}

impl Display for LexingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lexical error at {}: {} near {:?}",
            self.location, self.kind, self.remainder
        )
    }
}

/// [LexingError] kind
#[derive(Debug, Error, PartialEq)]
pub enum LexingErrorKind {
    #[error("no token matches")]
    NoMatch,
    #[error("unterminated string constant")]
    UnterminatedString,
    #[error("integer constant {0} is larger than {max}", max = MAX_INTEGER_CONSTANT)]
    IntegerOutOfRange(String),
}

impl From<Unclassified> for LexingErrorKind {
    fn from(value: Unclassified) -> Self {
        match value {
            Unclassified::NoMatch => LexingErrorKind::NoMatch,
            Unclassified::UnterminatedString => LexingErrorKind::UnterminatedString,
            Unclassified::IntegerOutOfRange(digits) => LexingErrorKind::IntegerOutOfRange(digits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_tokens::{Keyword, Symbol, TokenKind};
    use test_log::test;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src)
            .unwrap_or_else(|e| panic!("{e}"))
            .into_iter()
            .map(Token::into_kind)
            .collect()
    }

    #[test]
    fn test_tokenize_empty_class() {
        assert_eq!(
            kinds("class Main { }"),
            vec![
                TokenKind::Keyword(Keyword::Class),
                TokenKind::Identifier("Main".to_string()),
                TokenKind::Symbol(Symbol::LCurly),
                TokenKind::Symbol(Symbol::RCurly),
            ]
        );
    }

    #[test]
    fn test_peek_is_idempotent() {
        let mut stream = TokenStream::new("  let x");
        let first = stream.peek().unwrap().cloned();
        let second = stream.peek().unwrap().cloned();
        assert_eq!(first, second);
        assert_eq!(stream.cursor(), 0, "peeking must not move the cursor");
        assert_eq!(first.map(Token::into_kind), Some(TokenKind::Keyword(Keyword::Let)));
    }

    #[test]
    fn test_consume_moves_past_exactly_the_lexeme() {
        let mut stream = TokenStream::new("  let x");
        stream.peek().unwrap();
        let token = stream.consume_current().expect("a token was classified");
        assert_eq!(token, TokenKind::Keyword(Keyword::Let));
        assert_eq!(stream.cursor(), 5);
        assert_eq!(stream.remaining(), " x");
    }

    #[test]
    fn test_consume_without_classification() {
        let mut stream = TokenStream::new("let x");
        assert!(stream.consume_current().is_none());
        assert_eq!(stream.cursor(), 0);
    }

    #[test]
    fn test_consume_if() {
        let mut stream = TokenStream::new("let x = 1.0;");
        assert!(stream
            .consume_if(|tok| tok.kind().is_symbol(Symbol::Eq))
            .unwrap()
            .is_none());
        assert!(stream
            .consume_if(|tok| tok.kind().is_keyword(Keyword::Let))
            .unwrap()
            .is_some());
    }

    #[test]
    fn test_has_more_tokens() {
        let mut stream = TokenStream::new("x \n\t ");
        assert!(stream.has_more_tokens());
        stream.advance().unwrap();
        assert!(!stream.has_more_tokens());
        assert!(stream.peek().unwrap().is_none());
        assert!(stream.advance().unwrap().is_none());
    }

    #[test]
    fn test_spans() {
        let tokens = tokenize("class Main {\n  field int x; // x\n}").unwrap();
        let field = &tokens[3];
        assert_eq!(field, &TokenKind::Keyword(Keyword::Field));
        assert_eq!(field.span(), Span::new(15, 5, 2, 3));
        let close = tokens.last().unwrap();
        assert_eq!((close.span().line(), close.span().column()), (3, 1));
    }

    #[test]
    fn test_unterminated_string_stops_the_stream() {
        let mut stream = TokenStream::new("let s = \"abc");
        for _ in 0..3 {
            stream.advance().unwrap();
        }
        let err = stream.advance().unwrap_err();
        assert_eq!(err.kind, LexingErrorKind::UnterminatedString);
        assert_eq!(err.remainder, "\"abc");
        assert_eq!(err.location.column(), 9);
        assert_eq!(stream.peek().unwrap_err(), err, "the error state is terminal");
    }

    #[test]
    fn test_error_remainder_is_bounded() {
        let src = format!("# {}\nnext line", "y".repeat(100));
        let err = tokenize(&src).unwrap_err();
        assert_eq!(err.kind, LexingErrorKind::NoMatch);
        assert_eq!(err.remainder.chars().count(), REMAINDER_PREVIEW);
        assert!(err.to_string().starts_with("lexical error at 1:1"));
    }

    #[test]
    fn test_lexemes_round_trip() {
        let src = "class Main {\n  function void main() {\n    do Output.printString(\"a // b\"); // c\n    return;\n  }\n}";
        let lexemes = tokenize(src)
            .unwrap()
            .iter()
            .map(|token| token.kind().lexeme())
            .collect::<String>();
        assert_eq!(
            lexemes,
            "classMain{functionvoidmain(){doOutput.printString(\"a // b\");return;}}"
        );
    }
    #[test]
    fn test_every_lexeme_matches_its_source_text() {
        let sources = [
            "let x = 007;",
            "let y = 0; let z = 32767;",
            "do f(\"\", 00, \"\");",
            "if(a<b){let c=a&~b;}",
            "return __x1 + this;",
        ];
        for src in sources {
            let tokens = tokenize(src).unwrap_or_else(|e| panic!("{src:?}: {e}"));
            for token in &tokens {
                let span = token.span();
                assert_eq!(
                    &src[span.offset()..span.end()],
                    token.kind().lexeme(),
                    "in {src:?}"
                );
            }
            let lexemes = tokens
                .iter()
                .map(|token| token.kind().lexeme())
                .collect::<String>();
            let without_whitespace = src
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>();
            assert_eq!(lexemes, without_whitespace);
        }
    }
}
