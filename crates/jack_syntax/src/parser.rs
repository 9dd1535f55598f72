//! The compilation engine, a recursive descent parser over a [TokenStream]

use crate::lexer::TokenStream;
use jack_tokens::Spanned;
use tracing::debug;

pub mod error;
mod helpers;
pub mod syntax_tree;

pub use error::{ErrorKind, SyntaxError, SyntaxResult};
pub use syntax_tree::*;

/// Parse a syntax tree part
pub trait Parse: Sized {
    /// The name of the grammar rule this part is parsed by
    const NON_TERMINAL: &'static str;

    /// Attempt to parse some syntax tree part
    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self>;
}

/// A sub trait that determines if this type could be parsed without doing the parsing
pub trait CouldParse: Parse {
    /// Checks the next token only, never consuming anything
    fn could_parse(stream: &mut TokenStream) -> SyntaxResult<bool>;
}

/// Parses `P` for as long as the next token could start one
pub fn multi0<P: CouldParse>(stream: &mut TokenStream) -> SyntaxResult<Vec<P>> {
    let mut result = Vec::new();
    while P::could_parse(stream)? {
        result.push(P::parse(stream)?);
    }
    Ok(result)
}

/// Parses a complete source unit, which must be exactly one class.
///
/// Fails with [ErrorKind::EmptyUnit] when the stream holds no tokens at all, and with
/// [ErrorKind::TrailingTokens] when anything follows the closing brace of the class.
pub fn parse_class(stream: &mut TokenStream) -> SyntaxResult<ClassDecl> {
    if stream.peek()?.is_none() {
        return Err(SyntaxError::new(
            ErrorKind::EmptyUnit,
            None,
            Some(ClassDecl::NON_TERMINAL),
        ));
    }
    let class = ClassDecl::parse(stream)?;
    if let Some(token) = stream.peek()? {
        let span = token.span();
        return Err(SyntaxError::new(
            ErrorKind::TrailingTokens(token.kind().clone()),
            Some(span),
            None,
        ));
    }
    debug!(
        "parsed class {} with {} subroutines",
        class.name,
        class.subroutine_decs.len()
    );
    Ok(class)
}
