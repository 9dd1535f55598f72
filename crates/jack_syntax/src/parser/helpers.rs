//! Terminal-matching helpers shared by the grammar procedures

use super::{SyntaxError, SyntaxResult};
use crate::lexer::TokenStream;
use itertools::Itertools as _;
use jack_tokens::{Keyword, Symbol, TokenKind};

/// The keyword at the front of the stream, if the next token is one
pub fn peek_keyword(stream: &mut TokenStream) -> SyntaxResult<Option<Keyword>> {
    Ok(stream.peek()?.and_then(|token| match token.kind() {
        TokenKind::Keyword(keyword) => Some(*keyword),
        _ => None,
    }))
}

/// The symbol at the front of the stream, if the next token is one
pub fn peek_symbol(stream: &mut TokenStream) -> SyntaxResult<Option<Symbol>> {
    Ok(stream.peek()?.and_then(|token| match token.kind() {
        TokenKind::Symbol(symbol) => Some(*symbol),
        _ => None,
    }))
}

/// Consumes `symbol` if it is next, returning whether it was
pub fn consume_symbol(stream: &mut TokenStream, symbol: Symbol) -> SyntaxResult<bool> {
    Ok(stream
        .consume_if(|token| token.kind().is_symbol(symbol))?
        .is_some())
}

/// Consumes one of `keywords`, failing if anything else is next
pub fn expect_keyword(
    stream: &mut TokenStream,
    keywords: &[Keyword],
    non_terminal: &'static str,
) -> SyntaxResult<Keyword> {
    match peek_keyword(stream)? {
        Some(keyword) if keywords.contains(&keyword) => {
            stream.consume_current();
            Ok(keyword)
        }
        _ => {
            let expected = keywords.iter().map(|k| format!("'{k}'")).collect_vec();
            Err(SyntaxError::expected(expected, stream.peek()?, non_terminal))
        }
    }
}

/// Consumes `symbol`, failing if anything else is next
pub fn expect_symbol(
    stream: &mut TokenStream,
    symbol: Symbol,
    non_terminal: &'static str,
) -> SyntaxResult<()> {
    if consume_symbol(stream, symbol)? {
        Ok(())
    } else {
        Err(SyntaxError::expected(
            [format!("'{symbol}'")],
            stream.peek()?,
            non_terminal,
        ))
    }
}

/// Consumes an identifier, failing if anything else is next
pub fn expect_identifier(
    stream: &mut TokenStream,
    non_terminal: &'static str,
) -> SyntaxResult<String> {
    let name = match stream.peek()?.map(|token| token.kind()) {
        Some(TokenKind::Identifier(name)) => name.clone(),
        _ => {
            return Err(SyntaxError::expected(
                ["identifier"],
                stream.peek()?,
                non_terminal,
            ))
        }
    };
    stream.consume_current();
    Ok(name)
}

/// Consumes the `}` closing a block of statements
pub fn expect_block_end(stream: &mut TokenStream, non_terminal: &'static str) -> SyntaxResult<()> {
    if consume_symbol(stream, Symbol::RCurly)? {
        Ok(())
    } else {
        Err(SyntaxError::expected(
            ["'}'", "statement"],
            stream.peek()?,
            non_terminal,
        ))
    }
}

/// Parses one or more items separated by `,`
pub fn comma_separated1<T, F>(stream: &mut TokenStream, mut item: F) -> SyntaxResult<Vec<T>>
where
    F: FnMut(&mut TokenStream) -> SyntaxResult<T>,
{
    let mut items = vec![item(stream)?];
    while consume_symbol(stream, Symbol::Comma)? {
        items.push(item(stream)?);
    }
    Ok(items)
}
