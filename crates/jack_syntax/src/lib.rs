//! Syntax analysis of jack source units.
//!
//! Source text flows through three stages:
//! 1. [comments::strip_comments] removes `//` and `/* */` comments,
//! 2. [lexer::TokenStream] classifies the remaining text into tokens on demand,
//! 3. [parser::parse_class] builds a [parser::ClassDecl] by recursive descent.
//!
//! The [xml] module renders the results of the last two stages.

pub mod comments;
pub mod lexer;
pub mod parser;
pub mod xml;

pub use lexer::tokenize;
pub use parser::parse_class;

/// Strips, tokenizes and parses a whole source unit
pub fn parse_source(src: &str) -> parser::SyntaxResult<parser::ClassDecl> {
    parse_class(&mut lexer::TokenStream::from_source(src))
}
