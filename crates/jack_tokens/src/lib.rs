//! Tokens of the jack language, together with the static grammar tables used to classify them.

pub mod grammar;
pub mod spanned;
pub mod token;

pub use grammar::{Keyword, Symbol, TokenCategory};
pub use spanned::{Span, Spanned};
pub use token::{Integer, ToTokens, Token, TokenKind};
