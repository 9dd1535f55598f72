use jack_tokens::grammar::{
    is_identifier_char, Keyword, Symbol, TokenCategory, MAX_INTEGER_CONSTANT, SYMBOLS,
};
use jack_tokens::{Integer, TokenKind};
use nom::bytes::complete::take_while;
use nom::character::complete::{alpha1, char, digit1, one_of, satisfy};
use nom::combinator::{map, map_opt, map_res, not, peek, recognize};
use nom::error::{context, VerboseError};
use nom::multi::many0_count;
use nom::sequence::{delimited, terminated, tuple};
use nom::IResult;
use std::str::FromStr;

type Result<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Why no token could be classified
#[derive(Debug, Clone, PartialEq)]
pub enum Unclassified {
    NoMatch,
    UnterminatedString,
    IntegerOutOfRange(String),
}

/// Classifies the lexeme at the very start of `src`, which must not begin with whitespace.
///
/// Returns the byte length of the matched lexeme along with its token kind. Categories are tried in
/// [TokenCategory::PRIORITY] order and the first one to match wins.
pub fn classify(src: &str) -> std::result::Result<(usize, TokenKind), Unclassified> {
    for category in TokenCategory::PRIORITY {
        let attempt = match category {
            TokenCategory::Keyword => map(parse_keyword, TokenKind::Keyword)(src),
            TokenCategory::Identifier => map(parse_identifier, |id: &str| {
                TokenKind::Identifier(id.to_string())
            })(src),
            TokenCategory::Symbol => map(parse_symbol, TokenKind::Symbol)(src),
            TokenCategory::StringConstant => map(parse_string_constant, |s: &str| {
                TokenKind::StringConstant(s.to_string())
            })(src),
            TokenCategory::IntegerConstant => match parse_integer_constant(src) {
                Ok((rest, digits)) => {
                    let value = integer_value(digits)
                        .ok_or_else(|| Unclassified::IntegerOutOfRange(digits.to_string()))?;
                    Ok((rest, TokenKind::IntegerConstant(Integer::new(value, digits))))
                }
                Err(e) => Err(e),
            },
        };
        if let Ok((rest, kind)) = attempt {
            return Ok((src.len() - rest.len(), kind));
        }
    }

    if src.starts_with('"') {
        Err(Unclassified::UnterminatedString)
    } else {
        Err(Unclassified::NoMatch)
    }
}

fn integer_value(digits: &str) -> Option<u16> {
    u16::from_str(digits)
        .ok()
        .filter(|value| *value <= MAX_INTEGER_CONSTANT)
}

/// A reserved word that is not immediately followed by another identifier character
fn parse_keyword(src: &str) -> Result<Keyword> {
    context(
        "keyword",
        terminated(
            map_res(alpha1, Keyword::from_str),
            not(peek(satisfy(is_identifier_char))),
        ),
    )(src)
}

/// Optional leading underscores, at least one letter, then letters, digits and underscores
fn parse_identifier(src: &str) -> Result<&str> {
    context(
        "identifier",
        recognize(tuple((
            many0_count(char('_')),
            alpha1,
            take_while(is_identifier_char),
        ))),
    )(src)
}

fn parse_symbol(src: &str) -> Result<Symbol> {
    context(
        "symbol",
        map_opt(one_of(SYMBOLS), |c: char| Symbol::try_from(c).ok()),
    )(src)
}

/// Characters between double quotes; the literal may not span a line
fn parse_string_constant(src: &str) -> Result<&str> {
    context(
        "string constant",
        delimited(
            char('"'),
            take_while(|c: char| c != '"' && c != '\n'),
            char('"'),
        ),
    )(src)
}

fn parse_integer_constant(src: &str) -> Result<&str> {
    context("integer constant", digit1)(src)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::combinator::all_consuming;
    use test_log::test;

    fn kind(src: &str) -> TokenKind {
        classify(src)
            .unwrap_or_else(|e| panic!("could not classify {src:?}: {e:?}"))
            .1
    }

    #[test]
    fn test_parse_keyword() {
        let (rest, Keyword::Class) = all_consuming(parse_keyword)("class").expect("could not parse")
        else {
            panic!()
        };
        assert_eq!(rest, "");
        let (rest, Keyword::Constructor) =
            parse_keyword("constructor(").expect("could not parse")
        else {
            panic!()
        };
        assert_eq!(rest, "(");
    }

    #[test]
    fn test_keyword_needs_boundary() {
        assert!(parse_keyword("classy").is_err());
        assert!(parse_keyword("class_").is_err());
        assert!(parse_keyword("do2").is_err());
        assert!(parse_keyword("double").is_err());
    }

    #[test]
    fn test_identifier_sharing_keyword_prefix() {
        assert_eq!(kind("className = 3"), TokenKind::Identifier("className".to_string()));
        assert_eq!(kind("if_x"), TokenKind::Identifier("if_x".to_string()));
        assert_eq!(kind("this1"), TokenKind::Identifier("this1".to_string()));
    }

    #[test]
    fn test_identifier_shapes() {
        assert_eq!(kind("__a1_b"), TokenKind::Identifier("__a1_b".to_string()));
        assert_eq!(classify("_1"), Err(Unclassified::NoMatch));
        assert_eq!(classify("_"), Err(Unclassified::NoMatch));
    }

    #[test]
    fn test_lexeme_lengths() {
        assert_eq!(classify("while(x)"), Ok((5, TokenKind::Keyword(Keyword::While))));
        assert_eq!(classify("<="), Ok((1, TokenKind::Symbol(Symbol::Lt))));
        assert_eq!(
            classify("\"a b\";"),
            Ok((5, TokenKind::StringConstant("a b".to_string())))
        );
        assert_eq!(classify("123abc"), Ok((3, TokenKind::IntegerConstant(123_u16.into()))));
    }

    #[test]
    fn test_string_constant_errors() {
        assert_eq!(classify("\"abc"), Err(Unclassified::UnterminatedString));
        assert_eq!(classify("\"abc\ndef\""), Err(Unclassified::UnterminatedString));
        assert_eq!(classify("\"\""), Ok((2, TokenKind::StringConstant(String::new()))));
    }

    #[test]
    fn test_integer_range() {
        assert_eq!(classify("32767"), Ok((5, TokenKind::IntegerConstant(32767_u16.into()))));
        assert_eq!(
            classify("007;"),
            Ok((3, TokenKind::IntegerConstant(Integer::new(7, "007"))))
        );
        assert_eq!(
            classify("00032767"),
            Ok((8, TokenKind::IntegerConstant(Integer::new(32767, "00032767"))))
        );
        assert_eq!(
            classify("32768"),
            Err(Unclassified::IntegerOutOfRange("32768".to_string()))
        );
        assert_eq!(
            classify("99999999999"),
            Err(Unclassified::IntegerOutOfRange("99999999999".to_string()))
        );
    }

    #[test]
    fn test_no_match() {
        assert_eq!(classify("#include"), Err(Unclassified::NoMatch));
        assert_eq!(classify("'c'"), Err(Unclassified::NoMatch));
    }
}
