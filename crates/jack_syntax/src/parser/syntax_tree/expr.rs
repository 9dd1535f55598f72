//! Expressions, terms and subroutine calls.
//!
//! Operators are kept as a flat, left-to-right chain. No precedence is applied.

use super::Children;
use crate::lexer::TokenStream;
use crate::parser::helpers::*;
use crate::parser::{Parse, SyntaxError, SyntaxResult};
use jack_tokens::{Integer, Keyword, Symbol, TokenKind};

/// `term (op term)*`
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub term: Term,
    pub rest: Vec<(BinaryOp, Term)>,
}

impl Parse for Expression {
    const NON_TERMINAL: &'static str = "expression";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        let term = Term::parse(stream)?;
        let mut rest = vec![];
        while let Some(op) = peek_symbol(stream)?.and_then(BinaryOp::from_symbol) {
            stream.consume_current();
            rest.push((op, Term::parse(stream)?));
        }
        Ok(Self { term, rest })
    }
}

impl Expression {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.node(&self.term);
        for (op, term) in &self.rest {
            children.symbol(op.symbol());
            children.node(term);
        }
    }
}

/// `'+' | '-' | '*' | '/' | '&' | '|' | '<' | '>' | '='`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Lt,
    Gt,
    Eq,
}

impl BinaryOp {
    fn from_symbol(symbol: Symbol) -> Option<Self> {
        Some(match symbol {
            Symbol::Plus => BinaryOp::Add,
            Symbol::Minus => BinaryOp::Sub,
            Symbol::Star => BinaryOp::Mul,
            Symbol::Slash => BinaryOp::Div,
            Symbol::Amp => BinaryOp::And,
            Symbol::Pipe => BinaryOp::Or,
            Symbol::Lt => BinaryOp::Lt,
            Symbol::Gt => BinaryOp::Gt,
            Symbol::Eq => BinaryOp::Eq,
            _ => return None,
        })
    }

    /// The symbol this operator is written as
    pub fn symbol(&self) -> Symbol {
        match self {
            BinaryOp::Add => Symbol::Plus,
            BinaryOp::Sub => Symbol::Minus,
            BinaryOp::Mul => Symbol::Star,
            BinaryOp::Div => Symbol::Slash,
            BinaryOp::And => Symbol::Amp,
            BinaryOp::Or => Symbol::Pipe,
            BinaryOp::Lt => Symbol::Lt,
            BinaryOp::Gt => Symbol::Gt,
            BinaryOp::Eq => Symbol::Eq,
        }
    }
}

/// `'-' | '~'`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

impl UnaryOp {
    /// The symbol this operator is written as
    pub fn symbol(&self) -> Symbol {
        match self {
            UnaryOp::Neg => Symbol::Minus,
            UnaryOp::Not => Symbol::Tilde,
        }
    }
}

/// `'true' | 'false' | 'null' | 'this'`
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeywordConstant {
    True,
    False,
    Null,
    This,
}

impl KeywordConstant {
    fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::True => Some(KeywordConstant::True),
            Keyword::False => Some(KeywordConstant::False),
            Keyword::Null => Some(KeywordConstant::Null),
            Keyword::This => Some(KeywordConstant::This),
            _ => None,
        }
    }
}

impl From<KeywordConstant> for Keyword {
    fn from(value: KeywordConstant) -> Self {
        match value {
            KeywordConstant::True => Keyword::True,
            KeywordConstant::False => Keyword::False,
            KeywordConstant::Null => Keyword::Null,
            KeywordConstant::This => Keyword::This,
        }
    }
}

/// A single operand of an [Expression]
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    IntegerLiteral(Integer),
    StringLiteral(String),
    KeywordConstant(KeywordConstant),
    VariableRef(String),
    ArrayAccess { name: String, index: Box<Expression> },
    SubroutineCall(SubroutineCall),
    UnaryOp(UnaryOp, Box<Term>),
    Paren(Box<Expression>),
}

impl Parse for Term {
    const NON_TERMINAL: &'static str = "term";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        let Some(token) = stream.peek()? else {
            return Err(SyntaxError::expected(["term"], None, Self::NON_TERMINAL));
        };
        match token.kind() {
            TokenKind::IntegerConstant(value) => {
                let value = value.clone();
                stream.consume_current();
                Ok(Term::IntegerLiteral(value))
            }
            TokenKind::StringConstant(value) => {
                let value = value.clone();
                stream.consume_current();
                Ok(Term::StringLiteral(value))
            }
            TokenKind::Keyword(keyword) => match KeywordConstant::from_keyword(*keyword) {
                Some(constant) => {
                    stream.consume_current();
                    Ok(Term::KeywordConstant(constant))
                }
                None => Err(SyntaxError::expected(
                    ["term"],
                    stream.peek()?,
                    Self::NON_TERMINAL,
                )),
            },
            TokenKind::Identifier(_) => {
                let name = expect_identifier(stream, Self::NON_TERMINAL)?;
                match peek_symbol(stream)? {
                    Some(Symbol::LBracket) => {
                        stream.consume_current();
                        let index = Expression::parse(stream)?;
                        expect_symbol(stream, Symbol::RBracket, Self::NON_TERMINAL)?;
                        Ok(Term::ArrayAccess {
                            name,
                            index: Box::new(index),
                        })
                    }
                    Some(Symbol::LParen | Symbol::Dot) => {
                        SubroutineCall::parse_after_name(stream, name).map(Term::SubroutineCall)
                    }
                    _ => Ok(Term::VariableRef(name)),
                }
            }
            TokenKind::Symbol(Symbol::LParen) => {
                stream.consume_current();
                let expression = Expression::parse(stream)?;
                expect_symbol(stream, Symbol::RParen, Self::NON_TERMINAL)?;
                Ok(Term::Paren(Box::new(expression)))
            }
            TokenKind::Symbol(Symbol::Minus) => {
                stream.consume_current();
                Ok(Term::UnaryOp(UnaryOp::Neg, Box::new(Term::parse(stream)?)))
            }
            TokenKind::Symbol(Symbol::Tilde) => {
                stream.consume_current();
                Ok(Term::UnaryOp(UnaryOp::Not, Box::new(Term::parse(stream)?)))
            }
            TokenKind::Symbol(_) => Err(SyntaxError::expected(
                ["term"],
                stream.peek()?,
                Self::NON_TERMINAL,
            )),
        }
    }
}

impl Term {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        match self {
            Term::IntegerLiteral(value) => {
                children.token(TokenKind::IntegerConstant(value.clone()))
            }
            Term::StringLiteral(value) => {
                children.token(TokenKind::StringConstant(value.clone()))
            }
            Term::KeywordConstant(constant) => children.keyword((*constant).into()),
            Term::VariableRef(name) => children.identifier(name),
            Term::ArrayAccess { name, index } => {
                children.identifier(name);
                children.symbol(Symbol::LBracket);
                children.node(index.as_ref());
                children.symbol(Symbol::RBracket);
            }
            Term::SubroutineCall(call) => call.push_children(children),
            Term::UnaryOp(op, term) => {
                children.symbol(op.symbol());
                children.node(term.as_ref());
            }
            Term::Paren(expression) => {
                children.symbol(Symbol::LParen);
                children.node(expression.as_ref());
                children.symbol(Symbol::RParen);
            }
        }
    }
}

/// `subroutineName '(' expressionList ')' | (className|varName) '.' subroutineName '(' expressionList ')'`
///
/// A call is not a node of its own, its tokens appear inline in the enclosing `doStatement` or
/// `term`.
#[derive(Debug, Clone, PartialEq)]
pub struct SubroutineCall {
    /// The class or variable before the `.`, if any
    pub receiver: Option<String>,
    pub name: String,
    pub arguments: ExpressionList,
}

impl SubroutineCall {
    /// Parses a call whose leading identifier has already been consumed
    fn parse_after_name(stream: &mut TokenStream, first: String) -> SyntaxResult<Self> {
        let (receiver, name) = if consume_symbol(stream, Symbol::Dot)? {
            (Some(first), expect_identifier(stream, Self::NON_TERMINAL)?)
        } else {
            (None, first)
        };
        if !consume_symbol(stream, Symbol::LParen)? {
            let expected: &[&str] = if receiver.is_some() {
                &["'('"]
            } else {
                &["'('", "'.'"]
            };
            return Err(SyntaxError::expected(
                expected.iter().copied(),
                stream.peek()?,
                Self::NON_TERMINAL,
            ));
        }
        let arguments = ExpressionList::parse(stream)?;
        expect_symbol(stream, Symbol::RParen, Self::NON_TERMINAL)?;
        Ok(Self {
            receiver,
            name,
            arguments,
        })
    }

    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        if let Some(receiver) = &self.receiver {
            children.identifier(receiver);
            children.symbol(Symbol::Dot);
        }
        children.identifier(&self.name);
        children.symbol(Symbol::LParen);
        children.node(&self.arguments);
        children.symbol(Symbol::RParen);
    }
}

impl Parse for SubroutineCall {
    const NON_TERMINAL: &'static str = "subroutineCall";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        let first = expect_identifier(stream, Self::NON_TERMINAL)?;
        Self::parse_after_name(stream, first)
    }
}

/// `(expression (',' expression)*)?`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpressionList {
    pub expressions: Vec<Expression>,
}

impl Parse for ExpressionList {
    const NON_TERMINAL: &'static str = "expressionList";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        if peek_symbol(stream)? == Some(Symbol::RParen) {
            return Ok(Self::default());
        }
        let expressions = comma_separated1(stream, Expression::parse)?;
        Ok(Self { expressions })
    }
}

impl ExpressionList {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        for (idx, expression) in self.expressions.iter().enumerate() {
            if idx > 0 {
                children.symbol(Symbol::Comma);
            }
            children.node(expression);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ErrorKind;
    use test_log::test;

    fn expression(src: &str) -> Expression {
        Expression::parse(&mut TokenStream::new(src)).unwrap_or_else(|e| panic!("{e}"))
    }

    fn var(name: &str) -> Term {
        Term::VariableRef(name.to_string())
    }

    #[test]
    fn test_flat_chain_without_precedence() {
        let expr = expression("1 + 2 * x");
        assert_eq!(expr.term, Term::IntegerLiteral(1_u16.into()));
        assert_eq!(
            expr.rest,
            vec![
                (BinaryOp::Add, Term::IntegerLiteral(2_u16.into())),
                (BinaryOp::Mul, var("x")),
            ]
        );
    }

    #[test]
    fn test_identifier_lookahead() {
        assert_eq!(expression("a").term, var("a"));
        assert_eq!(
            expression("a[i]").term,
            Term::ArrayAccess {
                name: "a".to_string(),
                index: Box::new(Expression {
                    term: var("i"),
                    rest: vec![]
                }),
            }
        );
        let Term::SubroutineCall(call) = expression("Math.max(a, b + 1)").term else {
            panic!("expected a subroutine call");
        };
        assert_eq!(call.receiver.as_deref(), Some("Math"));
        assert_eq!(call.name, "max");
        assert_eq!(call.arguments.expressions.len(), 2);

        let Term::SubroutineCall(call) = expression("draw()").term else {
            panic!("expected a subroutine call");
        };
        assert_eq!(call.receiver, None);
        assert!(call.arguments.expressions.is_empty());
    }

    #[test]
    fn test_unary_and_parens() {
        let expr = expression("-(x - ~y)");
        let Term::UnaryOp(UnaryOp::Neg, inner) = expr.term else {
            panic!("expected a negation");
        };
        let Term::Paren(inner) = *inner else {
            panic!("expected a parenthesized expression");
        };
        assert_eq!(inner.term, var("x"));
        assert_eq!(
            inner.rest,
            vec![(BinaryOp::Sub, Term::UnaryOp(UnaryOp::Not, Box::new(var("y"))))]
        );
    }

    #[test]
    fn test_constants() {
        assert_eq!(
            expression("\"hi there\"").term,
            Term::StringLiteral("hi there".to_string())
        );
        assert_eq!(
            expression("this").term,
            Term::KeywordConstant(KeywordConstant::This)
        );
        assert_eq!(expression("32767").term, Term::IntegerLiteral(32767_u16.into()));
        let Term::IntegerLiteral(padded) = expression("007").term else {
            panic!("expected an integer constant");
        };
        assert_eq!(padded.value(), 7);
        assert_eq!(padded.digits(), "007");
    }

    #[test]
    fn test_expression_stops_at_non_operator() {
        let mut stream = TokenStream::new("x + 1; y");
        let expr = Expression::parse(&mut stream).unwrap();
        assert_eq!(expr.rest.len(), 1);
        assert_eq!(peek_symbol(&mut stream).unwrap(), Some(Symbol::SemiColon));
    }

    #[test]
    fn test_keyword_is_not_a_term() {
        let err = Expression::parse(&mut TokenStream::new("let")).unwrap_err();
        match err.kind {
            ErrorKind::ExpectedToken { expected, found } => {
                assert_eq!(expected, ["term"]);
                assert_eq!(found, TokenKind::Keyword(Keyword::Let));
            }
            kind => panic!("unexpected {kind:?}"),
        }
    }

    #[test]
    fn test_dangling_operator() {
        let err = Expression::parse(&mut TokenStream::new("x +")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::UnexpectedEof { .. }));
    }
}
