//! Syntax tree

use jack_tokens::{Keyword, Symbol, ToTokens, TokenKind};

mod class;
mod expr;
mod statement;

pub use class::*;
pub use expr::*;
pub use statement::*;

/// A borrowed, tagged view of any non-terminal node in a parse tree
#[derive(Debug, Copy, Clone)]
pub enum ParseNode<'a> {
    Class(&'a ClassDecl),
    ClassVarDec(&'a ClassVarDecl),
    SubroutineDec(&'a SubroutineDecl),
    ParameterList(&'a ParameterList),
    SubroutineBody(&'a SubroutineBody),
    VarDec(&'a VarDecl),
    Statements(&'a Statements),
    Statement(&'a Statement),
    Expression(&'a Expression),
    Term(&'a Term),
    ExpressionList(&'a ExpressionList),
}

/// A child of a [ParseNode], either another node or a terminal token
#[derive(Debug, Clone)]
pub enum SyntaxElement<'a> {
    Node(ParseNode<'a>),
    Token(TokenKind),
}

impl<'a> ParseNode<'a> {
    /// The element name of this node
    pub fn name(&self) -> &'static str {
        match self {
            ParseNode::Class(_) => "class",
            ParseNode::ClassVarDec(_) => "classVarDec",
            ParseNode::SubroutineDec(_) => "subroutineDec",
            ParseNode::ParameterList(_) => "parameterList",
            ParseNode::SubroutineBody(_) => "subroutineBody",
            ParseNode::VarDec(_) => "varDec",
            ParseNode::Statements(_) => "statements",
            ParseNode::Statement(statement) => match statement {
                Statement::Let(_) => "letStatement",
                Statement::If(_) => "ifStatement",
                Statement::While(_) => "whileStatement",
                Statement::Do(_) => "doStatement",
                Statement::Return(_) => "returnStatement",
            },
            ParseNode::Expression(_) => "expression",
            ParseNode::Term(_) => "term",
            ParseNode::ExpressionList(_) => "expressionList",
        }
    }

    /// The ordered children of this node
    pub fn children(&self) -> Vec<SyntaxElement<'a>> {
        let mut children = Children::default();
        match *self {
            ParseNode::Class(class) => class.push_children(&mut children),
            ParseNode::ClassVarDec(dec) => dec.push_children(&mut children),
            ParseNode::SubroutineDec(dec) => dec.push_children(&mut children),
            ParseNode::ParameterList(list) => list.push_children(&mut children),
            ParseNode::SubroutineBody(body) => body.push_children(&mut children),
            ParseNode::VarDec(dec) => dec.push_children(&mut children),
            ParseNode::Statements(statements) => statements.push_children(&mut children),
            ParseNode::Statement(statement) => statement.push_children(&mut children),
            ParseNode::Expression(expr) => expr.push_children(&mut children),
            ParseNode::Term(term) => term.push_children(&mut children),
            ParseNode::ExpressionList(list) => list.push_children(&mut children),
        }
        children.0
    }
}

impl ToTokens for ParseNode<'_> {
    fn to_tokens(&self) -> Vec<TokenKind> {
        self.children()
            .into_iter()
            .flat_map(|child| match child {
                SyntaxElement::Node(node) => node.to_tokens(),
                SyntaxElement::Token(token) => vec![token],
            })
            .collect()
    }
}

/// Accumulates the children of a node
#[derive(Debug, Default)]
pub(crate) struct Children<'a>(Vec<SyntaxElement<'a>>);

impl<'a> Children<'a> {
    pub(crate) fn keyword(&mut self, keyword: Keyword) {
        self.0.push(SyntaxElement::Token(TokenKind::Keyword(keyword)));
    }

    pub(crate) fn symbol(&mut self, symbol: Symbol) {
        self.0.push(SyntaxElement::Token(TokenKind::Symbol(symbol)));
    }

    pub(crate) fn identifier(&mut self, name: &str) {
        self.0
            .push(SyntaxElement::Token(TokenKind::Identifier(name.to_string())));
    }

    pub(crate) fn token(&mut self, token: TokenKind) {
        self.0.push(SyntaxElement::Token(token));
    }

    pub(crate) fn node(&mut self, node: impl Into<ParseNode<'a>>) {
        self.0.push(SyntaxElement::Node(node.into()));
    }

    /// Pushes `names` separated by commas
    pub(crate) fn identifiers(&mut self, names: &[String]) {
        for (idx, name) in names.iter().enumerate() {
            if idx > 0 {
                self.symbol(Symbol::Comma);
            }
            self.identifier(name);
        }
    }
}

macro_rules! parse_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for ParseNode<'a> {
                fn from(value: &'a $ty) -> Self {
                    ParseNode::$variant(value)
                }
            }

            #[automatically_derived]
            impl ToTokens for $ty {
                fn to_tokens(&self) -> Vec<TokenKind> {
                    ParseNode::from(self).to_tokens()
                }
            }
        )*
    };
}

parse_node!(
    ClassDecl => Class,
    ClassVarDecl => ClassVarDec,
    SubroutineDecl => SubroutineDec,
    ParameterList => ParameterList,
    SubroutineBody => SubroutineBody,
    VarDecl => VarDec,
    Statements => Statements,
    Statement => Statement,
    Expression => Expression,
    Term => Term,
    ExpressionList => ExpressionList,
);
