//! Class-level declarations: the class itself, its variables and its subroutines

use super::{Children, Statements};
use crate::lexer::TokenStream;
use crate::parser::helpers::*;
use crate::parser::{multi0, CouldParse, Parse, SyntaxError, SyntaxResult};
use jack_tokens::{Keyword, Symbol, TokenKind};
use tracing::trace;

/// `'class' className '{' classVarDec* subroutineDec* '}'`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub class_var_decs: Vec<ClassVarDecl>,
    pub subroutine_decs: Vec<SubroutineDecl>,
}

impl Parse for ClassDecl {
    const NON_TERMINAL: &'static str = "class";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::Class], Self::NON_TERMINAL)?;
        let name = expect_identifier(stream, Self::NON_TERMINAL)?;
        trace!("parsing class {name}");
        expect_symbol(stream, Symbol::LCurly, Self::NON_TERMINAL)?;
        let class_var_decs = multi0(stream)?;
        let subroutine_decs = multi0(stream)?;
        expect_symbol(stream, Symbol::RCurly, Self::NON_TERMINAL)?;
        Ok(Self {
            name,
            class_var_decs,
            subroutine_decs,
        })
    }
}

impl ClassDecl {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::Class);
        children.identifier(&self.name);
        children.symbol(Symbol::LCurly);
        for dec in &self.class_var_decs {
            children.node(dec);
        }
        for dec in &self.subroutine_decs {
            children.node(dec);
        }
        children.symbol(Symbol::RCurly);
    }
}

/// Whether a class variable belongs to the class or to each instance
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClassVarKind {
    Static,
    Field,
}

impl From<ClassVarKind> for Keyword {
    fn from(value: ClassVarKind) -> Self {
        match value {
            ClassVarKind::Static => Keyword::Static,
            ClassVarKind::Field => Keyword::Field,
        }
    }
}

/// `('static'|'field') type varName (',' varName)* ';'`
#[derive(Debug, Clone, PartialEq)]
pub struct ClassVarDecl {
    pub kind: ClassVarKind,
    pub ty: Type,
    pub names: Vec<String>,
}

impl Parse for ClassVarDecl {
    const NON_TERMINAL: &'static str = "classVarDec";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        let kind = match expect_keyword(
            stream,
            &[Keyword::Static, Keyword::Field],
            Self::NON_TERMINAL,
        )? {
            Keyword::Static => ClassVarKind::Static,
            _ => ClassVarKind::Field,
        };
        let ty = Type::parse(stream)?;
        let names = comma_separated1(stream, |stream| {
            expect_identifier(stream, Self::NON_TERMINAL)
        })?;
        expect_symbol(stream, Symbol::SemiColon, Self::NON_TERMINAL)?;
        Ok(Self { kind, ty, names })
    }
}

impl CouldParse for ClassVarDecl {
    fn could_parse(stream: &mut TokenStream) -> SyntaxResult<bool> {
        Ok(matches!(
            peek_keyword(stream)?,
            Some(Keyword::Static | Keyword::Field)
        ))
    }
}

impl ClassVarDecl {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(self.kind.into());
        children.token(self.ty.to_token());
        children.identifiers(&self.names);
        children.symbol(Symbol::SemiColon);
    }
}

/// `'int' | 'char' | 'boolean' | className`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Int,
    Char,
    Boolean,
    Class(String),
}

impl Type {
    fn to_token(&self) -> TokenKind {
        match self {
            Type::Int => TokenKind::Keyword(Keyword::Int),
            Type::Char => TokenKind::Keyword(Keyword::Char),
            Type::Boolean => TokenKind::Keyword(Keyword::Boolean),
            Type::Class(name) => TokenKind::Identifier(name.clone()),
        }
    }
}

impl Parse for Type {
    const NON_TERMINAL: &'static str = "type";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        let ty = match stream.peek()?.map(|token| token.kind()) {
            Some(TokenKind::Keyword(Keyword::Int)) => Some(Type::Int),
            Some(TokenKind::Keyword(Keyword::Char)) => Some(Type::Char),
            Some(TokenKind::Keyword(Keyword::Boolean)) => Some(Type::Boolean),
            Some(TokenKind::Identifier(name)) => Some(Type::Class(name.clone())),
            _ => None,
        };
        match ty {
            Some(ty) => {
                stream.consume_current();
                Ok(ty)
            }
            None => Err(SyntaxError::expected(
                ["type"],
                stream.peek()?,
                Self::NON_TERMINAL,
            )),
        }
    }
}

impl CouldParse for Type {
    fn could_parse(stream: &mut TokenStream) -> SyntaxResult<bool> {
        Ok(matches!(
            stream.peek()?.map(|token| token.kind()),
            Some(
                TokenKind::Keyword(Keyword::Int | Keyword::Char | Keyword::Boolean)
                    | TokenKind::Identifier(_)
            )
        ))
    }
}

/// The kind of a subroutine
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SubroutineKind {
    Constructor,
    Function,
    Method,
}

impl From<SubroutineKind> for Keyword {
    fn from(value: SubroutineKind) -> Self {
        match value {
            SubroutineKind::Constructor => Keyword::Constructor,
            SubroutineKind::Function => Keyword::Function,
            SubroutineKind::Method => Keyword::Method,
        }
    }
}

/// `'void' | type`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(Type),
}

/// `('constructor'|'function'|'method') ('void'|type) subroutineName '(' parameterList ')' subroutineBody`
#[derive(Debug, Clone, PartialEq)]
pub struct SubroutineDecl {
    pub kind: SubroutineKind,
    pub return_type: ReturnType,
    pub name: String,
    pub parameters: ParameterList,
    pub body: SubroutineBody,
}

impl Parse for SubroutineDecl {
    const NON_TERMINAL: &'static str = "subroutineDec";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        let kind = match expect_keyword(
            stream,
            &[Keyword::Constructor, Keyword::Function, Keyword::Method],
            Self::NON_TERMINAL,
        )? {
            Keyword::Constructor => SubroutineKind::Constructor,
            Keyword::Function => SubroutineKind::Function,
            _ => SubroutineKind::Method,
        };
        let return_type = if peek_keyword(stream)? == Some(Keyword::Void) {
            stream.consume_current();
            ReturnType::Void
        } else if Type::could_parse(stream)? {
            ReturnType::Type(Type::parse(stream)?)
        } else {
            return Err(SyntaxError::expected(
                ["'void'", "type"],
                stream.peek()?,
                Self::NON_TERMINAL,
            ));
        };
        let name = expect_identifier(stream, Self::NON_TERMINAL)?;
        trace!("parsing subroutine {name}");
        expect_symbol(stream, Symbol::LParen, Self::NON_TERMINAL)?;
        let parameters = ParameterList::parse(stream)?;
        expect_symbol(stream, Symbol::RParen, Self::NON_TERMINAL)?;
        let body = SubroutineBody::parse(stream)?;
        Ok(Self {
            kind,
            return_type,
            name,
            parameters,
            body,
        })
    }
}

impl CouldParse for SubroutineDecl {
    fn could_parse(stream: &mut TokenStream) -> SyntaxResult<bool> {
        Ok(matches!(
            peek_keyword(stream)?,
            Some(Keyword::Constructor | Keyword::Function | Keyword::Method)
        ))
    }
}

impl SubroutineDecl {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(self.kind.into());
        match &self.return_type {
            ReturnType::Void => children.keyword(Keyword::Void),
            ReturnType::Type(ty) => children.token(ty.to_token()),
        }
        children.identifier(&self.name);
        children.symbol(Symbol::LParen);
        children.node(&self.parameters);
        children.symbol(Symbol::RParen);
        children.node(&self.body);
    }
}

/// A single `type varName` parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ty: Type,
    pub name: String,
}

/// `((type varName) (',' type varName)*)?`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterList {
    pub parameters: Vec<Parameter>,
}

impl Parse for ParameterList {
    const NON_TERMINAL: &'static str = "parameterList";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        if !Type::could_parse(stream)? {
            return Ok(Self::default());
        }
        let parameters = comma_separated1(stream, |stream| {
            let ty = Type::parse(stream)?;
            let name = expect_identifier(stream, Self::NON_TERMINAL)?;
            Ok(Parameter { ty, name })
        })?;
        Ok(Self { parameters })
    }
}

impl ParameterList {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        for (idx, parameter) in self.parameters.iter().enumerate() {
            if idx > 0 {
                children.symbol(Symbol::Comma);
            }
            children.token(parameter.ty.to_token());
            children.identifier(&parameter.name);
        }
    }
}

/// `'{' varDec* statements '}'`
#[derive(Debug, Clone, PartialEq)]
pub struct SubroutineBody {
    pub var_decs: Vec<VarDecl>,
    pub statements: Statements,
}

impl Parse for SubroutineBody {
    const NON_TERMINAL: &'static str = "subroutineBody";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_symbol(stream, Symbol::LCurly, Self::NON_TERMINAL)?;
        let var_decs = multi0(stream)?;
        let statements = Statements::parse(stream)?;
        expect_block_end(stream, Self::NON_TERMINAL)?;
        Ok(Self {
            var_decs,
            statements,
        })
    }
}

impl SubroutineBody {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.symbol(Symbol::LCurly);
        for dec in &self.var_decs {
            children.node(dec);
        }
        children.node(&self.statements);
        children.symbol(Symbol::RCurly);
    }
}

/// `'var' type varName (',' varName)* ';'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub ty: Type,
    pub names: Vec<String>,
}

impl Parse for VarDecl {
    const NON_TERMINAL: &'static str = "varDec";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::Var], Self::NON_TERMINAL)?;
        let ty = Type::parse(stream)?;
        let names = comma_separated1(stream, |stream| {
            expect_identifier(stream, Self::NON_TERMINAL)
        })?;
        expect_symbol(stream, Symbol::SemiColon, Self::NON_TERMINAL)?;
        Ok(Self { ty, names })
    }
}

impl CouldParse for VarDecl {
    fn could_parse(stream: &mut TokenStream) -> SyntaxResult<bool> {
        Ok(peek_keyword(stream)? == Some(Keyword::Var))
    }
}

impl VarDecl {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::Var);
        children.token(self.ty.to_token());
        children.identifiers(&self.names);
        children.symbol(Symbol::SemiColon);
    }
}
