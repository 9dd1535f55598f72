use super::{Children, Expression, SubroutineCall};
use crate::lexer::TokenStream;
use crate::parser::helpers::*;
use crate::parser::{multi0, CouldParse, Parse, SyntaxError, SyntaxResult};
use jack_tokens::{Keyword, Symbol};

/// `statement*`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statements {
    pub statements: Vec<Statement>,
}

impl Parse for Statements {
    const NON_TERMINAL: &'static str = "statements";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        Ok(Self {
            statements: multi0(stream)?,
        })
    }
}

impl Statements {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        for statement in &self.statements {
            children.node(statement);
        }
    }
}

/// A single statement, chosen by its leading keyword
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Let(LetStatement),
    If(IfStatement),
    While(WhileStatement),
    Do(DoStatement),
    Return(ReturnStatement),
}

impl Parse for Statement {
    const NON_TERMINAL: &'static str = "statement";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        match peek_keyword(stream)? {
            Some(Keyword::Let) => LetStatement::parse(stream).map(Statement::Let),
            Some(Keyword::If) => IfStatement::parse(stream).map(Statement::If),
            Some(Keyword::While) => WhileStatement::parse(stream).map(Statement::While),
            Some(Keyword::Do) => DoStatement::parse(stream).map(Statement::Do),
            Some(Keyword::Return) => ReturnStatement::parse(stream).map(Statement::Return),
            _ => Err(SyntaxError::expected(
                ["statement"],
                stream.peek()?,
                Self::NON_TERMINAL,
            )),
        }
    }
}

impl CouldParse for Statement {
    fn could_parse(stream: &mut TokenStream) -> SyntaxResult<bool> {
        Ok(matches!(
            peek_keyword(stream)?,
            Some(Keyword::Let | Keyword::If | Keyword::While | Keyword::Do | Keyword::Return)
        ))
    }
}

impl Statement {
    pub(crate) fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        match self {
            Statement::Let(statement) => statement.push_children(children),
            Statement::If(statement) => statement.push_children(children),
            Statement::While(statement) => statement.push_children(children),
            Statement::Do(statement) => statement.push_children(children),
            Statement::Return(statement) => statement.push_children(children),
        }
    }
}

/// `'let' varName ('[' expression ']')? '=' expression ';'`
#[derive(Debug, Clone, PartialEq)]
pub struct LetStatement {
    pub name: String,
    pub index: Option<Expression>,
    pub value: Expression,
}

impl Parse for LetStatement {
    const NON_TERMINAL: &'static str = "letStatement";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::Let], Self::NON_TERMINAL)?;
        let name = expect_identifier(stream, Self::NON_TERMINAL)?;
        let index = if consume_symbol(stream, Symbol::LBracket)? {
            let index = Expression::parse(stream)?;
            expect_symbol(stream, Symbol::RBracket, Self::NON_TERMINAL)?;
            Some(index)
        } else {
            None
        };
        expect_symbol(stream, Symbol::Eq, Self::NON_TERMINAL)?;
        let value = Expression::parse(stream)?;
        expect_symbol(stream, Symbol::SemiColon, Self::NON_TERMINAL)?;
        Ok(Self { name, index, value })
    }
}

impl LetStatement {
    fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::Let);
        children.identifier(&self.name);
        if let Some(index) = &self.index {
            children.symbol(Symbol::LBracket);
            children.node(index);
            children.symbol(Symbol::RBracket);
        }
        children.symbol(Symbol::Eq);
        children.node(&self.value);
        children.symbol(Symbol::SemiColon);
    }
}

/// `'if' '(' expression ')' '{' statements '}' ('else' '{' statements '}')?`
#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Statements,
    pub else_branch: Option<Statements>,
}

impl Parse for IfStatement {
    const NON_TERMINAL: &'static str = "ifStatement";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::If], Self::NON_TERMINAL)?;
        let condition = parse_condition(stream, Self::NON_TERMINAL)?;
        let then_branch = parse_block(stream, Self::NON_TERMINAL)?;
        let else_branch = if peek_keyword(stream)? == Some(Keyword::Else) {
            stream.consume_current();
            Some(parse_block(stream, Self::NON_TERMINAL)?)
        } else {
            None
        };
        Ok(Self {
            condition,
            then_branch,
            else_branch,
        })
    }
}

impl IfStatement {
    fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::If);
        push_condition(children, &self.condition);
        push_block(children, &self.then_branch);
        if let Some(else_branch) = &self.else_branch {
            children.keyword(Keyword::Else);
            push_block(children, else_branch);
        }
    }
}

/// `'while' '(' expression ')' '{' statements '}'`
#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Statements,
}

impl Parse for WhileStatement {
    const NON_TERMINAL: &'static str = "whileStatement";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::While], Self::NON_TERMINAL)?;
        let condition = parse_condition(stream, Self::NON_TERMINAL)?;
        let body = parse_block(stream, Self::NON_TERMINAL)?;
        Ok(Self { condition, body })
    }
}

impl WhileStatement {
    fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::While);
        push_condition(children, &self.condition);
        push_block(children, &self.body);
    }
}

/// `'do' subroutineCall ';'`
#[derive(Debug, Clone, PartialEq)]
pub struct DoStatement {
    pub call: SubroutineCall,
}

impl Parse for DoStatement {
    const NON_TERMINAL: &'static str = "doStatement";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::Do], Self::NON_TERMINAL)?;
        let call = SubroutineCall::parse(stream)?;
        expect_symbol(stream, Symbol::SemiColon, Self::NON_TERMINAL)?;
        Ok(Self { call })
    }
}

impl DoStatement {
    fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::Do);
        self.call.push_children(children);
        children.symbol(Symbol::SemiColon);
    }
}

/// `'return' expression? ';'`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStatement {
    pub value: Option<Expression>,
}

impl Parse for ReturnStatement {
    const NON_TERMINAL: &'static str = "returnStatement";

    fn parse(stream: &mut TokenStream) -> SyntaxResult<Self> {
        expect_keyword(stream, &[Keyword::Return], Self::NON_TERMINAL)?;
        let value = if peek_symbol(stream)? == Some(Symbol::SemiColon) {
            None
        } else {
            Some(Expression::parse(stream)?)
        };
        expect_symbol(stream, Symbol::SemiColon, Self::NON_TERMINAL)?;
        Ok(Self { value })
    }
}

impl ReturnStatement {
    fn push_children<'a>(&'a self, children: &mut Children<'a>) {
        children.keyword(Keyword::Return);
        if let Some(value) = &self.value {
            children.node(value);
        }
        children.symbol(Symbol::SemiColon);
    }
}

/// `'(' expression ')'`
fn parse_condition(
    stream: &mut TokenStream,
    non_terminal: &'static str,
) -> SyntaxResult<Expression> {
    expect_symbol(stream, Symbol::LParen, non_terminal)?;
    let condition = Expression::parse(stream)?;
    expect_symbol(stream, Symbol::RParen, non_terminal)?;
    Ok(condition)
}

/// `'{' statements '}'`
fn parse_block(
    stream: &mut TokenStream,
    non_terminal: &'static str,
) -> SyntaxResult<Statements> {
    expect_symbol(stream, Symbol::LCurly, non_terminal)?;
    let statements = Statements::parse(stream)?;
    expect_block_end(stream, non_terminal)?;
    Ok(statements)
}

fn push_condition<'a>(children: &mut Children<'a>, condition: &'a Expression) {
    children.symbol(Symbol::LParen);
    children.node(condition);
    children.symbol(Symbol::RParen);
}

fn push_block<'a>(children: &mut Children<'a>, statements: &'a Statements) {
    children.symbol(Symbol::LCurly);
    children.node(statements);
    children.symbol(Symbol::RCurly);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{ErrorKind, Term};
    use jack_tokens::TokenKind;
    use test_log::test;

    fn parse_statement(src: &str) -> SyntaxResult<Statement> {
        Statement::parse(&mut TokenStream::new(src))
    }

    #[test]
    fn test_let_with_index() {
        let Statement::Let(statement) = parse_statement("let a[i] = x;").unwrap() else {
            panic!("expected a let statement");
        };
        assert_eq!(statement.name, "a");
        assert_eq!(
            statement.index.map(|index| index.term),
            Some(Term::VariableRef("i".to_string()))
        );
        assert_eq!(statement.value.term, Term::VariableRef("x".to_string()));
    }

    #[test]
    fn test_let_with_constant_index() {
        let statement = parse_statement("let x[5] = 3;").unwrap();
        assert_eq!(
            statement,
            Statement::Let(LetStatement {
                name: "x".to_string(),
                index: Some(Expression {
                    term: Term::IntegerLiteral(5_u16.into()),
                    rest: vec![],
                }),
                value: Expression {
                    term: Term::IntegerLiteral(3_u16.into()),
                    rest: vec![],
                },
            })
        );
    }

    #[test]
    fn test_return_without_value() {
        let Statement::Return(statement) = parse_statement("return;").unwrap() else {
            panic!("expected a return statement");
        };
        assert_eq!(statement.value, None);
    }

    #[test]
    fn test_if_else() {
        let Statement::If(statement) =
            parse_statement("if (x) { let y = 1; } else { do f(); return; }").unwrap()
        else {
            panic!("expected an if statement");
        };
        assert_eq!(statement.then_branch.statements.len(), 1);
        assert_eq!(
            statement
                .else_branch
                .map(|branch| branch.statements.len()),
            Some(2)
        );
    }

    #[test]
    fn test_while_with_empty_body() {
        let Statement::While(statement) = parse_statement("while (true) { }").unwrap() else {
            panic!("expected a while statement");
        };
        assert!(statement.body.statements.is_empty());
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_statement("while (x) { let y = 1;").unwrap_err();
        match err.kind {
            ErrorKind::UnexpectedEof { expected } => assert_eq!(expected, ["'}'", "statement"]),
            kind => panic!("unexpected {kind:?}"),
        }
    }

    #[test]
    fn test_not_a_statement() {
        let err = parse_statement("var int x;").unwrap_err();
        match err.kind {
            ErrorKind::ExpectedToken { found, .. } => {
                assert_eq!(found, TokenKind::Keyword(Keyword::Var))
            }
            kind => panic!("unexpected {kind:?}"),
        }
        assert_eq!(err.non_terminal, Some("statement"));
    }

    #[test]
    fn test_do_requires_a_call() {
        assert!(parse_statement("do x;").is_err());
        assert!(parse_statement("do Output.println();").is_ok());
    }
}
