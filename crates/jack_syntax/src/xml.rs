//! Renders token sequences and parse trees as XML

use crate::parser::{ParseNode, SyntaxElement};
use jack_tokens::TokenKind;
use std::fmt::Write as _;

const INDENT: &str = "  ";

/// Renders a flat token sequence, one element per token inside a `<tokens>` root
pub fn tokens_to_xml<'a, I>(tokens: I) -> String
where
    I: IntoIterator<Item = &'a TokenKind>,
{
    let mut output = String::from("<tokens>\n");
    for token in tokens {
        write_terminal(&mut output, 0, token);
    }
    output.push_str("</tokens>\n");
    output
}

/// Renders a parse tree rooted at `node`, nesting one element per node
pub fn tree_to_xml<'a>(node: impl Into<ParseNode<'a>>) -> String {
    let mut output = String::new();
    write_node(&mut output, 0, node.into());
    output
}

fn write_node(output: &mut String, depth: usize, node: ParseNode<'_>) {
    let name = node.name();
    indent(output, depth);
    let _ = writeln!(output, "<{name}>");
    for child in node.children() {
        match child {
            SyntaxElement::Node(child) => write_node(output, depth + 1, child),
            SyntaxElement::Token(token) => write_terminal(output, depth + 1, &token),
        }
    }
    indent(output, depth);
    let _ = writeln!(output, "</{name}>");
}

fn write_terminal(output: &mut String, depth: usize, token: &TokenKind) {
    let tag = token.category().tag();
    indent(output, depth);
    let _ = writeln!(output, "<{tag}> {} </{tag}>", escape(&token.value()));
}

fn indent(output: &mut String, depth: usize) {
    for _ in 0..depth {
        output.push_str(INDENT);
    }
}

/// Escapes the characters that cannot appear verbatim in element content
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{tokenize, TokenStream};
    use crate::parser::{parse_class, Parse, Statement};
    use test_log::test;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b & \"c\" > d"), "a &lt; b &amp; &quot;c&quot; &gt; d");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_tokens_xml() {
        let tokens = tokenize("let s = \"x<y\";").unwrap();
        let xml = tokens_to_xml(tokens.iter().map(|token| token.kind()));
        assert_eq!(
            xml,
            "<tokens>\n\
             <keyword> let </keyword>\n\
             <identifier> s </identifier>\n\
             <symbol> = </symbol>\n\
             <stringConstant> x&lt;y </stringConstant>\n\
             <symbol> ; </symbol>\n\
             </tokens>\n"
        );
    }

    #[test]
    fn test_integer_written_as_spelled() {
        let tokens = tokenize("007").unwrap();
        assert_eq!(
            tokens_to_xml(tokens.iter().map(|token| token.kind())),
            "<tokens>\n<integerConstant> 007 </integerConstant>\n</tokens>\n"
        );
    }

    #[test]
    fn test_tree_xml() {
        let class = parse_class(&mut TokenStream::new("class A { field int x; }")).unwrap();
        assert_eq!(
            tree_to_xml(&class),
            "<class>\n\
             \x20 <keyword> class </keyword>\n\
             \x20 <identifier> A </identifier>\n\
             \x20 <symbol> { </symbol>\n\
             \x20 <classVarDec>\n\
             \x20   <keyword> field </keyword>\n\
             \x20   <keyword> int </keyword>\n\
             \x20   <identifier> x </identifier>\n\
             \x20   <symbol> ; </symbol>\n\
             \x20 </classVarDec>\n\
             \x20 <symbol> } </symbol>\n\
             </class>\n"
        );
    }

    #[test]
    fn test_statement_xml() {
        let statement = Statement::parse(&mut TokenStream::new("return x < 1;")).unwrap();
        assert_eq!(
            tree_to_xml(&statement),
            "<returnStatement>\n\
             \x20 <keyword> return </keyword>\n\
             \x20 <expression>\n\
             \x20   <term>\n\
             \x20     <identifier> x </identifier>\n\
             \x20   </term>\n\
             \x20   <symbol> &lt; </symbol>\n\
             \x20   <term>\n\
             \x20     <integerConstant> 1 </integerConstant>\n\
             \x20   </term>\n\
             \x20 </expression>\n\
             \x20 <symbol> ; </symbol>\n\
             </returnStatement>\n"
        );
    }

    #[test]
    fn test_empty_lists_are_still_emitted() {
        let class = parse_class(&mut TokenStream::new(
            "class A { function void f() { do g(); return; } }",
        ))
        .unwrap();
        let xml = tree_to_xml(&class);
        assert!(xml.contains("    <parameterList>\n    </parameterList>\n"));
        assert!(xml.contains("<expressionList>\n"));
        assert!(!xml.contains("<subroutineCall>"));
    }
}
