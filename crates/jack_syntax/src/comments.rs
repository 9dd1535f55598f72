//! Removes comments from source text before it is tokenized

#[derive(Debug, Copy, Clone, PartialEq)]
enum State {
    Code,
    StringLiteral,
    LineComment,
    BlockComment { spans_lines: bool },
}

/// Removes every `//` line comment and `/* */` block comment from `src`.
///
/// Comment openers inside string literals are left alone. A line comment is removed up to, but not
/// including, its newline. A block comment is replaced by the newlines it contains, or by a single
/// space if it contains none, so line numbers are preserved and the lexemes on either side stay
/// separate. Block comments do not nest, and one that is never closed runs to the end of input.
pub fn strip_comments(src: &str) -> String {
    let mut stripped = String::with_capacity(src.len());
    let mut state = State::Code;
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            State::Code => match (c, chars.peek()) {
                ('/', Some('/')) => {
                    chars.next();
                    State::LineComment
                }
                ('/', Some('*')) => {
                    chars.next();
                    State::BlockComment { spans_lines: false }
                }
                ('"', _) => {
                    stripped.push(c);
                    State::StringLiteral
                }
                _ => {
                    stripped.push(c);
                    State::Code
                }
            },
            State::StringLiteral => {
                stripped.push(c);
                // a newline also ends the literal, the same way the tokenizer sees it
                if c == '"' || c == '\n' {
                    State::Code
                } else {
                    State::StringLiteral
                }
            }
            State::LineComment => {
                if c == '\n' {
                    stripped.push(c);
                    State::Code
                } else {
                    State::LineComment
                }
            }
            State::BlockComment { spans_lines } => match (c, chars.peek()) {
                ('*', Some('/')) => {
                    chars.next();
                    if !spans_lines {
                        stripped.push(' ');
                    }
                    State::Code
                }
                ('\n', _) => {
                    stripped.push(c);
                    State::BlockComment { spans_lines: true }
                }
                _ => State::BlockComment { spans_lines },
            },
        };
    }

    stripped
}
