//! Parser for derived-field formulas.
//!
//! The grammar is a single bare function call:
//!
//! ```text
//! formula    := ws* identifier ws* "(" args ")" ws*
//! identifier := [A-Za-z0-9_]+
//! args       := any text without ")"
//! ```
//!
//! There is no nesting, no operators and no literals outside of the argument text.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// A parsed `name(args)` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaCall {
    /// The function name exactly as written.
    pub identifier: String,
    /// Lowercase-normalized function name used for registry lookup.
    pub function_name: String,
    /// Text between the parentheses, untouched.
    pub raw_args: String,
}

impl FormulaCall {
    /// Comma-split, trimmed arguments. Blank argument text yields no arguments.
    pub fn args(&self) -> Vec<String> {
        if self.raw_args.trim().is_empty() {
            return Vec::new();
        }
        self.raw_args
            .split(',')
            .map(|arg| arg.trim().to_string())
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    MissingFunctionName,
    ExpectedOpenParen,
    UnclosedParen,
    TrailingInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseErrorKind::MissingFunctionName => "missing function name",
            ParseErrorKind::ExpectedOpenParen => "expected `(` after the function name",
            ParseErrorKind::UnclosedParen => "missing closing `)`",
            ParseErrorKind::TrailingInput => "unexpected text after `)`",
        };
        f.write_str(msg)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Formula must be a function call like name(args), e.g. sum() or calculateAge(): {kind} in `{formula}`")]
pub struct ParseError {
    pub formula: String,
    pub kind: ParseErrorKind,
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn consume_while<F>(&mut self, mut predicate: F) -> String
    where
        F: FnMut(char) -> bool,
    {
        let mut buf = String::new();
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            buf.push(ch);
            self.chars.next();
        }
        buf
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.chars.next();
            true
        } else {
            false
        }
    }
}

/// Parse a formula of the shape `name(args)`.
pub fn parse_formula(formula: &str) -> Result<FormulaCall, ParseError> {
    let err = |kind| ParseError {
        formula: formula.to_string(),
        kind,
    };

    let mut cursor = Cursor::new(formula.trim());

    let identifier = cursor.consume_while(is_word_char);
    if identifier.is_empty() {
        return Err(err(ParseErrorKind::MissingFunctionName));
    }

    cursor.consume_while(char::is_whitespace);
    if !cursor.eat('(') {
        return Err(err(ParseErrorKind::ExpectedOpenParen));
    }

    let raw_args = cursor.consume_while(|c| c != ')');
    if !cursor.eat(')') {
        return Err(err(ParseErrorKind::UnclosedParen));
    }

    if cursor.peek().is_some() {
        return Err(err(ParseErrorKind::TrailingInput));
    }

    Ok(FormulaCall {
        function_name: identifier.to_lowercase(),
        identifier,
        raw_args,
    })
}
