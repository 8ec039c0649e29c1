use crate::minic_parser::input_stream::Position;
use crate::minic_parser::token::TokenKind;
use std::fmt;

// Errors raised while tokenizing
#[derive(Debug, Clone, PartialEq)]
pub enum LexErrorKind {
    InvalidIdentifier(String), // Digit run immediately followed by a letter
    UnexpectedCharacter(char), // Character matching none of the lexical rules
}

// Errors raised while parsing. Every one of these is fatal to the parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    ExpectedToken(TokenKind), // A required terminal was absent
    ExpectedExpression,
    ExpectedScope,
    ExpectedStatement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    Lex(LexErrorKind),
    Parse(ParseErrorKind),
}

impl ErrorKind {
    // Stable code for this error, used by the fixture test runner
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Lex(LexErrorKind::InvalidIdentifier(_)) => "invalid-identifier",
            ErrorKind::Lex(LexErrorKind::UnexpectedCharacter(_)) => "unexpected-character",
            ErrorKind::Parse(ParseErrorKind::ExpectedToken(_)) => "expected-token",
            ErrorKind::Parse(ParseErrorKind::ExpectedExpression) => "expected-expression",
            ErrorKind::Parse(ParseErrorKind::ExpectedScope) => "expected-scope",
            ErrorKind::Parse(ParseErrorKind::ExpectedStatement) => "expected-statement",
        }
    }
}

// A fatal diagnostic on the given source position. There is no recovery:
// the first error ends the pass and is the only one reported.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub line: usize, // Line number of the error (1 based)
    pub col: usize,  // Offset on line of the error (1 based)
}

impl SyntaxError {
    pub fn lex(kind: LexErrorKind, pos: Position) -> Self {
        SyntaxError {
            kind: ErrorKind::Lex(kind),
            line: pos.line,
            col: pos.col,
        }
    }

    pub fn parse(kind: ParseErrorKind, line: usize, col: usize) -> Self {
        SyntaxError {
            kind: ErrorKind::Parse(kind),
            line,
            col,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.as_str()
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Lex(LexErrorKind::InvalidIdentifier(buf)) => write!(
                f,
                "invalid identifier '{}' on line {} column {}",
                buf, self.line, self.col
            ),
            ErrorKind::Lex(LexErrorKind::UnexpectedCharacter(c)) => write!(
                f,
                "unexpected character '{}' on line {} column {}",
                c, self.line, self.col
            ),
            ErrorKind::Parse(ParseErrorKind::ExpectedToken(kind)) => write!(
                f,
                "expected {} on line {} column {}",
                kind, self.line, self.col
            ),
            ErrorKind::Parse(ParseErrorKind::ExpectedExpression) => write!(
                f,
                "expected expression on line {} column {}",
                self.line, self.col
            ),
            ErrorKind::Parse(ParseErrorKind::ExpectedScope) => {
                write!(f, "expected scope on line {} column {}", self.line, self.col)
            }
            ErrorKind::Parse(ParseErrorKind::ExpectedStatement) => write!(
                f,
                "expected statement on line {} column {}",
                self.line, self.col
            ),
        }
    }
}

impl std::error::Error for SyntaxError {}
