use crate::minic_parser::errors::{LexErrorKind, SyntaxError};
use crate::minic_parser::input_stream::InputStream;
use crate::minic_parser::token::{Token, TokenKind, KEYWORDS};

// The tokenizer reads the input stream and produces the complete token
// sequence in one pass. The sequence always ends with exactly one Eof token.
pub struct Tokenizer<'a> {
    pub stream: &'a mut InputStream, // Source character input stream
    consumed: Vec<char>,             // Current consumed characters for current token
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a mut InputStream) -> Self {
        Tokenizer {
            stream: input,
            consumed: vec![],
        }
    }

    // Tokenizes the whole stream. The first lexical error aborts the pass.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            let start = self.stream.position();

            let c = match self.stream.look_ahead(0) {
                Some(c) => c,
                None => break,
            };

            if c.is_ascii_whitespace() {
                self.stream.read_char();
                continue;
            }

            // A letter starts a maximal alphanumeric run, classified against
            // the keyword set and defaulting to an identifier
            if c.is_ascii_alphabetic() {
                self.clear_consume_buffer();
                while let Some(c) = self.stream.look_ahead(0) {
                    if !c.is_ascii_alphanumeric() {
                        break;
                    }
                    self.stream.read_char();
                    self.consume(c);
                }

                let buf = self.get_consumed_str();
                let kind = KEYWORDS
                    .get(buf.as_str())
                    .copied()
                    .unwrap_or(TokenKind::Identifier);
                tokens.push(Token {
                    kind,
                    line: start.line,
                    col: start.col,
                    text: Some(buf),
                });
                continue;
            }

            // A digit starts a maximal digit run. A letter directly after the
            // run means a malformed identifier, a fatal lex error.
            if c.is_ascii_digit() {
                self.clear_consume_buffer();
                while let Some(c) = self.stream.look_ahead(0) {
                    if !c.is_ascii_digit() {
                        break;
                    }
                    self.stream.read_char();
                    self.consume(c);
                }

                if let Some(c) = self.stream.look_ahead(0) {
                    if c.is_ascii_alphabetic() {
                        // Report the buffer including the offending letter
                        self.consume(c);
                        return Err(SyntaxError::lex(
                            LexErrorKind::InvalidIdentifier(self.get_consumed_str()),
                            start,
                        ));
                    }
                }

                tokens.push(Token {
                    kind: TokenKind::IntLiteral,
                    line: start.line,
                    col: start.col,
                    text: Some(self.get_consumed_str()),
                });
                continue;
            }

            // Line comment, discarded up to (not including) the newline
            if c == '/' && self.stream.look_ahead(1) == Some('/') {
                while let Some(c) = self.stream.look_ahead(0) {
                    if c == '\n' {
                        break;
                    }
                    self.stream.read_char();
                }
                continue;
            }

            // Block comment, discarded up to the first */. An unterminated
            // comment swallows the rest of the stream.
            if c == '/' && self.stream.look_ahead(1) == Some('*') {
                self.stream.read_char();
                self.stream.read_char();
                while self.stream.look_ahead(0).is_some() {
                    if self.stream.look_ahead(0) == Some('*')
                        && self.stream.look_ahead(1) == Some('/')
                    {
                        self.stream.read_char();
                        self.stream.read_char();
                        break;
                    }
                    self.stream.read_char();
                }
                continue;
            }

            // Double-character operators take priority over their
            // single-character prefixes
            let (kind, text) = match c {
                '=' | '<' | '>' => {
                    self.stream.read_char();
                    let wide = self.stream.look_ahead(0) == Some('=');
                    if wide {
                        self.stream.read_char();
                    }
                    match (c, wide) {
                        ('=', true) => (TokenKind::EqEq, "=="),
                        ('=', false) => (TokenKind::Assign, "="),
                        ('<', true) => (TokenKind::Le, "<="),
                        ('<', false) => (TokenKind::Lt, "<"),
                        ('>', true) => (TokenKind::Ge, ">="),
                        (_, false) => (TokenKind::Gt, ">"),
                        (_, true) => (TokenKind::Ge, ">="),
                    }
                }
                '+' | '-' | '*' | '/' | ';' | '(' | ')' | '{' | '}' => {
                    self.stream.read_char();
                    match c {
                        '+' => (TokenKind::Plus, "+"),
                        '-' => (TokenKind::Minus, "-"),
                        '*' => (TokenKind::Star, "*"),
                        '/' => (TokenKind::Slash, "/"),
                        ';' => (TokenKind::Semicolon, ";"),
                        '(' => (TokenKind::LParen, "("),
                        ')' => (TokenKind::RParen, ")"),
                        '{' => (TokenKind::LBrace, "{"),
                        _ => (TokenKind::RBrace, "}"),
                    }
                }
                _ => {
                    return Err(SyntaxError::lex(
                        LexErrorKind::UnexpectedCharacter(c),
                        start,
                    ));
                }
            };

            tokens.push(Token {
                kind,
                line: start.line,
                col: start.col,
                text: Some(text.to_string()),
            });
        }

        let end = self.stream.position();
        tokens.push(Token {
            kind: TokenKind::Eof,
            line: end.line,
            col: end.col,
            text: None,
        });

        Ok(tokens)
    }

    // Consumes the given char into the current token buffer
    pub(crate) fn consume(&mut self, c: char) {
        self.consumed.push(c)
    }

    // Return the consumed string as a String
    pub fn get_consumed_str(&self) -> String {
        self.consumed.iter().collect()
    }

    // Clears the current consume buffer
    pub(crate) fn clear_consume_buffer(&mut self) {
        self.consumed.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minic_parser::errors::ErrorKind;

    fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
        let mut is = InputStream::new();
        is.read_from_str(input, None);
        Tokenizer::new(&mut is).tokenize()
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_declaration() {
        let tokens = tokenize("int x = 5;").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::IntLiteral,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].text.as_deref(), Some("x"));
        assert_eq!(tokens[3].text.as_deref(), Some("5"));
    }

    #[test]
    fn test_eof_always_terminates() {
        let tokens = tokenize("").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);

        let tokens = tokenize("  \n\t ").unwrap();
        assert_eq!(kinds(&tokens), vec![TokenKind::Eof]);

        let tokens = tokenize("1+2").unwrap();
        let eofs = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Eof)
            .count();
        assert_eq!(eofs, 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let tokens = tokenize("if elif else return int foo elsewhere if2").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::KwIf,
                TokenKind::KwElif,
                TokenKind::KwElse,
                TokenKind::KwReturn,
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[6].text.as_deref(), Some("elsewhere"));
        assert_eq!(tokens[7].text.as_deref(), Some("if2"));
    }

    #[test]
    fn test_invalid_identifier() {
        let err = tokenize("5x").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Lex(LexErrorKind::InvalidIdentifier("5x".to_string()))
        );
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 1);

        let err = tokenize("int x = 12ab;").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Lex(LexErrorKind::InvalidIdentifier("12a".to_string()))
        );
        assert_eq!(err.col, 9);
    }

    #[test]
    fn test_digit_run_with_separator_is_fine() {
        assert!(tokenize("5 x").is_ok());
        assert!(tokenize("5+x").is_ok());
        assert!(tokenize("5;").is_ok());
        assert!(tokenize("(5)").is_ok());
        assert!(tokenize("123").is_ok());
    }

    #[test]
    fn test_operators() {
        let tokens = tokenize("== = <= < >= > + - * /").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::EqEq,
                TokenKind::Assign,
                TokenKind::Le,
                TokenKind::Lt,
                TokenKind::Ge,
                TokenKind::Gt,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comments_discarded() {
        let tokens = tokenize("int x; // trailing comment\nint y; /* block\ncomment */ int z;")
            .unwrap();
        let names: Vec<&str> = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Identifier)
            .filter_map(|t| t.text.as_deref())
            .collect();
        assert_eq!(names, vec!["x", "y", "z"]);

        // Unterminated block comment swallows the rest of the stream
        let tokens = tokenize("int x; /* no end").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::KwInt,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("int x = @;").unwrap_err();
        assert_eq!(
            err.kind,
            ErrorKind::Lex(LexErrorKind::UnexpectedCharacter('@'))
        );
        assert_eq!(err.line, 1);
        assert_eq!(err.col, 9);
    }

    #[test]
    fn test_token_positions() {
        let tokens = tokenize("int x =\n  52;").unwrap();

        assert_eq!((tokens[0].line, tokens[0].col), (1, 1)); // int
        assert_eq!((tokens[1].line, tokens[1].col), (1, 5)); // x
        assert_eq!((tokens[2].line, tokens[2].col), (1, 7)); // =
        assert_eq!((tokens[3].line, tokens[3].col), (2, 3)); // 52
        assert_eq!((tokens[4].line, tokens[4].col), (2, 5)); // ;
    }
}
