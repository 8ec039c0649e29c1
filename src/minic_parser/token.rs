use lazy_static::lazy_static;
use phf::phf_map;
use std::collections::HashMap;
use std::fmt;

// All token kinds the tokenizer can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    KwInt,
    KwIf,
    KwElif,
    KwElse,
    KwReturn,

    Identifier,
    IntLiteral,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Assign,
    EqEq,
    Lt,
    Le,
    Gt,
    Ge,

    // Punctuation
    Semicolon,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // End of stream sentinel, always the last token of a stream
    Eof,
}

// Identifier buffers are classified against this fixed keyword set
pub static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "int" => TokenKind::KwInt,
    "if" => TokenKind::KwIf,
    "elif" => TokenKind::KwElif,
    "else" => TokenKind::KwElse,
    "return" => TokenKind::KwReturn,
};

lazy_static! {
    // Binary infix precedence levels. Kinds absent from this map are not
    // usable as infix operators, which deliberately excludes < <= > >=.
    // Note that == sits on the multiplicative level: 1+2==3 parses as
    // 1+(2==3), matching the language as shipped.
    static ref BINARY_PRECEDENCE: HashMap<TokenKind, u8> = {
        let mut m = HashMap::new();
        m.insert(TokenKind::Plus, 0);
        m.insert(TokenKind::Minus, 0);
        m.insert(TokenKind::Star, 1);
        m.insert(TokenKind::Slash, 1);
        m.insert(TokenKind::EqEq, 1);
        m
    };
}

// Returns the infix precedence of the given kind, or None when the kind
// is not a binary operator
pub fn binary_precedence(kind: TokenKind) -> Option<u8> {
    BINARY_PRECEDENCE.get(&kind).copied()
}

impl TokenKind {
    // How the kind reads in a diagnostic ("expected ';' on line ...")
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::KwInt => "'int'",
            TokenKind::KwIf => "'if'",
            TokenKind::KwElif => "'elif'",
            TokenKind::KwElse => "'else'",
            TokenKind::KwReturn => "'return'",
            TokenKind::Identifier => "identifier",
            TokenKind::IntLiteral => "integer literal",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Assign => "'='",
            TokenKind::EqEq => "'=='",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Semicolon => "';'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Eof => "end of stream",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// A classified, position-tagged lexical unit
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,          // Line of the first character (1 based)
    pub col: usize,           // Column of the first character (1 based)
    pub text: Option<String>, // Source text of the token, None for Eof
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.text) {
            (TokenKind::Identifier, Some(text)) => write!(f, "identifier '{}'", text),
            (TokenKind::IntLiteral, Some(text)) => write!(f, "integer literal {}", text),
            _ => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert_eq!(KEYWORDS.get("int"), Some(&TokenKind::KwInt));
        assert_eq!(KEYWORDS.get("if"), Some(&TokenKind::KwIf));
        assert_eq!(KEYWORDS.get("elif"), Some(&TokenKind::KwElif));
        assert_eq!(KEYWORDS.get("else"), Some(&TokenKind::KwElse));
        assert_eq!(KEYWORDS.get("return"), Some(&TokenKind::KwReturn));
        assert_eq!(KEYWORDS.get("integer"), None);
        assert_eq!(KEYWORDS.get("x"), None);
    }

    #[test]
    fn test_precedence_table() {
        assert_eq!(binary_precedence(TokenKind::Plus), Some(0));
        assert_eq!(binary_precedence(TokenKind::Minus), Some(0));
        assert_eq!(binary_precedence(TokenKind::Star), Some(1));
        assert_eq!(binary_precedence(TokenKind::Slash), Some(1));

        // Equality shares the multiplicative level
        assert_eq!(
            binary_precedence(TokenKind::EqEq),
            binary_precedence(TokenKind::Star)
        );
    }

    #[test]
    fn test_comparisons_are_not_infix() {
        assert_eq!(binary_precedence(TokenKind::Lt), None);
        assert_eq!(binary_precedence(TokenKind::Le), None);
        assert_eq!(binary_precedence(TokenKind::Gt), None);
        assert_eq!(binary_precedence(TokenKind::Ge), None);
        assert_eq!(binary_precedence(TokenKind::Assign), None);
        assert_eq!(binary_precedence(TokenKind::Eof), None);
    }

    #[test]
    fn test_token_display() {
        let t = Token {
            kind: TokenKind::Identifier,
            line: 1,
            col: 1,
            text: Some("foo".to_string()),
        };
        assert_eq!("identifier 'foo'", t.to_string());

        let t = Token {
            kind: TokenKind::Semicolon,
            line: 1,
            col: 4,
            text: Some(";".to_string()),
        };
        assert_eq!("';'", t.to_string());
    }
}
