pub mod program;

use self::program::Program;
use crate::minic_parser::errors::{ParseErrorKind, SyntaxError};
use crate::minic_parser::node::{BinaryOp, NodeData, NodeId};
use crate::minic_parser::token::{binary_precedence, Token, TokenKind};

// Recursive-descent parser over a complete token sequence. Produces nodes
// into the given Program's arena; the first syntax error aborts the parse.
pub struct Parser<'a> {
    tokens: Vec<Token>,    // Token sequence, Eof terminated
    cursor: usize,         // Index of the next unconsumed token
    program: &'a mut Program, // Owner of every node produced
}

impl<'a> Parser<'a> {
    // Creates a new parser object for the given token sequence
    pub fn new(tokens: Vec<Token>, program: &'a mut Program) -> Self {
        Parser {
            tokens,
            cursor: 0,
            program,
        }
    }

    // Parses statements until end of stream, filling the program's
    // statement list in source order
    pub fn parse(&mut self) -> Result<(), SyntaxError> {
        while let Some(kind) = self.peek_kind(0) {
            if kind == TokenKind::Eof {
                break;
            }

            match self.parse_stmt()? {
                Some(stmt) => self.program.statements.push(stmt),
                None => return Err(self.error_here(ParseErrorKind::ExpectedStatement)),
            }
        }

        Ok(())
    }

    // Parses a single statement, dispatching on lookahead.
    // Ok(None) means no statement starts here; the caller decides whether
    // that is an error.
    fn parse_stmt(&mut self) -> Result<Option<NodeId>, SyntaxError> {
        // int IDENT [= expr] ;
        if self.peek_kind(0) == Some(TokenKind::KwInt)
            && self.peek_kind(1) == Some(TokenKind::Identifier)
        {
            self.consume(); // int
            let name = self.consume();

            let init = if self.try_consume(TokenKind::Assign).is_some() {
                match self.parse_expr(0)? {
                    Some(expr) => Some(expr),
                    None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
                }
            } else {
                None
            };

            self.expect(TokenKind::Semicolon)?;
            return Ok(Some(self.program.add_node(NodeData::Declaration { name, init })));
        }

        // IDENT = expr ;  -- whether the name was ever declared is the
        // code generator's concern, not checked here
        if self.peek_kind(0) == Some(TokenKind::Identifier)
            && self.peek_kind(1) == Some(TokenKind::Assign)
        {
            let name = self.consume();
            self.consume(); // =

            let value = match self.parse_expr(0)? {
                Some(expr) => expr,
                None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
            };

            self.expect(TokenKind::Semicolon)?;
            return Ok(Some(self.program.add_node(NodeData::Assignment { name, value })));
        }

        // { ... }
        if self.peek_kind(0) == Some(TokenKind::LBrace) {
            return match self.parse_scope()? {
                Some(scope) => Ok(Some(scope)),
                None => Err(self.error_here(ParseErrorKind::ExpectedScope)),
            };
        }

        // if ( expr ) scope [elif/else chain]
        if self.try_consume(TokenKind::KwIf).is_some() {
            self.expect(TokenKind::LParen)?;
            let cond = match self.parse_expr(0)? {
                Some(expr) => expr,
                None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
            };
            self.expect(TokenKind::RParen)?;

            let body = match self.parse_scope()? {
                Some(scope) => scope,
                None => return Err(self.error_here(ParseErrorKind::ExpectedScope)),
            };

            let pred = self.parse_if_pred()?;
            return Ok(Some(
                self.program.add_node(NodeData::Conditional { cond, body, pred }),
            ));
        }

        // return ( expr ) ;  -- the return value is required to be parenthesized
        if self.try_consume(TokenKind::KwReturn).is_some() {
            self.expect(TokenKind::LParen)?;
            let value = match self.parse_expr(0)? {
                Some(expr) => expr,
                None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
            };
            self.expect(TokenKind::RParen)?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Some(self.program.add_node(NodeData::Return { value })));
        }

        Ok(None)
    }

    // Parses a braced scope into a block node, or Ok(None) when the next
    // token is not an opening brace
    fn parse_scope(&mut self) -> Result<Option<NodeId>, SyntaxError> {
        if self.try_consume(TokenKind::LBrace).is_none() {
            return Ok(None);
        }

        let mut stmts = Vec::new();
        while let Some(stmt) = self.parse_stmt()? {
            stmts.push(stmt);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(Some(self.program.add_node(NodeData::Block { stmts })))
    }

    // Parses the elif/else tail of a conditional. The chain is built
    // recursively; an else branch has no successor, so it always terminates
    // the chain.
    fn parse_if_pred(&mut self) -> Result<Option<NodeId>, SyntaxError> {
        if self.try_consume(TokenKind::KwElif).is_some() {
            self.expect(TokenKind::LParen)?;
            let cond = match self.parse_expr(0)? {
                Some(expr) => expr,
                None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
            };
            self.expect(TokenKind::RParen)?;

            let body = match self.parse_scope()? {
                Some(scope) => scope,
                None => return Err(self.error_here(ParseErrorKind::ExpectedScope)),
            };

            let pred = self.parse_if_pred()?;
            return Ok(Some(
                self.program.add_node(NodeData::ElifBranch { cond, body, pred }),
            ));
        }

        if self.try_consume(TokenKind::KwElse).is_some() {
            let body = match self.parse_scope()? {
                Some(scope) => scope,
                None => return Err(self.error_here(ParseErrorKind::ExpectedScope)),
            };
            return Ok(Some(self.program.add_node(NodeData::ElseBranch { body })));
        }

        Ok(None)
    }

    // Parses an expression with precedence climbing. min_prec is the lowest
    // operator precedence this call will still consume; equal-precedence
    // operators associate left, higher-precedence ones nest on the right.
    fn parse_expr(&mut self, min_prec: u8) -> Result<Option<NodeId>, SyntaxError> {
        let lhs = match self.parse_term()? {
            Some(term) => term,
            None => return Ok(None),
        };

        loop {
            let (prec, op) = match self.peek_kind(0) {
                Some(kind) => match (binary_precedence(kind), BinaryOp::from_token_kind(kind)) {
                    (Some(prec), Some(op)) if prec >= min_prec => (prec, op),
                    _ => break,
                },
                None => break,
            };

            self.consume(); // the operator

            let rhs = match self.parse_expr(prec + 1)? {
                Some(expr) => expr,
                None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
            };

            // The accumulated lhs keeps its handle: its old contents move
            // into a fresh node that becomes the left operand of the new
            // binary node.
            if let Some(lhs_copy) = self.program.duplicate_node(lhs) {
                self.program
                    .replace_node(lhs, NodeData::BinaryExpr { op, lhs: lhs_copy, rhs });
            }
        }

        Ok(Some(lhs))
    }

    // Parses a term: integer literal, identifier or parenthesized
    // sub-expression. Ok(None) when none of the alternatives start here.
    fn parse_term(&mut self) -> Result<Option<NodeId>, SyntaxError> {
        if let Some(token) = self.try_consume(TokenKind::IntLiteral) {
            return Ok(Some(self.program.add_node(NodeData::IntLiteral { token })));
        }

        if let Some(token) = self.try_consume(TokenKind::Identifier) {
            return Ok(Some(self.program.add_node(NodeData::Identifier { token })));
        }

        if self.try_consume(TokenKind::LParen).is_some() {
            let expr = match self.parse_expr(0)? {
                Some(expr) => expr,
                None => return Err(self.error_here(ParseErrorKind::ExpectedExpression)),
            };
            self.expect(TokenKind::RParen)?;
            return Ok(Some(self.program.add_node(NodeData::Paren { expr })));
        }

        Ok(None)
    }

    fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.cursor + offset)
    }

    fn peek_kind(&self, offset: usize) -> Option<TokenKind> {
        self.peek(offset).map(|t| t.kind)
    }

    // Consumes the current token. The cursor never moves past the Eof
    // sentinel, so the current token always exists.
    fn consume(&mut self) -> Token {
        let token = self.tokens[self.cursor].clone();
        if self.cursor + 1 < self.tokens.len() {
            self.cursor += 1;
        }
        token
    }

    // Consumes the current token only when it has the given kind
    fn try_consume(&mut self, kind: TokenKind) -> Option<Token> {
        match self.peek(0) {
            Some(token) if token.kind == kind => Some(self.consume()),
            _ => None,
        }
    }

    // Consumes the current token of the given kind, or fails with an
    // expected-token diagnostic on the current position
    fn expect(&mut self, kind: TokenKind) -> Result<Token, SyntaxError> {
        match self.try_consume(kind) {
            Some(token) => Ok(token),
            None => Err(self.error_here(ParseErrorKind::ExpectedToken(kind))),
        }
    }

    // Builds a fatal diagnostic pointing at the current token
    fn error_here(&self, kind: ParseErrorKind) -> SyntaxError {
        match self.peek(0) {
            Some(token) => SyntaxError::parse(kind, token.line, token.col),
            None => SyntaxError::parse(kind, 0, 0),
        }
    }
}
