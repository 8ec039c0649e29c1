use crate::minic_parser::token::{Token, TokenKind};
use std::fmt;

// Arena handle. Ids are dense, never freed and never reused within a parse.
pub type NodeId = usize;

// The five binary expression operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
}

impl BinaryOp {
    // Maps an operator token kind to its node operator, None for kinds
    // that are not binary operators
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::EqEq => Some(BinaryOp::Eq),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Which syntactic family a node belongs to
#[derive(Debug, PartialEq)]
pub enum NodeType {
    Term,
    Expression,
    Statement,
    Predicate,
}

// Actual data of an AST node. Child links are arena handles; optional links
// model "no successor" (a declaration without initializer, a conditional
// without elif/else tail). An ElseBranch has no successor field at all, so
// a predicate chain always terminates.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeData {
    // Terms
    IntLiteral { token: Token },
    Identifier { token: Token },
    Paren { expr: NodeId },

    // Expressions
    BinaryExpr { op: BinaryOp, lhs: NodeId, rhs: NodeId },

    // Statements
    Declaration { name: Token, init: Option<NodeId> },
    Assignment { name: Token, value: NodeId },
    Block { stmts: Vec<NodeId> },
    Conditional { cond: NodeId, body: NodeId, pred: Option<NodeId> },
    Return { value: NodeId },

    // Predicates (the elif/else tail of a conditional)
    ElifBranch { cond: NodeId, body: NodeId, pred: Option<NodeId> },
    ElseBranch { body: NodeId },
}

#[derive(Debug)]
pub struct Node {
    pub id: NodeId,     // ID of the node within its arena
    pub data: NodeData, // Actual data of the node
}

pub trait NodeTrait {
    // Return the syntactic family of the given node
    fn type_of(&self) -> NodeType;
}

impl NodeTrait for Node {
    fn type_of(&self) -> NodeType {
        match self.data {
            NodeData::IntLiteral { .. } | NodeData::Identifier { .. } | NodeData::Paren { .. } => {
                NodeType::Term
            }
            NodeData::BinaryExpr { .. } => NodeType::Expression,
            NodeData::Declaration { .. }
            | NodeData::Assignment { .. }
            | NodeData::Block { .. }
            | NodeData::Conditional { .. }
            | NodeData::Return { .. } => NodeType::Statement,
            NodeData::ElifBranch { .. } | NodeData::ElseBranch { .. } => NodeType::Predicate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token {
            kind,
            line: 1,
            col: 1,
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_type_of() {
        let n = Node {
            id: 0,
            data: NodeData::IntLiteral {
                token: token(TokenKind::IntLiteral, "5"),
            },
        };
        assert_eq!(n.type_of(), NodeType::Term);

        let n = Node {
            id: 1,
            data: NodeData::BinaryExpr {
                op: BinaryOp::Add,
                lhs: 0,
                rhs: 0,
            },
        };
        assert_eq!(n.type_of(), NodeType::Expression);

        let n = Node {
            id: 2,
            data: NodeData::Declaration {
                name: token(TokenKind::Identifier, "x"),
                init: None,
            },
        };
        assert_eq!(n.type_of(), NodeType::Statement);

        let n = Node {
            id: 3,
            data: NodeData::ElseBranch { body: 0 },
        };
        assert_eq!(n.type_of(), NodeType::Predicate);
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(
            BinaryOp::from_token_kind(TokenKind::Plus),
            Some(BinaryOp::Add)
        );
        assert_eq!(
            BinaryOp::from_token_kind(TokenKind::EqEq),
            Some(BinaryOp::Eq)
        );
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Lt), None);
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Assign), None);
    }
}
