use crate::minic_parser::node::{Node, NodeData, NodeId};
use crate::minic_parser::node_arena::NodeArena;
use std::fmt;

// The result of a complete parse: the ordered top-level statements plus the
// arena every node of the tree lives in. The code generator reads nodes
// through get_node_by_id and must not outlive this value.
#[derive(Debug)]
pub struct Program {
    arena: NodeArena,
    pub statements: Vec<NodeId>, // Top-level statements in source order
}

impl Program {
    // Creates a new empty program
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            statements: Vec::new(),
        }
    }

    // Fetches a node by id or returns None when no node with this ID is found
    pub fn get_node_by_id(&self, node_id: NodeId) -> Option<&Node> {
        self.arena.get_node(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    // Places node data into the arena and returns its handle
    pub(crate) fn add_node(&mut self, data: NodeData) -> NodeId {
        self.arena.add_node(data)
    }

    pub(crate) fn duplicate_node(&mut self, node_id: NodeId) -> Option<NodeId> {
        self.arena.duplicate_node(node_id)
    }

    pub(crate) fn replace_node(&mut self, node_id: NodeId, data: NodeData) {
        self.arena.replace_node(node_id, data)
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node_id: NodeId, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);

        let node = match self.get_node_by_id(node_id) {
            Some(node) => node,
            None => return writeln!(f, "{}<missing {}>", indent, node_id),
        };

        match &node.data {
            NodeData::IntLiteral { token } => {
                writeln!(f, "{}int {}", indent, token.text.as_deref().unwrap_or("?"))
            }
            NodeData::Identifier { token } => {
                writeln!(f, "{}ident '{}'", indent, token.text.as_deref().unwrap_or("?"))
            }
            NodeData::Paren { expr } => {
                writeln!(f, "{}paren", indent)?;
                self.fmt_node(f, *expr, depth + 1)
            }
            NodeData::BinaryExpr { op, lhs, rhs } => {
                writeln!(f, "{}binary '{}'", indent, op)?;
                self.fmt_node(f, *lhs, depth + 1)?;
                self.fmt_node(f, *rhs, depth + 1)
            }
            NodeData::Declaration { name, init } => {
                writeln!(
                    f,
                    "{}declaration '{}'",
                    indent,
                    name.text.as_deref().unwrap_or("?")
                )?;
                match init {
                    Some(init) => self.fmt_node(f, *init, depth + 1),
                    None => Ok(()),
                }
            }
            NodeData::Assignment { name, value } => {
                writeln!(
                    f,
                    "{}assignment '{}'",
                    indent,
                    name.text.as_deref().unwrap_or("?")
                )?;
                self.fmt_node(f, *value, depth + 1)
            }
            NodeData::Block { stmts } => {
                writeln!(f, "{}block", indent)?;
                for stmt in stmts {
                    self.fmt_node(f, *stmt, depth + 1)?;
                }
                Ok(())
            }
            NodeData::Conditional { cond, body, pred } => {
                writeln!(f, "{}if", indent)?;
                self.fmt_node(f, *cond, depth + 1)?;
                self.fmt_node(f, *body, depth + 1)?;
                match pred {
                    Some(pred) => self.fmt_node(f, *pred, depth),
                    None => Ok(()),
                }
            }
            NodeData::ElifBranch { cond, body, pred } => {
                writeln!(f, "{}elif", indent)?;
                self.fmt_node(f, *cond, depth + 1)?;
                self.fmt_node(f, *body, depth + 1)?;
                match pred {
                    Some(pred) => self.fmt_node(f, *pred, depth),
                    None => Ok(()),
                }
            }
            NodeData::ElseBranch { body } => {
                writeln!(f, "{}else", indent)?;
                self.fmt_node(f, *body, depth + 1)
            }
            NodeData::Return { value } => {
                writeln!(f, "{}return", indent)?;
                self.fmt_node(f, *value, depth + 1)
            }
        }
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "program")?;
        for stmt in &self.statements {
            self.fmt_node(f, *stmt, 1)?;
        }
        Ok(())
    }
}
