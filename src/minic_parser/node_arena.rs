use crate::minic_parser::node::{Node, NodeData, NodeId};

// Node count matching the 4 MiB region the fixed-size predecessor reserved
const DEFAULT_CAPACITY: usize = (4 * 1024 * 1024) / std::mem::size_of::<Node>();

// Bulk store for AST nodes. Allocation is an O(1) push, there is no
// per-node release, and every node dies together when the arena drops.
#[derive(Debug)]
pub struct NodeArena {
    nodes: Vec<Node>, // Current nodes, indexed by id
}

impl NodeArena {
    pub fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    pub fn get_node(&self, node_id: NodeId) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn get_mut_node(&mut self, node_id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(node_id)
    }

    // Places the given data in the arena and returns the handle to it
    pub fn add_node(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { id, data });
        id
    }

    // Shallow-copies a node into a fresh one: child handles are shared,
    // not followed. Returns the new node's handle, or None when the
    // source handle is invalid.
    pub fn duplicate_node(&mut self, node_id: NodeId) -> Option<NodeId> {
        let data = self.nodes.get(node_id)?.data.clone();
        Some(self.add_node(data))
    }

    // Replaces the data of an existing node, keeping its handle
    pub fn replace_node(&mut self, node_id: NodeId, data: NodeData) {
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.data = data;
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for NodeArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minic_parser::node::BinaryOp;
    use crate::minic_parser::token::{Token, TokenKind};

    fn int_token(text: &str) -> Token {
        Token {
            kind: TokenKind::IntLiteral,
            line: 1,
            col: 1,
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn test_add_and_get() {
        let mut arena = NodeArena::new();
        assert!(arena.is_empty());

        let a = arena.add_node(NodeData::IntLiteral {
            token: int_token("1"),
        });
        let b = arena.add_node(NodeData::IntLiteral {
            token: int_token("2"),
        });

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get_node(a).map(|n| n.id), Some(a));
        assert_eq!(arena.get_node(99).map(|n| n.id), None);
    }

    #[test]
    fn test_duplicate_is_shallow() {
        let mut arena = NodeArena::new();
        let lhs = arena.add_node(NodeData::IntLiteral {
            token: int_token("1"),
        });
        let rhs = arena.add_node(NodeData::IntLiteral {
            token: int_token("2"),
        });
        let bin = arena.add_node(NodeData::BinaryExpr {
            op: BinaryOp::Add,
            lhs,
            rhs,
        });

        let copy = arena.duplicate_node(bin).unwrap();
        assert_ne!(copy, bin);

        // The copy shares the original's children by handle
        match arena.get_node(copy).map(|n| &n.data) {
            Some(NodeData::BinaryExpr {
                op,
                lhs: l,
                rhs: r,
            }) => {
                assert_eq!(*op, BinaryOp::Add);
                assert_eq!(*l, lhs);
                assert_eq!(*r, rhs);
            }
            other => panic!("unexpected node data: {:?}", other),
        }

        assert_eq!(arena.duplicate_node(99), None);
    }

    #[test]
    fn test_replace_keeps_handle() {
        let mut arena = NodeArena::new();
        let id = arena.add_node(NodeData::IntLiteral {
            token: int_token("1"),
        });
        arena.replace_node(
            id,
            NodeData::BinaryExpr {
                op: BinaryOp::Sub,
                lhs: 0,
                rhs: 0,
            },
        );

        assert_eq!(arena.len(), 1);
        assert!(matches!(
            arena.get_node(id).map(|n| &n.data),
            Some(NodeData::BinaryExpr { op: BinaryOp::Sub, .. })
        ));
    }
}
