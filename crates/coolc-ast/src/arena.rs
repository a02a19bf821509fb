use crate::node::{ExprId, ExprNode};

/// Owns every expression node of a program.
/// Nodes are inserted once and addressed by `ExprId` afterwards.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<ExprNode>,
}

impl NodeArena {
    /// Creates a new, empty arena.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Inserts a node into the arena, returning its assigned ID.
    pub fn alloc(&mut self, node: ExprNode) -> ExprId {
        let id = ExprId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Returns None if the ID is invalid.
    pub fn get(&self, id: ExprId) -> Option<&ExprNode> {
        self.nodes.get(id.index())
    }

    /// Returns the number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, &ExprNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (ExprId(index as u32), node))
    }
}
