//! Resolved expression types, kept beside the AST.

use coolc_ast::ExprId;
use rustc_hash::FxHashMap;

use crate::types::ClassId;

#[derive(Clone, Debug, Default)]
pub struct TypeCache {
    /// Resolved type of every checked expression.
    node_types: FxHashMap<ExprId, ClassId>,
    /// Number of rule evaluations that produced an entry.
    evaluations: u64,
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, expr: ExprId) -> Option<ClassId> {
        self.node_types.get(&expr).copied()
    }

    /// Record the result of evaluating the rule for `expr`.
    pub fn insert(&mut self, expr: ExprId, ty: ClassId) {
        self.evaluations += 1;
        self.node_types.insert(expr, ty);
    }

    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    pub fn len(&self) -> usize {
        self.node_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExprId, ClassId)> + '_ {
        self.node_types.iter().map(|(&expr, &ty)| (expr, ty))
    }
}
