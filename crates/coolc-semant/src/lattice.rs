//! Subtyping and least upper bounds over the class tree.
//!
//! Both walk ancestors after equalizing depths, so each query is
//! O(depth of the tree). Undefined types are related to nothing.

use crate::hierarchy::ClassTree;
use crate::types::ClassId;

impl ClassTree {
    /// `a <= b`: `b` is `a` or one of its ancestors.
    pub fn is_subtype(&self, a: ClassId, b: ClassId) -> bool {
        if !self.is_defined(a) || !self.is_defined(b) {
            return false;
        }
        let target = self.depth(b);
        let mut current = a;
        while self.depth(current) > target {
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        current == b
    }

    /// The least common ancestor of `a` and `b`, or `NO_TYPE` if either is
    /// undefined.
    pub fn join(&self, a: ClassId, b: ClassId) -> ClassId {
        if !self.is_defined(a) || !self.is_defined(b) {
            return ClassId::NO_TYPE;
        }
        let (mut a, mut b) = (a, b);
        while self.depth(a) > self.depth(b) {
            let Some(parent) = self.parent(a) else {
                return ClassId::NO_TYPE;
            };
            a = parent;
        }
        while self.depth(b) > self.depth(a) {
            let Some(parent) = self.parent(b) else {
                return ClassId::NO_TYPE;
            };
            b = parent;
        }
        while a != b {
            match (self.parent(a), self.parent(b)) {
                (Some(pa), Some(pb)) => {
                    a = pa;
                    b = pb;
                }
                _ => return ClassId::NO_TYPE,
            }
        }
        a
    }
}
