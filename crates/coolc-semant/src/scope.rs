//! Nested scopes with shadowing.
//!
//! One `ScopeTable` maps class names to hierarchy nodes, another maps variable
//! names to their static types while a class body is checked. Scopes form a
//! stack: `enter` and `exit` must pair up, and lookups search from the
//! innermost scope outwards.

use coolc_common::Atom;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug)]
pub struct ScopeTable<V> {
    scopes: Vec<FxHashMap<Atom, V>>,
}

impl<V: Copy> Default for ScopeTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy> ScopeTable<V> {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Push a new, empty innermost scope.
    pub fn enter(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    /// Pop the innermost scope.
    ///
    /// # Panics
    /// If no scope is open.
    pub fn exit(&mut self) {
        assert!(
            self.scopes.pop().is_some(),
            "ScopeTable::exit called without a matching enter"
        );
    }

    /// Bind `name` in the innermost scope, shadowing any outer binding.
    ///
    /// # Panics
    /// If no scope is open.
    pub fn add(&mut self, name: Atom, value: V) {
        let Some(scope) = self.scopes.last_mut() else {
            panic!("ScopeTable::add called with no open scope");
        };
        scope.insert(name, value);
    }

    /// Search every scope, innermost first.
    pub fn lookup(&self, name: Atom) -> Option<V> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(&name).copied())
    }

    /// Search only the innermost scope.
    pub fn probe(&self, name: Atom) -> Option<V> {
        self.scopes.last()?.get(&name).copied()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
