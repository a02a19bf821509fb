//! Class hierarchy construction.
//!
//! The builder installs the basic classes, registers every declared class
//! name, links each class to its parent and rejects duplicates, illegal or
//! undefined parents and inheritance cycles. Any structural error aborts
//! construction: no tree is returned and no feature is checked.
//!
//! A valid tree is then walked once in pre-order from `Object` to assign
//! depths, and the subtree sizes are accumulated from the same order.

use coolc_ast::{ClassDecl, Program};
use coolc_common::Atom;
use coolc_common::diagnostics::diagnostic_codes;
use coolc_common::limits::CLASS_TABLE_CAPACITY;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::builtins::{BUILTIN_CLASSES, builtin_methods};
use crate::error_reporter::ErrorReporter;
use crate::methods::MethodTable;
use crate::scope::ScopeTable;
use crate::types::ClassId;

/// What a hierarchy node was created from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassOrigin {
    Builtin,
    /// Index into `Program::classes`.
    Declared(usize),
}

#[derive(Clone, Debug)]
pub struct ClassNode {
    pub name: Atom,
    /// `None` only for the `_no_type` sentinel.
    pub origin: Option<ClassOrigin>,
    pub parent: Option<ClassId>,
    /// In declaration order.
    pub children: Vec<ClassId>,
    /// Distance from `Object`.
    pub depth: u32,
    /// Number of classes in the subtree rooted here, this one included.
    pub size: u32,
    /// Methods declared by this class itself.
    pub methods: MethodTable,
}

impl ClassNode {
    fn new(name: Atom, origin: Option<ClassOrigin>, parent: Option<ClassId>) -> Self {
        Self {
            name,
            origin,
            parent,
            children: Vec::new(),
            depth: 0,
            size: 0,
            methods: MethodTable::new(),
        }
    }

    #[inline]
    pub fn is_defined(&self) -> bool {
        self.origin.is_some()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("class hierarchy rejected with {errors} structural error(s)")]
    Invalid { errors: u32 },
    #[error("class hierarchy corrupted: {reachable} of {total} classes reachable from Object")]
    Corrupted { reachable: u32, total: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress,
    Done,
}

/// The validated inheritance tree, rooted at `Object`.
#[derive(Clone, Debug)]
pub struct ClassTree {
    nodes: Vec<ClassNode>,
    classes: ScopeTable<ClassId>,
}

impl ClassTree {
    /// Build and validate the hierarchy of `program`. Structural errors are
    /// reported to `reporter`.
    pub fn build(program: &Program, reporter: &mut ErrorReporter) -> Result<Self, HierarchyError> {
        let _span =
            tracing::debug_span!("build_class_tree", classes = program.classes.len()).entered();
        let errors_before = reporter.error_count();

        let mut tree = Self::with_builtins(program.classes.len());
        let declared = tree.register_classes(program, reporter);
        let edges = tree.resolve_parents(program, &declared, reporter);
        for &(child, parent) in &edges {
            tree.nodes[child.index()].parent = Some(parent);
            tree.nodes[parent.index()].children.push(child);
        }
        tree.check_cycles(program, &declared, reporter);

        let errors = reporter.error_count() - errors_before;
        if errors > 0 {
            tracing::debug!(errors, "class hierarchy has structural errors");
            return Err(HierarchyError::Invalid { errors });
        }

        tree.assign_depths(reporter)?;
        tracing::debug!(classes = tree.nodes.len(), "class hierarchy built");
        Ok(tree)
    }

    fn with_builtins(declared: usize) -> Self {
        let mut nodes = Vec::with_capacity(BUILTIN_CLASSES.len() + declared.max(CLASS_TABLE_CAPACITY));
        let mut classes = ScopeTable::new();
        classes.enter();
        for (id, name, parent) in BUILTIN_CLASSES {
            let origin = (id != ClassId::NO_TYPE).then_some(ClassOrigin::Builtin);
            let mut node = ClassNode::new(name, origin, parent);
            node.methods = builtin_methods(id).into_iter().collect();
            nodes.push(node);
            classes.add(name, id);
        }
        for (id, _, parent) in BUILTIN_CLASSES {
            if let Some(parent) = parent {
                nodes[parent.index()].children.push(id);
            }
        }
        Self { nodes, classes }
    }

    /// Register every declared class name. Returns the ids of the classes
    /// that were registered, in declaration order.
    fn register_classes(&mut self, program: &Program, reporter: &mut ErrorReporter) -> Vec<ClassId> {
        let mut declared = Vec::with_capacity(program.classes.len());
        for (index, decl) in program.classes.iter().enumerate() {
            if let Some(existing) = self.classes.probe(decl.name) {
                let code = if existing.is_builtin() {
                    diagnostic_codes::REDEFINITION_OF_BASIC_CLASS
                } else {
                    diagnostic_codes::CLASS_PREVIOUSLY_DEFINED
                };
                reporter.error(
                    program.name(decl.file),
                    decl.line,
                    code,
                    &[program.name(decl.name)],
                );
                continue;
            }
            let id = ClassId(self.nodes.len() as u32);
            self.nodes.push(ClassNode::new(
                decl.name,
                Some(ClassOrigin::Declared(index)),
                None,
            ));
            self.classes.add(decl.name, id);
            declared.push(id);
        }
        declared
    }

    /// Resolve each declared class's parent name. Returns the valid
    /// `(child, parent)` edges.
    fn resolve_parents(
        &self,
        program: &Program,
        declared: &[ClassId],
        reporter: &mut ErrorReporter,
    ) -> Vec<(ClassId, ClassId)> {
        let mut edges = Vec::with_capacity(declared.len());
        for &id in declared {
            let Some(decl) = self.declaration(id, program) else {
                continue;
            };
            let file = program.name(decl.file);
            let class_name = program.name(decl.name);
            let parent_name = program.name(decl.parent);
            match self.classes.lookup(decl.parent) {
                Some(parent) if parent.is_basic() || parent == ClassId::SELF_TYPE => {
                    reporter.error(
                        file,
                        decl.line,
                        diagnostic_codes::CANNOT_INHERIT_CLASS,
                        &[class_name, parent_name],
                    );
                }
                Some(parent) if parent != ClassId::NO_TYPE => edges.push((id, parent)),
                _ => {
                    reporter.error(
                        file,
                        decl.line,
                        diagnostic_codes::INHERITS_FROM_UNDEFINED_CLASS,
                        &[class_name, parent_name],
                    );
                }
            }
        }
        edges
    }

    /// Tri-state walk over parent links. Every class that lies on a cycle is
    /// reported, in declaration order.
    fn check_cycles(&self, program: &Program, declared: &[ClassId], reporter: &mut ErrorReporter) {
        let mut state = vec![VisitState::Unvisited; self.nodes.len()];
        let mut on_cycle = FxHashSet::default();

        for &start in declared {
            let mut path = Vec::new();
            let mut current = Some(start);
            while let Some(id) = current {
                match state[id.index()] {
                    VisitState::Done => break,
                    VisitState::InProgress => {
                        // Only the current path is in progress.
                        if let Some(pos) = path.iter().position(|&p| p == id) {
                            on_cycle.extend(path[pos..].iter().copied());
                        }
                        break;
                    }
                    VisitState::Unvisited => {
                        state[id.index()] = VisitState::InProgress;
                        path.push(id);
                        current = self.nodes[id.index()].parent;
                    }
                }
            }
            for id in path {
                state[id.index()] = VisitState::Done;
            }
        }

        for &id in declared {
            if !on_cycle.contains(&id) {
                continue;
            }
            let Some(decl) = self.declaration(id, program) else {
                continue;
            };
            let name = program.name(decl.name);
            tracing::debug!(class = name, "inheritance cycle");
            reporter.error(
                program.name(decl.file),
                decl.line,
                diagnostic_codes::INHERITANCE_CYCLE,
                &[name],
            );
        }
    }

    /// Assign depths in pre-order from `Object`, then accumulate subtree
    /// sizes over the reversed order.
    fn assign_depths(&mut self, reporter: &mut ErrorReporter) -> Result<(), HierarchyError> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![ClassId::OBJECT];
        self.nodes[ClassId::OBJECT.index()].depth = 0;
        while let Some(id) = stack.pop() {
            order.push(id);
            let depth = self.nodes[id.index()].depth + 1;
            for index in (0..self.nodes[id.index()].children.len()).rev() {
                let child = self.nodes[id.index()].children[index];
                self.nodes[child.index()].depth = depth;
                stack.push(child);
            }
        }

        for &id in order.iter().rev() {
            let node = &self.nodes[id.index()];
            let size = 1 + node
                .children
                .iter()
                .map(|child| self.nodes[child.index()].size)
                .sum::<u32>();
            self.nodes[id.index()].size = size;
        }

        // Everything except the `_no_type` sentinel hangs off `Object`.
        let total = (self.nodes.len() - 1) as u32;
        let reachable = self.nodes[ClassId::OBJECT.index()].size;
        if reachable != total {
            reporter.hierarchy_corrupted(reachable, total);
            return Err(HierarchyError::Corrupted { reachable, total });
        }
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Resolve a class name. Unknown names resolve to `NO_TYPE`; the table
    /// itself is never extended by a lookup.
    pub fn lookup(&self, name: Atom) -> ClassId {
        self.classes.lookup(name).unwrap_or(ClassId::NO_TYPE)
    }

    #[inline]
    pub fn get(&self, id: ClassId) -> Option<&ClassNode> {
        self.nodes.get(id.index())
    }

    /// # Panics
    /// If `id` did not come from this tree.
    #[inline]
    pub fn node(&self, id: ClassId) -> &ClassNode {
        &self.nodes[id.index()]
    }

    pub(crate) fn node_mut(&mut self, id: ClassId) -> &mut ClassNode {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn is_defined(&self, id: ClassId) -> bool {
        self.get(id).is_some_and(ClassNode::is_defined)
    }

    #[inline]
    pub fn parent(&self, id: ClassId) -> Option<ClassId> {
        self.get(id)?.parent
    }

    #[inline]
    pub fn depth(&self, id: ClassId) -> u32 {
        self.get(id).map_or(0, |node| node.depth)
    }

    pub fn children(&self, id: ClassId) -> &[ClassId] {
        self.get(id).map_or(&[], |node| node.children.as_slice())
    }

    pub fn name(&self, id: ClassId) -> Atom {
        self.get(id).map_or(Atom::NONE, |node| node.name)
    }

    /// The declaration a user class was built from.
    pub fn declaration<'p>(&self, id: ClassId, program: &'p Program) -> Option<&'p ClassDecl> {
        match self.get(id)?.origin? {
            ClassOrigin::Declared(index) => program.classes.get(index),
            ClassOrigin::Builtin => None,
        }
    }

    /// Number of nodes, sentinels included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.nodes.len() as u32).map(ClassId)
    }
}
