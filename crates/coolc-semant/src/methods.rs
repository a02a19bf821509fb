//! Method tables and method lookup.
//!
//! Every class owns a table of the methods it declares itself. Tables are
//! filled for all classes before any body is checked, so a body may call a
//! method declared by a class that is checked later. Lookup walks from a class
//! up through its ancestors and returns the first match.

use coolc_ast::Program;
use coolc_common::diagnostics::diagnostic_codes;
use coolc_common::{Atom, names};
use rustc_hash::FxHashMap;

use crate::error_reporter::ErrorReporter;
use crate::hierarchy::ClassTree;
use crate::types::{ClassId, MethodSignature};

#[derive(Clone, Debug, Default)]
pub struct MethodTable {
    methods: FxHashMap<Atom, MethodSignature>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a method. An existing entry is kept and `false` returned.
    pub fn insert(&mut self, name: Atom, signature: MethodSignature) -> bool {
        if self.methods.contains_key(&name) {
            return false;
        }
        self.methods.insert(name, signature);
        true
    }

    pub fn get(&self, name: Atom) -> Option<&MethodSignature> {
        self.methods.get(&name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Atom, &MethodSignature)> {
        self.methods.iter().map(|(&name, sig)| (name, sig))
    }
}

impl FromIterator<(Atom, MethodSignature)> for MethodTable {
    fn from_iter<I: IntoIterator<Item = (Atom, MethodSignature)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (name, signature) in iter {
            table.insert(name, signature);
        }
        table
    }
}

impl ClassTree {
    /// Fill the method table of every declared class.
    ///
    /// A second definition of a method in the same class is reported and
    /// ignored. Parameter types that do not resolve, and `SELF_TYPE`
    /// parameters, are stored as `NO_TYPE`; the feature check reports them.
    pub fn install_methods(&mut self, program: &Program, reporter: &mut ErrorReporter) {
        let _span = tracing::debug_span!("install_methods").entered();
        for id in self.ids().collect::<Vec<_>>() {
            let Some(decl) = self.declaration(id, program) else {
                continue;
            };
            let mut table = MethodTable::new();
            for method in decl.methods() {
                let params: Vec<ClassId> = method
                    .formals
                    .iter()
                    .map(|formal| match formal.type_decl {
                        names::SELF_TYPE => ClassId::NO_TYPE,
                        type_decl => self.lookup(type_decl),
                    })
                    .collect();
                let mut signature = MethodSignature::new(&params, self.lookup(method.return_type));
                signature.line = method.line;
                if !table.insert(method.name, signature) {
                    reporter.error(
                        program.name(decl.file),
                        method.line,
                        diagnostic_codes::METHOD_MULTIPLY_DEFINED,
                        &[program.name(method.name)],
                    );
                }
            }
            tracing::trace!(
                class = program.name(decl.name),
                methods = table.len(),
                "installed method table"
            );
            self.node_mut(id).methods = table;
        }
    }

    /// Find `name` in `class` or its nearest ancestor declaring it. Returns
    /// the declaring class with the signature.
    pub fn find_method(&self, class: ClassId, name: Atom) -> Option<(ClassId, &MethodSignature)> {
        let mut current = Some(class);
        while let Some(id) = current {
            let node = self.get(id)?;
            if let Some(signature) = node.methods.get(name) {
                return Some((id, signature));
            }
            current = node.parent;
        }
        None
    }
}
