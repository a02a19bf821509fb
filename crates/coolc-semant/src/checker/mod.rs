//! Feature and expression type checking.
//!
//! `CheckerState` walks the class tree in pre-order. Each class gets a
//! variable scope binding `self` and its attributes; its subclasses are
//! checked inside that scope, so inherited attributes stay visible and a
//! redefinition can be detected by lookup.
//!
//! Rules live in submodules:
//! - `features` - attributes, methods and formals
//! - `expr` - every expression kind except dispatch
//! - `dispatch` - dynamic and static dispatch

mod dispatch;
mod expr;
mod features;

use coolc_ast::Program;
use coolc_common::{Atom, names};

use crate::context::ClassContext;
use crate::error_reporter::ErrorReporter;
use crate::hierarchy::ClassTree;
use crate::options::CheckerOptions;
use crate::scope::ScopeTable;
use crate::type_cache::TypeCache;
use crate::types::ClassId;

/// Step of the class walk. `Exit` closes the scope its class opened.
enum Visit {
    Enter(ClassId),
    Exit,
}

pub struct CheckerState<'a> {
    program: &'a Program,
    tree: &'a ClassTree,
    options: CheckerOptions,
    /// Variable name -> static type.
    vars: ScopeTable<ClassId>,
    reporter: ErrorReporter,
    types: TypeCache,
    /// Current expression nesting depth.
    expr_depth: u32,
    /// Set once the depth limit was reported for the current top-level
    /// expression.
    depth_limit_reported: bool,
}

impl<'a> CheckerState<'a> {
    /// `tree` must already have its method tables installed.
    pub fn new(
        program: &'a Program,
        tree: &'a ClassTree,
        options: CheckerOptions,
        reporter: ErrorReporter,
    ) -> Self {
        Self {
            program,
            tree,
            options,
            vars: ScopeTable::new(),
            reporter,
            types: TypeCache::new(),
            expr_depth: 0,
            depth_limit_reported: false,
        }
    }

    /// Check every class, parents before children. Returns whether every
    /// class checked was well-typed.
    ///
    /// The walk keeps its own stack, so chain length is bounded by memory
    /// rather than the thread stack.
    pub fn check_classes(&mut self) -> bool {
        let _span = tracing::info_span!("check_classes").entered();
        let tree = self.tree;
        let mut well_typed = true;
        let mut pending = vec![Visit::Enter(ClassId::OBJECT)];

        while let Some(visit) = pending.pop() {
            let class = match visit {
                Visit::Enter(class) => class,
                Visit::Exit => {
                    self.vars.exit();
                    continue;
                }
            };
            let decl = tree.declaration(class, self.program);
            let ctx = ClassContext::new(class, decl.map_or(Atom::NONE, |decl| decl.file));

            self.vars.enter();
            pending.push(Visit::Exit);
            self.vars.add(names::SELF, class);
            let class_ok = match decl {
                Some(decl) => self.check_class(&ctx, decl),
                None => true,
            };
            if !class_ok {
                well_typed = false;
                if self.options.fail_fast_classes {
                    let open = pending.iter().filter(|v| matches!(v, Visit::Exit)).count();
                    for _ in 0..open {
                        self.vars.exit();
                    }
                    break;
                }
            }
            pending.extend(tree.children(class).iter().rev().map(|&child| Visit::Enter(child)));
        }
        well_typed
    }

    /// Run `f` inside a fresh variable scope.
    pub(crate) fn with_scope<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.vars.enter();
        let result = f(self);
        self.vars.exit();
        result
    }

    // =========================================================================
    // Shared helpers
    // =========================================================================

    #[inline]
    fn name(&self, atom: Atom) -> &'a str {
        self.program.name(atom)
    }

    /// Display name of a static type.
    #[inline]
    fn type_name(&self, ty: ClassId) -> &'a str {
        self.program.name(self.tree.name(ty))
    }

    /// Resolve a declared type name, with `SELF_TYPE` meaning the current
    /// class. Unknown names give `NO_TYPE`.
    fn resolve_declared_type(&self, ctx: &ClassContext, type_decl: Atom) -> ClassId {
        if type_decl == names::SELF_TYPE {
            ctx.class
        } else {
            self.tree.lookup(type_decl)
        }
    }

    fn error_at(&mut self, ctx: &ClassContext, line: u32, code: u32, args: &[&str]) {
        let file = self.name(ctx.file);
        self.reporter.error(file, line, code, args);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn types(&self) -> &TypeCache {
        &self.types
    }

    pub fn reporter(&self) -> &ErrorReporter {
        &self.reporter
    }

    /// Number of open variable scopes; zero outside of checking.
    pub fn scope_depth(&self) -> usize {
        self.vars.depth()
    }

    pub fn into_parts(self) -> (TypeCache, ErrorReporter) {
        (self.types, self.reporter)
    }
}
