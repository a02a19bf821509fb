//! Semantic analysis for the coolc compiler.
//!
//! Analysis runs in three steps:
//! 1. `ClassTree::build` validates the inheritance hierarchy. Structural
//!    errors stop analysis here.
//! 2. `ClassTree::install_methods` fills every class's method table.
//! 3. `CheckerState` type-checks every feature, top-down through the tree,
//!    recording a type for each expression in a `TypeCache`.
//!
//! `analyze` runs all three; `check_program` additionally turns a nonzero
//! error count into `CompilationHalted`.

mod builtins;
pub mod checker;
pub mod context;
pub mod error_reporter;
pub mod hierarchy;
pub mod lattice;
pub mod methods;
pub mod options;
pub mod scope;
pub mod type_cache;
pub mod types;

use coolc_ast::{ExprId, Program};
use coolc_common::Diagnostic;
use serde::Serialize;
use thiserror::Error;

pub use checker::CheckerState;
pub use context::ClassContext;
pub use error_reporter::ErrorReporter;
pub use hierarchy::{ClassNode, ClassOrigin, ClassTree, HierarchyError};
pub use methods::MethodTable;
pub use options::CheckerOptions;
pub use scope::ScopeTable;
pub use type_cache::TypeCache;
pub use types::{ClassId, MethodSignature};

/// The products of one analysis run.
#[derive(Debug)]
pub struct SemanticAnalysis {
    /// `None` when the class hierarchy was rejected.
    pub tree: Option<ClassTree>,
    pub types: TypeCache,
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: u32,
}

/// The resolved type of one expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TypeAnnotation {
    pub expr: ExprId,
    pub line: u32,
    pub kind: &'static str,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl SemanticAnalysis {
    pub fn is_well_typed(&self) -> bool {
        self.error_count == 0 && self.tree.is_some()
    }

    pub fn type_of(&self, expr: ExprId) -> Option<ClassId> {
        self.types.get(expr)
    }

    /// Name of the type resolved for `expr`, if it was checked.
    pub fn type_name_of<'p>(&self, program: &'p Program, expr: ExprId) -> Option<&'p str> {
        let tree = self.tree.as_ref()?;
        let ty = self.types.get(expr)?;
        Some(program.name(tree.name(ty)))
    }

    /// Every checked expression with its type, in arena order.
    pub fn annotations(&self, program: &Program) -> Vec<TypeAnnotation> {
        program
            .arena
            .iter()
            .filter_map(|(expr, node)| {
                let type_name = self.type_name_of(program, expr)?;
                Some(TypeAnnotation {
                    expr,
                    line: node.line,
                    kind: node.kind.name(),
                    type_name: type_name.to_string(),
                })
            })
            .collect()
    }
}

/// Returned by `check_program` when any error was found.
#[derive(Debug, Error)]
#[error("Compilation halted due to static semantic errors.")]
pub struct CompilationHalted {
    pub analysis: Box<SemanticAnalysis>,
}

/// Run the full analysis. Errors are collected in the result, never raised.
pub fn analyze(program: &Program, options: &CheckerOptions) -> SemanticAnalysis {
    let _span = tracing::info_span!("analyze", classes = program.classes.len()).entered();
    let mut reporter = ErrorReporter::new();

    let mut tree = match ClassTree::build(program, &mut reporter) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::debug!(%err, "analysis stopped");
            return SemanticAnalysis {
                tree: None,
                types: TypeCache::new(),
                error_count: reporter.error_count(),
                diagnostics: reporter.into_diagnostics(),
            };
        }
    };
    tree.install_methods(program, &mut reporter);

    let mut checker = CheckerState::new(program, &tree, *options, reporter);
    let well_typed = checker.check_classes();
    let (types, reporter) = checker.into_parts();
    tracing::debug!(
        well_typed,
        errors = reporter.error_count(),
        expressions = types.len(),
        "analysis finished"
    );

    SemanticAnalysis {
        tree: Some(tree),
        types,
        error_count: reporter.error_count(),
        diagnostics: reporter.into_diagnostics(),
    }
}

/// Run the full analysis and fail when any error was found.
pub fn check_program(
    program: &Program,
    options: &CheckerOptions,
) -> Result<SemanticAnalysis, CompilationHalted> {
    let analysis = analyze(program, options);
    if analysis.error_count > 0 {
        return Err(CompilationHalted {
            analysis: Box::new(analysis),
        });
    }
    Ok(analysis)
}

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/scope_tests.rs"]
mod scope_tests;

#[cfg(test)]
#[path = "../tests/hierarchy_tests.rs"]
mod hierarchy_tests;

#[cfg(test)]
#[path = "../tests/lattice_tests.rs"]
mod lattice_tests;

#[cfg(test)]
#[path = "../tests/methods_tests.rs"]
mod methods_tests;

#[cfg(test)]
#[path = "../tests/expr_tests.rs"]
mod expr_tests;

#[cfg(test)]
#[path = "../tests/dispatch_tests.rs"]
mod dispatch_tests;

#[cfg(test)]
#[path = "../tests/features_tests.rs"]
mod features_tests;

#[cfg(test)]
#[path = "../tests/checker_state_tests.rs"]
mod checker_state_tests;
