//! Shared helpers for the checker unit tests.

use coolc_ast::{AstBuilder, ExprId, Program};
use coolc_common::interner::Atom;

use crate::{CheckerOptions, SemanticAnalysis, analyze};

pub(crate) fn analyze_default(program: &Program) -> SemanticAnalysis {
    analyze(program, &CheckerOptions::default())
}

pub(crate) fn error_codes(analysis: &SemanticAnalysis) -> Vec<u32> {
    analysis.diagnostics.iter().map(|d| d.code).collect()
}

pub(crate) fn messages(analysis: &SemanticAnalysis) -> Vec<String> {
    analysis
        .diagnostics
        .iter()
        .map(|d| d.message_text.clone())
        .collect()
}

/// Atom of a name the program interned. Panics if it never was.
pub(crate) fn atom(program: &Program, name: &str) -> Atom {
    (0..program.interner.len() as u32)
        .map(Atom)
        .find(|&atom| program.name(atom) == name)
        .unwrap_or_else(|| panic!("{name} was never interned"))
}

/// Declare `Animal`, `Cat inherits Animal`, `Dog inherits Animal` and
/// `Kitten inherits Cat`, each with no features.
pub(crate) fn declare_animals(b: &mut AstBuilder) {
    b.class("Animal", "Object", Vec::new());
    b.class("Cat", "Animal", Vec::new());
    b.class("Dog", "Animal", Vec::new());
    b.class("Kitten", "Cat", Vec::new());
}

/// Build `class Main { main(): Object { <body> } }` after whatever classes
/// `setup` declares, and analyze it. Returns the body's id.
pub(crate) fn check_main_body(
    setup: impl FnOnce(&mut AstBuilder),
    body: impl FnOnce(&mut AstBuilder) -> ExprId,
) -> (Program, SemanticAnalysis, ExprId) {
    let mut b = AstBuilder::new("test.cl");
    setup(&mut b);
    let body = body(&mut b);
    let main = b.method("main", &[], "Object", body);
    b.class("Main", "IO", vec![main]);
    let program = b.finish();
    let analysis = analyze_default(&program);
    (program, analysis, body)
}

/// Type name resolved for the main body.
pub(crate) fn body_type(
    setup: impl FnOnce(&mut AstBuilder),
    body: impl FnOnce(&mut AstBuilder) -> ExprId,
) -> (String, SemanticAnalysis) {
    let (program, analysis, body) = check_main_body(setup, body);
    let name = analysis
        .type_name_of(&program, body)
        .unwrap_or("<unchecked>")
        .to_string();
    (name, analysis)
}
