//! Tests for AstBuilder and the node helpers.

use crate::{AstBuilder, ExprKind, Feature};
use coolc_common::names;

#[test]
fn test_builder_records_current_line_on_nodes() {
    let mut b = AstBuilder::new("a.cl");
    let one = b.at_line(3).int(1);
    let two = b.at_line(7).int(2);
    let sum = b.plus(one, two);
    let program = b.finish();

    assert_eq!(program.expr(one).map(|n| n.line), Some(3));
    assert_eq!(program.expr(two).map(|n| n.line), Some(7));
    assert_eq!(
        program.expr(sum).map(|n| n.line),
        Some(7),
        "line should stick until moved"
    );
}

#[test]
fn test_self_dispatch_uses_self_receiver() {
    let mut b = AstBuilder::new("a.cl");
    let call = b.self_dispatch("foo", Vec::new());
    let program = b.finish();

    let Some(node) = program.expr(call) else {
        panic!("dispatch node missing");
    };
    let ExprKind::Dispatch { receiver, .. } = &node.kind else {
        panic!("expected dispatch, got {:?}", node.kind);
    };
    assert_eq!(
        program.expr(*receiver).map(|n| &n.kind),
        Some(&ExprKind::Object(names::SELF))
    );
}

#[test]
fn test_class_uses_current_file() {
    let mut b = AstBuilder::new("first.cl");
    b.class("A", "Object", Vec::new());
    b.set_file("second.cl");
    b.class("B", "A", Vec::new());
    let program = b.finish();

    let files: Vec<&str> = program
        .classes
        .iter()
        .map(|class| program.name(class.file))
        .collect();
    assert_eq!(files, vec!["first.cl", "second.cl"]);
}

#[test]
fn test_builtin_names_intern_to_well_known_atoms() {
    let mut b = AstBuilder::new("a.cl");
    let class = b.class("Main", "IO", Vec::new());
    let program = b.finish();

    assert_eq!(program.name(class), "Main");
    assert_eq!(program.classes[0].parent, names::IO);
    assert!(class.0 > names::SUBSTR.0, "user class names follow the well-known atoms");
}

#[test]
fn test_method_and_attribute_features() {
    let mut b = AstBuilder::new("a.cl");
    let x = b.object("x");
    let method = b.at_line(4).method("id", &[("x", "Int")], "Int", x);
    let attr = b.at_line(2).attribute("count", "Int", None);
    b.class("A", "Object", vec![attr, method]);
    let program = b.finish();

    let class = &program.classes[0];
    assert_eq!(class.attributes().count(), 1);
    assert_eq!(class.methods().count(), 1);
    let Some(Feature::Method(m)) = class.features.get(1) else {
        panic!("expected method feature");
    };
    assert_eq!(program.name(m.name), "id");
    assert_eq!(m.formals.len(), 1);
    assert_eq!(program.name(m.formals[0].type_decl), "Int");
    assert_eq!(m.line, 4);
}

#[test]
fn test_children_in_evaluation_order() {
    let mut b = AstBuilder::new("a.cl");
    let recv = b.object("a");
    let arg1 = b.int(1);
    let arg2 = b.int(2);
    let call = b.dispatch(recv, "f", vec![arg1, arg2]);
    let init = b.int(0);
    let body = b.object("y");
    let let_ = b.let_("y", "Int", Some(init), body);
    let program = b.finish();

    let children = |id| program.expr(id).map(|n| n.kind.children()).unwrap_or_default();
    assert_eq!(children(call), vec![recv, arg1, arg2]);
    assert_eq!(children(let_), vec![init, body]);
}

#[test]
fn test_case_branches_take_builder_line() {
    let mut b = AstBuilder::new("a.cl");
    let scrutinee = b.object("x");
    let body_a = b.int(1);
    let body_b = b.int(2);
    let case = b
        .at_line(9)
        .case(scrutinee, &[("a", "Int", body_a), ("b", "String", body_b)]);
    let program = b.finish();

    let Some(ExprKind::Case { branches, .. }) = program.expr(case).map(|n| &n.kind) else {
        panic!("expected case");
    };
    assert_eq!(branches.len(), 2);
    assert!(branches.iter().all(|br| br.line == 9));
    assert_eq!(branches[1].type_decl, names::STRING);
}
