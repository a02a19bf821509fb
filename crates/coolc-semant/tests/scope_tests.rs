use crate::scope::ScopeTable;
use coolc_common::Atom;

const X: Atom = Atom(100);
const Y: Atom = Atom(101);

#[test]
fn test_lookup_searches_outer_scopes() {
    let mut table = ScopeTable::new();
    table.enter();
    table.add(X, 1u32);
    table.enter();
    table.add(Y, 2u32);

    assert_eq!(table.lookup(X), Some(1));
    assert_eq!(table.lookup(Y), Some(2));
    assert_eq!(table.probe(X), None, "probe only sees the innermost scope");
    assert_eq!(table.probe(Y), Some(2));
}

#[test]
fn test_inner_binding_shadows_and_exit_restores() {
    let mut table = ScopeTable::new();
    table.enter();
    table.add(X, 1u32);
    table.enter();
    table.add(X, 2u32);
    assert_eq!(table.lookup(X), Some(2));

    table.exit();
    assert_eq!(table.lookup(X), Some(1));
    table.exit();
    assert_eq!(table.lookup(X), None);
    assert_eq!(table.depth(), 0);
}

#[test]
fn test_probe_without_scope_is_none() {
    let table: ScopeTable<u32> = ScopeTable::new();
    assert_eq!(table.probe(X), None);
    assert_eq!(table.lookup(X), None);
}

#[test]
#[should_panic(expected = "without a matching enter")]
fn test_exit_on_empty_stack_panics() {
    let mut table: ScopeTable<u32> = ScopeTable::new();
    table.exit();
}

#[test]
#[should_panic(expected = "no open scope")]
fn test_add_without_scope_panics() {
    let mut table = ScopeTable::new();
    table.add(X, 1u32);
}
