use crate::interner::{Atom, Interner, names};

#[test]
fn test_well_known_names_have_fixed_atoms() {
    let interner = Interner::new();
    assert_eq!(interner.resolve(names::OBJECT), "Object");
    assert_eq!(interner.resolve(names::IO), "IO");
    assert_eq!(interner.resolve(names::INT), "Int");
    assert_eq!(interner.resolve(names::BOOL), "Bool");
    assert_eq!(interner.resolve(names::STRING), "String");
    assert_eq!(interner.resolve(names::SELF_TYPE), "SELF_TYPE");
    assert_eq!(interner.resolve(names::NO_TYPE), "_no_type");
    assert_eq!(interner.resolve(names::SELF), "self");
    assert_eq!(interner.resolve(names::COPY), "copy");
    assert_eq!(interner.resolve(names::ABORT), "abort");
    assert_eq!(interner.resolve(names::SUBSTR), "substr");
}

#[test]
fn test_intern_deduplicates() {
    let mut interner = Interner::new();
    let a = interner.intern("Animal");
    let b = interner.intern("Animal");
    assert_eq!(a, b);
    assert_eq!(interner.resolve(a), "Animal");
    assert_eq!(interner.intern("self"), names::SELF);
    assert!(!interner.is_empty());
}

#[test]
fn test_fresh_interner_is_empty() {
    let interner = Interner::new();
    assert!(interner.is_empty());
    assert_eq!(interner.len(), names::SUBSTR.0 as usize + 1);
}

#[test]
fn test_resolve_out_of_bounds_is_empty() {
    let interner = Interner::new();
    assert_eq!(interner.resolve(Atom(9999)), "");
    assert_eq!(interner.resolve(Atom::NONE), "");
    assert!(Atom::NONE.is_none());
}
