use coolc_ast::AstBuilder;

use crate::error_reporter::ErrorReporter;
use crate::hierarchy::ClassTree;
use crate::test_support::{atom, declare_animals};
use crate::types::ClassId;

struct Animals {
    tree: ClassTree,
    animal: ClassId,
    cat: ClassId,
    dog: ClassId,
    kitten: ClassId,
}

fn animals() -> Animals {
    let mut b = AstBuilder::new("test.cl");
    declare_animals(&mut b);
    let program = b.finish();
    let mut reporter = ErrorReporter::new();
    let tree = match ClassTree::build(&program, &mut reporter) {
        Ok(tree) => tree,
        Err(err) => panic!("animal hierarchy rejected: {err}"),
    };
    let id = |name: &str| tree.lookup(atom(&program, name));
    let (animal, cat, dog, kitten) = (id("Animal"), id("Cat"), id("Dog"), id("Kitten"));
    Animals {
        tree,
        animal,
        cat,
        dog,
        kitten,
    }
}

fn defined(tree: &ClassTree) -> Vec<ClassId> {
    tree.ids().filter(|&id| tree.is_defined(id)).collect()
}

#[test]
fn test_subtype_follows_inheritance() {
    let a = animals();
    assert!(a.tree.is_subtype(a.kitten, a.cat));
    assert!(a.tree.is_subtype(a.kitten, a.animal));
    assert!(a.tree.is_subtype(a.kitten, ClassId::OBJECT));
    assert!(!a.tree.is_subtype(a.animal, a.cat));
    assert!(!a.tree.is_subtype(a.cat, a.dog));
    assert!(!a.tree.is_subtype(ClassId::INT, a.animal));
}

#[test]
fn test_subtype_is_reflexive_and_antisymmetric() {
    let a = animals();
    let ids = defined(&a.tree);
    for &x in &ids {
        assert!(a.tree.is_subtype(x, x), "{x:?} should be a subtype of itself");
        for &y in &ids {
            if x != y {
                assert!(
                    !(a.tree.is_subtype(x, y) && a.tree.is_subtype(y, x)),
                    "{x:?} and {y:?} are mutual subtypes"
                );
            }
        }
    }
}

#[test]
fn test_no_type_is_related_to_nothing() {
    let a = animals();
    assert!(!a.tree.is_subtype(ClassId::NO_TYPE, ClassId::NO_TYPE));
    assert!(!a.tree.is_subtype(ClassId::NO_TYPE, ClassId::OBJECT));
    assert!(!a.tree.is_subtype(a.cat, ClassId::NO_TYPE));
    assert_eq!(a.tree.join(ClassId::NO_TYPE, a.cat), ClassId::NO_TYPE);
    assert_eq!(a.tree.join(a.cat, ClassId::NO_TYPE), ClassId::NO_TYPE);
}

#[test]
fn test_join_of_siblings_and_cousins() {
    let a = animals();
    assert_eq!(a.tree.join(a.cat, a.dog), a.animal);
    assert_eq!(a.tree.join(a.kitten, a.dog), a.animal);
    assert_eq!(a.tree.join(a.kitten, a.cat), a.cat);
    assert_eq!(a.tree.join(ClassId::INT, ClassId::STRING), ClassId::OBJECT);
    assert_eq!(a.tree.join(a.cat, ClassId::IO), ClassId::OBJECT);
}

#[test]
fn test_join_is_least_common_ancestor() {
    let a = animals();
    let ids = defined(&a.tree);
    for &x in &ids {
        assert_eq!(a.tree.join(x, x), x);
        for &y in &ids {
            let j = a.tree.join(x, y);
            assert_eq!(j, a.tree.join(y, x), "join({x:?}, {y:?}) is not commutative");
            assert!(a.tree.is_subtype(x, j) && a.tree.is_subtype(y, j));
            // No proper descendant of `j` is above both.
            for &z in &ids {
                if z != j && a.tree.is_subtype(z, j) {
                    assert!(
                        !(a.tree.is_subtype(x, z) && a.tree.is_subtype(y, z)),
                        "{z:?} is a tighter bound than join({x:?}, {y:?}) = {j:?}"
                    );
                }
            }
        }
    }
}
