//! The basic classes every program starts with.

use coolc_common::{Atom, names};

use crate::types::{ClassId, MethodSignature};

/// Built-in classes and sentinels, in `ClassId` order, with their parents.
pub(crate) const BUILTIN_CLASSES: [(ClassId, Atom, Option<ClassId>); 7] = [
    (ClassId::OBJECT, names::OBJECT, None),
    (ClassId::IO, names::IO, Some(ClassId::OBJECT)),
    (ClassId::INT, names::INT, Some(ClassId::OBJECT)),
    (ClassId::BOOL, names::BOOL, Some(ClassId::OBJECT)),
    (ClassId::STRING, names::STRING, Some(ClassId::OBJECT)),
    (ClassId::SELF_TYPE, names::SELF_TYPE, Some(ClassId::OBJECT)),
    (ClassId::NO_TYPE, names::NO_TYPE, None),
];

/// Methods the runtime provides for a built-in class.
pub(crate) fn builtin_methods(class: ClassId) -> Vec<(Atom, MethodSignature)> {
    use ClassId as C;
    match class {
        C::OBJECT => vec![
            (names::ABORT, MethodSignature::new(&[], C::OBJECT)),
            (names::TYPE_NAME, MethodSignature::new(&[], C::STRING)),
            (names::COPY, MethodSignature::new(&[], C::SELF_TYPE)),
        ],
        C::IO => vec![
            (
                names::OUT_STRING,
                MethodSignature::new(&[C::STRING], C::SELF_TYPE),
            ),
            (names::OUT_INT, MethodSignature::new(&[C::INT], C::SELF_TYPE)),
            (names::IN_STRING, MethodSignature::new(&[], C::STRING)),
            (names::IN_INT, MethodSignature::new(&[], C::INT)),
        ],
        C::STRING => vec![
            (names::LENGTH, MethodSignature::new(&[], C::INT)),
            (names::CONCAT, MethodSignature::new(&[C::STRING], C::STRING)),
            (
                names::SUBSTR,
                MethodSignature::new(&[C::INT, C::INT], C::STRING),
            ),
        ],
        _ => Vec::new(),
    }
}
