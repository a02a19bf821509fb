use coolc_common::Atom;

use crate::types::ClassId;

/// The class whose features are being checked.
///
/// Passed to every checking call; `SELF_TYPE` resolves against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassContext {
    pub class: ClassId,
    /// Source file of the class, used to position diagnostics.
    pub file: Atom,
}

impl ClassContext {
    pub fn new(class: ClassId, file: Atom) -> Self {
        Self { class, file }
    }

    /// Replace `SELF_TYPE` by the current class.
    #[inline]
    pub fn resolve_self_type(&self, ty: ClassId) -> ClassId {
        if ty == ClassId::SELF_TYPE {
            self.class
        } else {
            ty
        }
    }
}
