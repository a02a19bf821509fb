//! Static types and method signatures.

use serde::Serialize;
use smallvec::SmallVec;

/// A static type: the index of a class in the `ClassTree`.
///
/// The built-in classes and the two sentinels always occupy the first slots,
/// in the order of the constants below.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ClassId(pub u32);

impl ClassId {
    pub const OBJECT: ClassId = ClassId(0);
    pub const IO: ClassId = ClassId(1);
    pub const INT: ClassId = ClassId(2);
    pub const BOOL: ClassId = ClassId(3);
    pub const STRING: ClassId = ClassId(4);
    /// The runtime type of the receiver.
    pub const SELF_TYPE: ClassId = ClassId(5);
    /// The error type. Never defined, absorbed by every rule.
    pub const NO_TYPE: ClassId = ClassId(6);

    /// Number of slots taken by built-ins and sentinels.
    pub const BUILTIN_COUNT: u32 = 7;

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_no_type(self) -> bool {
        self == ClassId::NO_TYPE
    }

    /// `Int`, `Bool` and `String`: compared by value, cannot be inherited.
    #[inline]
    pub fn is_basic(self) -> bool {
        matches!(self, ClassId::INT | ClassId::BOOL | ClassId::STRING)
    }

    #[inline]
    pub fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

/// Parameter types followed by the return type.
///
/// Parameter types that failed to resolve are `NO_TYPE`; the return type may
/// be `SELF_TYPE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
    pub params: SmallVec<[ClassId; 4]>,
    pub ret: ClassId,
    /// Declaration line, 0 for built-ins.
    pub line: u32,
}

impl MethodSignature {
    pub fn new(params: &[ClassId], ret: ClassId) -> Self {
        Self {
            params: SmallVec::from_slice(params),
            ret,
            line: 0,
        }
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
