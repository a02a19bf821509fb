//! String interner for class, method and variable names.
//!
//! Every name in a program is interned once and passed around as an `Atom`
//! (a `u32` index). Name equality is atom equality, so the semantic checker
//! never compares strings.
//!
//! The names the checker itself needs to recognize (built-in classes, their
//! methods, `self`, `SELF_TYPE`) are interned first, in a fixed order, by every
//! `Interner`. Their atoms are therefore known at compile time and exported
//! from the [`names`] module.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// An interned string identifier.
///
/// Atoms are cheap to copy (just a u32) and can be compared with == in O(1).
/// To get the actual string, use `Interner::resolve(atom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    /// A sentinel value representing no atom / empty string.
    pub const NONE: Atom = Atom(0);

    /// Check if this is the empty/none atom.
    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Get the raw index value.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names interned by every `Interner`, in atom order starting at 1.
///
/// The order must match the constants in [`names`].
const WELL_KNOWN: &[&str] = &[
    // Built-in classes and sentinels
    "Object",
    "IO",
    "Int",
    "Bool",
    "String",
    "SELF_TYPE",
    "_no_type",
    // Identifiers with fixed meaning
    "self",
    // Object methods
    "abort",
    "type_name",
    "copy",
    // IO methods
    "out_string",
    "out_int",
    "in_string",
    "in_int",
    // String methods
    "length",
    "concat",
    "substr",
];

/// Atoms of the well-known names.
pub mod names {
    use super::Atom;

    pub const OBJECT: Atom = Atom(1);
    pub const IO: Atom = Atom(2);
    pub const INT: Atom = Atom(3);
    pub const BOOL: Atom = Atom(4);
    pub const STRING: Atom = Atom(5);
    pub const SELF_TYPE: Atom = Atom(6);
    pub const NO_TYPE: Atom = Atom(7);
    pub const SELF: Atom = Atom(8);
    pub const ABORT: Atom = Atom(9);
    pub const TYPE_NAME: Atom = Atom(10);
    pub const COPY: Atom = Atom(11);
    pub const OUT_STRING: Atom = Atom(12);
    pub const OUT_INT: Atom = Atom(13);
    pub const IN_STRING: Atom = Atom(14);
    pub const IN_INT: Atom = Atom(15);
    pub const LENGTH: Atom = Atom(16);
    pub const CONCAT: Atom = Atom(17);
    pub const SUBSTR: Atom = Atom(18);
}

/// String interner that deduplicates strings and returns Atom handles.
///
/// # Example
/// ```
/// use coolc_common::interner::{Interner, names};
/// let mut interner = Interner::new();
/// let a1 = interner.intern("Animal");
/// let a2 = interner.intern("Animal");
/// assert_eq!(a1, a2);
/// assert_eq!(interner.resolve(a1), "Animal");
/// assert_eq!(interner.intern("Object"), names::OBJECT);
/// ```
#[derive(Clone, Debug)]
pub struct Interner {
    /// Map from string to atom index
    map: FxHashMap<Arc<str>, Atom>,
    /// Vector of all interned strings (index 0 is empty string)
    strings: Vec<Arc<str>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    /// Create a new interner with the empty string at index 0 followed by the
    /// well-known names.
    pub fn new() -> Self {
        let mut interner = Interner {
            map: FxHashMap::default(),
            strings: Vec::with_capacity(256),
        };
        // Index 0 is reserved for empty/none
        let empty: Arc<str> = Arc::from("");
        interner.strings.push(empty.clone());
        interner.map.insert(empty, Atom::NONE);
        for s in WELL_KNOWN {
            interner.intern(s);
        }
        interner
    }

    /// Intern a string, returning its Atom handle.
    /// If the string was already interned, returns the existing Atom.
    #[inline]
    pub fn intern(&mut self, s: &str) -> Atom {
        if let Some(&atom) = self.map.get(s) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        let owned: Arc<str> = Arc::from(s);
        self.strings.push(owned.clone());
        self.map.insert(owned, atom);
        atom
    }

    /// Resolve an Atom back to its string value.
    /// Returns empty string if atom is out of bounds (safety for error recovery).
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings
            .get(atom.0 as usize)
            .map(|s| s.as_ref())
            .unwrap_or("")
    }

    /// Get the number of interned strings.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the interner holds nothing beyond the well-known names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= WELL_KNOWN.len() + 1
    }
}
