//! Centralized limits and thresholds for the coolc compiler.
//!
//! These prevent stack overflow in the recursive checker when the parser hands
//! over pathologically nested trees.

/// Maximum depth for expression type checking.
///
/// Each nested expression adds a frame to the call stack; past this depth the
/// checker reports the expression and gives it the error type instead of
/// recursing further.
///
/// ```text
/// (((((((((((1 + 2) + 3) + 4) /* ... 500 levels ... */
/// { { { { { { /* ... */ } } } } } }
/// ```
pub const MAX_EXPR_CHECK_DEPTH: u32 = 500;

/// Expected number of classes in a program, used to pre-size class tables.
pub const CLASS_TABLE_CAPACITY: usize = 64;
