use coolc_common::limits::MAX_EXPR_CHECK_DEPTH;
use serde::{Deserialize, Serialize};

/// Checker behavior switches. Loadable from a JSON config file; missing
/// fields take their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerOptions {
    /// Stop the class traversal at the first class with errors.
    pub fail_fast_classes: bool,
    /// Maximum expression nesting depth before the checker gives up on a
    /// subtree.
    pub max_expr_depth: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            fail_fast_classes: false,
            max_expr_depth: MAX_EXPR_CHECK_DEPTH,
        }
    }
}
