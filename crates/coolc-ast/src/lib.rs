//! Abstract syntax tree consumed by the coolc semantic checker.
//!
//! - `node` - class, feature and expression declarations
//! - `arena` - `NodeArena`, the owner of every expression node
//! - `builder` - `AstBuilder` for constructing programs
//! - `source` - serde JSON form produced by the parser, and its lowering
//!
//! Expressions live in a `NodeArena` and are referenced by `ExprId`. The tree
//! is never mutated by analysis; resolved types are kept beside it, keyed by
//! `ExprId`.

pub mod arena;
pub mod builder;
pub mod node;
pub mod source;

pub use arena::NodeArena;
pub use builder::AstBuilder;
pub use node::{
    ArithOp, AttrDecl, CaseBranch, ClassDecl, CompareOp, ExprId, ExprKind, ExprNode, Feature,
    Formal, MethodDecl, Program,
};
pub use source::{SourceError, SourceProgram, lower_sources};

#[cfg(test)]
#[path = "../tests/builder_tests.rs"]
mod builder_tests;

#[cfg(test)]
#[path = "../tests/source_tests.rs"]
mod source_tests;
