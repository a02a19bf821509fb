//! Common types and utilities for the coolc compiler.
//!
//! This crate provides foundational types used across all coolc crates:
//! - String interning (`Atom`, `Interner`) and the well-known names of the language
//! - Diagnostics (`Diagnostic`, codes, message templates)
//! - Compiler limits and thresholds

// String interning for class, method and variable names
pub mod interner;
pub use interner::{Atom, Interner, names};

// Diagnostic types, codes and message templates
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory, format_message};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/interner_tests.rs"]
mod interner_tests;

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
