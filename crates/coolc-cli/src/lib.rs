//! Command-line driver for the coolc semantic checker.
//!
//! - `args` - clap argument definitions
//! - `config` - JSON checker configuration files
//! - `driver` - loads AST documents, runs analysis, writes results
//! - `reporter` - diagnostic rendering
//! - `tracing_config` - opt-in tracing subscriber setup

pub mod args;
pub mod config;
pub mod driver;
pub mod reporter;
pub mod tracing_config;

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod args_tests;

#[cfg(test)]
#[path = "../tests/config_tests.rs"]
mod config_tests;

#[cfg(test)]
#[path = "../tests/reporter_tests.rs"]
mod reporter_tests;

#[cfg(test)]
#[path = "../tests/driver_tests.rs"]
mod driver_tests;

#[cfg(test)]
#[path = "../tests/tracing_config_tests.rs"]
mod tracing_config_tests;
