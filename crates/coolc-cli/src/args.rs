use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the coolc-semant binary.
#[derive(Parser, Debug)]
#[command(
    name = "coolc-semant",
    version,
    about = "Static semantic checker for COOL programs"
)]
pub struct CliArgs {
    /// JSON file with checker options; flags below override it.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Stop checking classes after the first class with errors.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Maximum expression nesting depth.
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<u32>,

    /// Print the resolved type of every expression as JSON on stdout.
    #[arg(long = "print-types")]
    pub print_types: bool,

    /// Color and style diagnostic output.
    #[arg(long)]
    pub pretty: bool,

    /// Diagnostic output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// AST documents produced by the parser, one per source file.
    #[arg(value_name = "AST", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `file:line: message` lines on stderr.
    Text,
    /// One JSON report on stdout.
    Json,
}
