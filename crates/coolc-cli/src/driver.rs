//! Load AST documents, run the checker and write its results.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use coolc_ast::{Program, SourceProgram, lower_sources};
use coolc_common::Diagnostic;
use coolc_semant::{SemanticAnalysis, TypeAnnotation, check_program};

use crate::args::{CliArgs, OutputFormat};
use crate::config::resolve_options;
use crate::reporter::Reporter;

/// Exit status codes.
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_SEMANTIC_ERRORS: u8 = 1;
pub const EXIT_INPUT_FAILURE: u8 = 2;

pub struct CheckResult {
    pub program: Program,
    pub analysis: SemanticAnalysis,
    /// Set when analysis found errors.
    pub halted: Option<String>,
    pub files_read: Vec<PathBuf>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    well_typed: bool,
    error_count: u32,
    diagnostics: &'a [Diagnostic],
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<Vec<TypeAnnotation>>,
}

pub fn read_source(path: &Path) -> Result<SourceProgram> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read AST file: {}", path.display()))?;
    SourceProgram::from_json(&text)
        .with_context(|| format!("failed to load AST file: {}", path.display()))
}

/// Read every document and lower them into one program, in argument order.
pub fn load_program(files: &[PathBuf]) -> Result<Program> {
    let sources = files
        .iter()
        .map(|path| read_source(path))
        .collect::<Result<Vec<_>>>()?;
    Ok(lower_sources(&sources))
}

pub fn check(args: &CliArgs) -> Result<CheckResult> {
    let options = resolve_options(args)?;
    let program = load_program(&args.files)?;
    tracing::info!(
        files = args.files.len(),
        classes = program.classes.len(),
        "loaded program"
    );

    let (analysis, halted) = match check_program(&program, &options) {
        Ok(analysis) => (analysis, None),
        Err(halted) => {
            let message = halted.to_string();
            (*halted.analysis, Some(message))
        }
    };
    Ok(CheckResult {
        program,
        analysis,
        halted,
        files_read: args.files.clone(),
    })
}

/// Run one check and write its output. Returns the process exit status;
/// input failures are returned as errors.
pub fn run(args: &CliArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<u8> {
    let result = check(args)?;
    let analysis = &result.analysis;
    let types = args
        .print_types
        .then(|| analysis.annotations(&result.program));

    match args.format {
        OutputFormat::Json => {
            let report = JsonReport {
                well_typed: result.halted.is_none(),
                error_count: analysis.error_count,
                diagnostics: &analysis.diagnostics,
                types,
            };
            serde_json::to_writer_pretty(&mut *out, &report)
                .context("failed to write JSON report")?;
            writeln!(out).context("failed to write JSON report")?;
        }
        OutputFormat::Text => {
            let reporter = Reporter::new(args.pretty);
            if !analysis.diagnostics.is_empty() {
                writeln!(err, "{}", reporter.render(&analysis.diagnostics))
                    .context("failed to write diagnostics")?;
            }
            if result.halted.is_some() {
                writeln!(err, "{}", reporter.format_halt(analysis.error_count))
                    .context("failed to write diagnostics")?;
            }
            if let Some(types) = types {
                serde_json::to_writer_pretty(&mut *out, &types)
                    .context("failed to write type annotations")?;
                writeln!(out).context("failed to write type annotations")?;
            }
        }
    }

    Ok(if result.halted.is_some() {
        EXIT_SEMANTIC_ERRORS
    } else {
        EXIT_SUCCESS
    })
}
