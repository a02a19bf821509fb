use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use coolc_semant::CheckerOptions;

use crate::args::CliArgs;

pub fn parse_options(source: &str) -> Result<CheckerOptions> {
    serde_json::from_str(source).context("failed to parse checker config JSON")
}

pub fn load_options(path: &Path) -> Result<CheckerOptions> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read checker config: {}", path.display()))?;
    parse_options(&source)
        .with_context(|| format!("invalid checker config: {}", path.display()))
}

/// Options from the config file (or defaults), with command-line flags
/// applied on top.
pub fn resolve_options(args: &CliArgs) -> Result<CheckerOptions> {
    let mut options = match &args.config {
        Some(path) => load_options(path)?,
        None => CheckerOptions::default(),
    };
    if args.fail_fast {
        options.fail_fast_classes = true;
    }
    if let Some(depth) = args.max_depth {
        options.max_expr_depth = depth;
    }
    tracing::debug!(?options, "resolved checker options");
    Ok(options)
}
