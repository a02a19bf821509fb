//! Tracing setup for the checker binary.
//!
//! `COOLC_LOG` selects what to log. A bare level such as `debug` applies to
//! the checker's own crates only, so dependencies stay quiet; full
//! directives (`coolc_semant::hierarchy=trace`) pass through as written.
//! `RUST_LOG` is honored unchanged when `COOLC_LOG` is unset.
//!
//! Output format is chosen by `COOLC_LOG_FORMAT`:
//!
//! - `text` (default): flat `tracing-subscriber` lines
//! - `tree`: indented span tree via `tracing-tree`
//! - `json`: one JSON object per span or event
//!
//! ```bash
//! COOLC_LOG=debug COOLC_LOG_FORMAT=tree coolc-semant main.json
//! COOLC_LOG="coolc_semant::hierarchy=trace" coolc-semant main.json
//! ```
//!
//! Nothing is installed unless one of the two filter variables is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Targets a bare `COOLC_LOG` level is applied to.
pub const CHECKER_TARGETS: &[&str] = &["coolc_cli", "coolc_semant", "coolc_ast", "coolc_common"];

const LEVELS: &[&str] = &["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directives: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Settings for the given variable values, or `None` when logging stays
    /// off. `COOLC_LOG` takes precedence over `RUST_LOG`.
    pub fn from_vars(
        coolc_log: Option<&str>,
        rust_log: Option<&str>,
        format: Option<&str>,
    ) -> Option<Self> {
        let directives = match (coolc_log, rust_log) {
            (Some(value), _) => scoped_directives(value),
            (None, Some(value)) => value.to_string(),
            (None, None) => return None,
        };
        Some(Self {
            directives,
            format: LogFormat::parse(format.unwrap_or_default()),
        })
    }

    fn from_env() -> Option<Self> {
        let coolc_log = std::env::var("COOLC_LOG").ok();
        let rust_log = std::env::var("RUST_LOG").ok();
        let format = std::env::var("COOLC_LOG_FORMAT").ok();
        Self::from_vars(coolc_log.as_deref(), rust_log.as_deref(), format.as_deref())
    }

    /// Invalid directives are dropped rather than failing startup.
    pub fn filter(&self) -> EnvFilter {
        EnvFilter::builder().parse_lossy(&self.directives)
    }
}

/// Expand each bare level in a comma-separated directive list into one
/// directive per checker crate.
pub fn scoped_directives(value: &str) -> String {
    value
        .split(',')
        .map(str::trim)
        .filter(|directive| !directive.is_empty())
        .map(|directive| {
            let level = directive.to_lowercase();
            if LEVELS.contains(&level.as_str()) {
                CHECKER_TARGETS
                    .iter()
                    .map(|target| format!("{target}={level}"))
                    .collect::<Vec<_>>()
                    .join(",")
            } else {
                directive.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. All output goes to stderr so stdout stays
/// reserved for `--print-types` and JSON reports.
pub fn init_tracing() {
    let Some(settings) = LogSettings::from_env() else {
        return;
    };

    let filter = settings.filter();
    match settings.format {
        LogFormat::Tree => {
            let tree_layer = tracing_tree::HierarchicalLayer::default()
                .with_writer(std::io::stderr)
                .with_indent_amount(2)
                .with_indent_lines(true)
                .with_deferred_spans(true)
                .with_targets(true);
            Registry::default().with(filter).with(tree_layer).init();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
