//! Diagnostic accumulation.
//!
//! Analysis does not stop at the first error. Every rule that finds a problem
//! reports it here and hands `NO_TYPE` upwards; the final count decides
//! whether compilation halts.

use coolc_common::Diagnostic;
use coolc_common::diagnostics::{
    diagnostic_codes, diagnostic_messages, format_message, get_message_template,
};

#[derive(Clone, Debug, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: u32,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a positioned error. `args` fill the `{0}`, `{1}`, ...
    /// placeholders of the code's message template.
    pub fn error(&mut self, file: &str, line: u32, code: u32, args: &[&str]) {
        let message = match get_message_template(code) {
            Some(template) => format_message(template, args),
            None => format!("error {code}"),
        };
        tracing::trace!(file, line, code, %message, "semantic error");
        self.error_count += 1;
        self.diagnostics
            .push(Diagnostic::error(file.to_string(), line, message, code));
    }

    /// Report an unreachable-class count after hierarchy construction.
    pub fn hierarchy_corrupted(&mut self, reachable: u32, total: u32) {
        let unreachable = total.saturating_sub(reachable).to_string();
        let message = format_message(
            diagnostic_messages::HIERARCHY_CORRUPTED,
            &[&unreachable, &total.to_string()],
        );
        tracing::error!(%message, "class hierarchy corrupted");
        self.error_count += 1;
        self.diagnostics.push(Diagnostic::internal(
            message,
            diagnostic_codes::HIERARCHY_CORRUPTED,
        ));
    }

    #[inline]
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
