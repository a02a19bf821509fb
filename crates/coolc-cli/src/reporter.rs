use colored::Colorize;

use coolc_common::diagnostics::COMPILATION_HALTED;
use coolc_common::{Diagnostic, DiagnosticCategory};

/// Renders diagnostics as text. Plain output is `file:line: message`, one per
/// line; pretty output adds the category, the code and colors.
pub struct Reporter {
    pretty: bool,
}

impl Reporter {
    pub fn new(pretty: bool) -> Self {
        Reporter { pretty }
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        if !self.pretty {
            return diagnostic.to_string();
        }

        let mut output = String::new();
        if let Some(location) = self.format_location(diagnostic) {
            output.push_str(&location);
            output.push_str(" - ");
        }
        output.push_str(&self.format_category(diagnostic.category));
        output.push(' ');
        output.push_str(&format!("COOL{}", diagnostic.code).dimmed().to_string());
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        output
    }

    /// Final line printed when any error was found.
    pub fn format_halt(&self, error_count: u32) -> String {
        if !self.pretty {
            return COMPILATION_HALTED.to_string();
        }
        let noun = if error_count == 1 { "error" } else { "errors" };
        format!(
            "{} {}",
            COMPILATION_HALTED.red().bold(),
            format!("({error_count} {noun})").dimmed()
        )
    }

    fn format_location(&self, diagnostic: &Diagnostic) -> Option<String> {
        if diagnostic.file.is_empty() {
            return None;
        }
        Some(format!(
            "{}:{}",
            diagnostic.file.cyan(),
            diagnostic.line.to_string().yellow()
        ))
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        match category {
            DiagnosticCategory::Error => "error".red().to_string(),
            DiagnosticCategory::Internal => "internal error".red().bold().to_string(),
        }
    }
}
