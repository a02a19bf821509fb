use coolc_common::Diagnostic;
use coolc_common::diagnostics::diagnostic_codes;

use crate::reporter::Reporter;

fn sample() -> Vec<Diagnostic> {
    vec![
        Diagnostic::error(
            "main.cl".to_string(),
            3,
            "non-Int arguments: Int + String".to_string(),
            diagnostic_codes::NON_INT_ARGUMENTS,
        ),
        Diagnostic::error(
            "main.cl".to_string(),
            9,
            "Undeclared identifier x.".to_string(),
            diagnostic_codes::UNDECLARED_IDENTIFIER,
        ),
    ]
}

#[test]
fn plain_output_is_one_line_per_diagnostic() {
    let reporter = Reporter::new(false);
    assert_eq!(
        reporter.render(&sample()),
        "main.cl:3: non-Int arguments: Int + String\nmain.cl:9: Undeclared identifier x."
    );
    assert_eq!(
        reporter.format_halt(2),
        "Compilation halted due to static semantic errors."
    );
}

#[test]
fn pretty_output_names_category_and_code() {
    colored::control::set_override(false);
    let reporter = Reporter::new(true);
    let rendered = reporter.format_diagnostic(&sample()[0]);
    assert_eq!(
        rendered,
        "main.cl:3 - error COOL4002: non-Int arguments: Int + String"
    );
    assert_eq!(
        reporter.format_halt(1),
        "Compilation halted due to static semantic errors. (1 error)"
    );
}

#[test]
fn internal_diagnostics_have_no_location() {
    colored::control::set_override(false);
    let diagnostic = Diagnostic::internal(
        "Internal error: 7 of 9 classes are unreachable from Object.".to_string(),
        diagnostic_codes::HIERARCHY_CORRUPTED,
    );
    assert_eq!(
        Reporter::new(false).format_diagnostic(&diagnostic),
        "Internal error: 7 of 9 classes are unreachable from Object."
    );
    assert_eq!(
        Reporter::new(true).format_diagnostic(&diagnostic),
        "internal error COOL1006: Internal error: 7 of 9 classes are unreachable from Object."
    );
}
