use crate::diagnostics::{
    COMPILATION_HALTED, DIAGNOSTIC_MESSAGES, Diagnostic, DiagnosticCategory, diagnostic_codes,
    diagnostic_messages, format_message, get_message_template,
};
use rustc_hash::FxHashSet;

#[test]
fn test_format_message_fills_placeholders() {
    let text = format_message(
        diagnostic_messages::ARGUMENT_MISMATCH,
        &["out_int", "String", "1", "Int"],
    );
    assert_eq!(
        text,
        "In call of method out_int, type String of parameter #1 does not conform to declared type Int."
    );
}

#[test]
fn test_format_message_repeats_placeholder() {
    let text = format_message(diagnostic_messages::INHERITANCE_CYCLE, &["A"]);
    assert_eq!(
        text,
        "Class A, or an ancestor of A, is involved in an inheritance cycle."
    );
}

#[test]
fn test_format_message_leaves_placeholders_inside_arguments() {
    // Argument text is copied verbatim.
    let text = format_message(
        diagnostic_messages::ARGUMENT_MISMATCH,
        &["f{1}", "String", "1", "Int"],
    );
    assert_eq!(
        text,
        "In call of method f{1}, type String of parameter #1 does not conform to declared type Int."
    );
}

#[test]
fn test_format_message_keeps_unmatched_braces() {
    assert_eq!(format_message("{0} and {3}", &["a"]), "a and {3}");
    assert_eq!(format_message("{x} {", &["a"]), "{x} {");
    assert_eq!(format_message("{0}{0}", &["{0}"]), "{0}{0}");
}

#[test]
fn test_diagnostic_display_is_file_line_message() {
    let diag = Diagnostic::error(
        "good.cl".to_string(),
        12,
        "Undeclared identifier x.".to_string(),
        diagnostic_codes::UNDECLARED_IDENTIFIER,
    );
    assert_eq!(diag.to_string(), "good.cl:12: Undeclared identifier x.");
    assert_eq!(diag.category, DiagnosticCategory::Error);
}

#[test]
fn test_internal_diagnostic_has_no_position() {
    let diag = Diagnostic::internal("boom".to_string(), diagnostic_codes::HIERARCHY_CORRUPTED);
    assert_eq!(diag.category, DiagnosticCategory::Internal);
    assert_eq!(diag.to_string(), "boom");
}

#[test]
fn test_message_codes_are_unique() {
    let mut seen = FxHashSet::default();
    for message in DIAGNOSTIC_MESSAGES {
        assert!(seen.insert(message.code), "duplicate code {}", message.code);
    }
    assert_eq!(
        get_message_template(diagnostic_codes::UNDEFINED_METHOD),
        Some("Dispatch to undefined method {0}.")
    );
    assert_eq!(
        get_message_template(diagnostic_codes::EMPTY_CASE),
        Some("Case expression has no branches.")
    );
    assert_eq!(get_message_template(9999), None);
}

#[test]
fn test_diagnostic_serializes() {
    let diag = Diagnostic::error(
        "a.cl".to_string(),
        3,
        COMPILATION_HALTED.to_string(),
        diagnostic_codes::RETURN_MISMATCH,
    );
    let json = serde_json::to_value(&diag).expect("serialize");
    assert_eq!(json["line"], 3);
    assert_eq!(json["category"], "Error");
}
