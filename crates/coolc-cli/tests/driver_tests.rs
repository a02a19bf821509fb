use clap::Parser;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::CliArgs;
use crate::driver::{EXIT_SEMANTIC_ERRORS, EXIT_SUCCESS, check, load_program, run};

fn write_doc(dir: &Path, name: &str, doc: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(doc).expect("serializable"))
        .expect("write AST file");
    path
}

fn main_doc(body: Value) -> Value {
    json!({
        "file": "main.cl",
        "classes": [{
            "name": "Main", "parent": "IO", "line": 1,
            "features": [{
                "kind": "method", "name": "main", "return_type": "Object", "line": 2,
                "body": body
            }]
        }]
    })
}

fn parse_args(extra: &[&str], files: &[PathBuf]) -> CliArgs {
    let mut argv: Vec<String> = vec!["coolc-semant".to_string()];
    argv.extend(extra.iter().map(|s| s.to_string()));
    argv.extend(files.iter().map(|p| p.to_string_lossy().into_owned()));
    CliArgs::try_parse_from(argv).expect("args should parse")
}

fn run_to_strings(args: &CliArgs) -> (u8, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let status = run(args, &mut out, &mut err).expect("driver runs");
    (
        status,
        String::from_utf8(out).expect("utf-8 stdout"),
        String::from_utf8(err).expect("utf-8 stderr"),
    )
}

#[test]
fn well_typed_program_exits_cleanly() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_doc(
        dir.path(),
        "main.json",
        &main_doc(json!({
            "kind": "dispatch", "method": "out_string", "line": 2,
            "args": [{ "kind": "string", "value": "hi", "line": 2 }]
        })),
    );

    let (status, out, err) = run_to_strings(&parse_args(&[], &[file]));
    assert_eq!(status, EXIT_SUCCESS);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn semantic_errors_print_diagnostics_and_halt() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_doc(
        dir.path(),
        "main.json",
        &main_doc(json!({
            "kind": "binary", "op": "+", "line": 4,
            "lhs": { "kind": "int", "value": 1, "line": 4 },
            "rhs": { "kind": "string", "value": "s", "line": 4 }
        })),
    );

    let (status, out, err) = run_to_strings(&parse_args(&[], &[file]));
    assert_eq!(status, EXIT_SEMANTIC_ERRORS);
    assert!(out.is_empty());
    assert_eq!(
        err,
        "main.cl:4: non-Int arguments: Int + String\n\
         Compilation halted due to static semantic errors.\n"
    );
}

#[test]
fn documents_are_combined_in_argument_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let lib = write_doc(
        dir.path(),
        "lib.json",
        &json!({
            "file": "lib.cl",
            "classes": [{ "name": "Counter", "line": 1 }]
        }),
    );
    let main = write_doc(
        dir.path(),
        "main.json",
        &main_doc(json!({ "kind": "new", "type_name": "Counter", "line": 2 })),
    );

    let program = load_program(&[lib.clone(), main.clone()]).expect("program loads");
    let names: Vec<&str> = program
        .classes
        .iter()
        .map(|class| program.name(class.name))
        .collect();
    assert_eq!(names, vec!["Counter", "Main"]);
    assert_eq!(program.name(program.classes[0].file), "lib.cl");

    let result = check(&parse_args(&[], &[lib, main])).expect("check runs");
    assert!(result.halted.is_none());
    assert_eq!(result.files_read.len(), 2);
}

#[test]
fn print_types_writes_annotations_to_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_doc(
        dir.path(),
        "main.json",
        &main_doc(json!({ "kind": "int", "value": 5, "line": 2 })),
    );

    let (status, out, _) = run_to_strings(&parse_args(&["--print-types"], &[file]));
    assert_eq!(status, EXIT_SUCCESS);
    let annotations: Value = serde_json::from_str(&out).expect("JSON on stdout");
    assert_eq!(
        annotations,
        json!([{ "expr": 0, "line": 2, "kind": "int_const", "type": "Int" }])
    );
}

#[test]
fn json_format_reports_on_stdout() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_doc(
        dir.path(),
        "main.json",
        &main_doc(json!({ "kind": "object", "name": "nobody", "line": 6 })),
    );

    let (status, out, err) = run_to_strings(&parse_args(&["--format", "json"], &[file]));
    assert_eq!(status, EXIT_SEMANTIC_ERRORS);
    assert!(err.is_empty());
    let report: Value = serde_json::from_str(&out).expect("JSON report");
    assert_eq!(report["well_typed"], false);
    assert_eq!(report["error_count"], 1);
    assert_eq!(report["diagnostics"][0]["line"], 6);
    assert_eq!(
        report["diagnostics"][0]["message_text"],
        "Undeclared identifier nobody."
    );
    assert!(report.get("types").is_none());
}

#[test]
fn malformed_document_is_an_input_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{ "file": "broken.cl", "classes": [{ "line": 1 }] }"#)
        .expect("write AST file");

    let mut out = Vec::new();
    let mut err = Vec::new();
    let error = run(&parse_args(&[], &[path]), &mut out, &mut err).expect_err("bad input");
    let message = format!("{error:#}");
    assert!(message.contains("broken.json"), "{message}");
    assert!(message.contains("invalid AST document"), "{message}");
}

#[test]
fn missing_file_is_an_input_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nowhere.json");
    let error = load_program(&[path]).expect_err("file does not exist");
    assert!(format!("{error:#}").contains("failed to read AST file"));
}
