//! Runs the built `coolc-semant` binary and checks its exit status.

use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn write_doc(dir: &Path, doc: &Value) -> PathBuf {
    let path = dir.join("program.json");
    fs::write(&path, doc.to_string()).expect("write AST file");
    path
}

fn coolc_semant(args: &[&str], file: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_coolc-semant"))
        .args(args)
        .arg(file)
        .env_remove("COOLC_LOG")
        .env_remove("RUST_LOG")
        .output()
        .expect("binary runs")
}

#[test]
fn exit_status_zero_for_well_typed_program() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_doc(
        dir.path(),
        &json!({
            "file": "ok.cl",
            "classes": [{
                "name": "Main", "line": 1,
                "features": [{
                    "kind": "method", "name": "main", "return_type": "Int", "line": 2,
                    "body": { "kind": "int", "value": 0, "line": 2 }
                }]
            }]
        }),
    );
    let output = coolc_semant(&[], &file);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stderr.is_empty());
}

#[test]
fn exit_status_one_for_semantic_errors() {
    let dir = tempfile::tempdir().expect("temp dir");
    let file = write_doc(
        dir.path(),
        &json!({
            "file": "cycle.cl",
            "classes": [
                { "name": "A", "parent": "B", "line": 1 },
                { "name": "B", "parent": "A", "line": 2 }
            ]
        }),
    );
    let output = coolc_semant(&[], &file);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cycle.cl:1: Class A, or an ancestor of A, is involved in an inheritance cycle."));
    assert!(stderr.ends_with("Compilation halted due to static semantic errors.\n"));
}

#[test]
fn exit_status_two_for_unreadable_input() {
    let dir = tempfile::tempdir().expect("temp dir");
    let output = coolc_semant(&[], &dir.path().join("missing.json"));
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("error: "));
}
