use clap::Parser;
use std::fs;

use coolc_semant::CheckerOptions;

use crate::args::CliArgs;
use crate::config::{load_options, parse_options, resolve_options};

#[test]
fn empty_config_uses_defaults() {
    let options = parse_options("{}").expect("empty object is valid");
    assert_eq!(options, CheckerOptions::default());
}

#[test]
fn config_fields_are_read() {
    let options = parse_options(r#"{ "fail_fast_classes": true, "max_expr_depth": 32 }"#)
        .expect("valid config");
    assert!(options.fail_fast_classes);
    assert_eq!(options.max_expr_depth, 32);
}

#[test]
fn malformed_config_is_an_error() {
    let err = parse_options(r#"{ "max_expr_depth": "lots" }"#).expect_err("wrong field type");
    assert!(err.to_string().contains("checker config"));
}

#[test]
fn missing_config_file_names_the_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.json");
    let err = load_options(&path).expect_err("file does not exist");
    assert!(format!("{err:#}").contains("absent.json"));
}

#[test]
fn flags_override_the_config_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("semant.json");
    fs::write(&path, r#"{ "fail_fast_classes": false, "max_expr_depth": 32 }"#)
        .expect("write config");

    let config = path.to_string_lossy().into_owned();
    let args = CliArgs::try_parse_from([
        "coolc-semant",
        "--config",
        config.as_str(),
        "--fail-fast",
        "main.json",
    ])
    .expect("args should parse");
    let options = resolve_options(&args).expect("options resolve");
    assert!(options.fail_fast_classes);
    assert_eq!(options.max_expr_depth, 32);

    let args = CliArgs::try_parse_from([
        "coolc-semant",
        "--config",
        config.as_str(),
        "--max-depth",
        "7",
        "main.json",
    ])
    .expect("args should parse");
    assert_eq!(resolve_options(&args).expect("options resolve").max_expr_depth, 7);
}
