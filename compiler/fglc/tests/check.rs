#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end checks over files on disk.

use std::fs;
use std::path::PathBuf;

use fgl_diagnostic::ErrorCode;
use fglc::commands::{check_files, read_modules};
use fglc::{check_modules, CheckOptions, CliError};
use pretty_assertions::assert_eq;

fn options_for(paths: &[&PathBuf]) -> CheckOptions {
    let args: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
    CheckOptions::from_args(&args, None).unwrap()
}

#[test]
fn test_project_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let main = dir.path().join("main.4gl");
    let tools = dir.path().join("Tools.4gl");
    fs::write(
        &main,
        "IMPORT FGL tools\nMAIN\n  DEFINE n INTEGER\n  CALL tools.total() RETURNING n\n  CALL missing()\nEND MAIN\n",
    )
    .unwrap();
    fs::write(
        &tools,
        "PUBLIC FUNCTION total() RETURNS INTEGER\n  RETURN 3\nEND FUNCTION\n",
    )
    .unwrap();

    let options = options_for(&[&main, &tools]);
    let modules = read_modules(&options).unwrap();
    assert_eq!(modules.len(), 2);
    assert_eq!(modules[1].module_name(), "tools");

    let reports = check_modules(&modules, &options);
    let codes: Vec<ErrorCode> = reports[0].diagnostics.iter().map(|(_, _, d)| d.code).collect();
    assert_eq!(codes, vec![ErrorCode::E2001]);
    assert_eq!(reports[0].diagnostics[0].0, 5);
    assert!(reports[1].diagnostics.is_empty());

    assert_eq!(check_files(&options).unwrap(), 1);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.4gl");
    let options = options_for(&[&path]);

    let error = read_modules(&options).unwrap_err();
    assert!(matches!(error, CliError::NotFound { .. }));
    assert_eq!(
        error.to_string(),
        format!("cannot find file '{}'", path.display())
    );
}
