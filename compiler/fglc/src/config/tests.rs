#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use fgl_ir::LanguageVersion;
use fgl_resolve::SearchMode;
use pretty_assertions::assert_eq;

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn test_defaults() {
    let options = CheckOptions::from_args(&args(&["main.4gl"]), None).unwrap();
    assert_eq!(
        options,
        CheckOptions {
            version: LanguageVersion::LATEST,
            error_limit: 50,
            search_mode: SearchMode::Full,
            paths: vec![PathBuf::from("main.4gl")],
        }
    );
}

#[test]
fn test_flags() {
    let options = CheckOptions::from_args(
        &args(&["--version=3.10", "a.4gl", "--quick", "--error-limit=0", "b.4gl"]),
        None,
    )
    .unwrap();
    assert_eq!(options.version, LanguageVersion::V3_10);
    assert_eq!(options.error_limit, 0);
    assert_eq!(options.search_mode, SearchMode::Quick);
    assert_eq!(
        options.paths,
        vec![PathBuf::from("a.4gl"), PathBuf::from("b.4gl")]
    );
    assert_eq!(options.diagnostic_config().error_limit, 0);
    assert!(options.diagnostic_config().deduplicate);
}

#[test]
fn test_environment_version_is_overridden_by_flag() {
    let from_env = CheckOptions::from_args(&args(&["a.4gl"]), Some("2.50")).unwrap();
    assert_eq!(from_env.version, LanguageVersion::V2_50);

    let from_flag =
        CheckOptions::from_args(&args(&["a.4gl", "--version=4.00"]), Some("2.50")).unwrap();
    assert_eq!(from_flag.version, LanguageVersion::V4_00);

    let blank = CheckOptions::from_args(&args(&["a.4gl"]), Some("  ")).unwrap();
    assert_eq!(blank.version, LanguageVersion::LATEST);
}

#[test]
fn test_rejections() {
    assert!(matches!(
        CheckOptions::from_args(&args(&["--version=9.99", "a.4gl"]), None),
        Err(CliError::UnknownVersion(v)) if v == "9.99"
    ));
    assert!(matches!(
        CheckOptions::from_args(&args(&["a.4gl"]), Some("x")),
        Err(CliError::UnknownVersion(_))
    ));
    assert!(matches!(
        CheckOptions::from_args(&args(&["--error-limit=-3", "a.4gl"]), None),
        Err(CliError::InvalidErrorLimit(_))
    ));
    assert!(matches!(
        CheckOptions::from_args(&args(&["--verbose", "a.4gl"]), None),
        Err(CliError::UnknownOption(o)) if o == "--verbose"
    ));
    assert!(matches!(
        CheckOptions::from_args(&args(&["--quick"]), None),
        Err(CliError::NoInput)
    ));
}
