//! Strictness contracts (STRICT-001 through STRICT-003)
//!
//! Discriminators that select no file are reported; strict mode turns the
//! first report into a load failure.

use crate::common::*;
use strata::{ConfigError, WarningKind};

fn kinds(dir: &ConfigDir, options: strata::LoadOptions) -> Vec<WarningKind> {
    dir.load(options)
        .unwrap()
        .warnings()
        .iter()
        .map(|w| w.kind)
        .collect()
}

/// CONTRACT STRICT-001: The implicit environment is never reported
#[test]
fn contract_development_needs_no_file() {
    let dir = ConfigDir::new().with_file("default.json", DEFAULT_JSON);
    assert!(kinds(&dir, dir.options()).is_empty());
    assert!(kinds(&dir, dir.options().with_environment("development")).is_empty());
}

/// CONTRACT STRICT-002: `default` and `local` are ambiguous environment names
#[test]
fn contract_reserved_environment_names_are_ambiguous() {
    let dir = ConfigDir::new()
        .with_file("default.json", DEFAULT_JSON)
        .with_file("local.toml", LOCAL_TOML);

    assert_eq!(
        kinds(&dir, dir.options().with_environment("default")),
        vec![WarningKind::AmbiguousEnvironment]
    );
    assert_eq!(
        kinds(&dir, dir.options().with_environment("local")),
        vec![WarningKind::AmbiguousEnvironment]
    );
}

/// CONTRACT STRICT-003: An explicit instance must match a file; strict mode fails
#[test]
fn contract_unmatched_instance() {
    let dir = ConfigDir::new()
        .with_file("default.json", DEFAULT_JSON)
        .with_file("default-1.json", "{}");

    assert!(kinds(&dir, dir.options().with_instance("1")).is_empty());
    assert_eq!(
        kinds(&dir, dir.options().with_instance("7")),
        vec![WarningKind::UnmatchedInstance]
    );

    let err = dir
        .load(dir.options().with_instance("7").with_strict(true))
        .unwrap_err();
    match err {
        ConfigError::StrictnessViolation { message } => assert!(message.contains("'7'")),
        other => panic!("expected StrictnessViolation, got {other}"),
    }
}
