//! Strictness checks
//!
//! After loading, each explicitly chosen discriminator should correspond to
//! at least one loaded file; otherwise the process is probably running with
//! no environment-specific overrides at all.

use crate::domain::value_objects::{ConfigWarning, WarningKind};

/// Environment name that is assumed when none is configured.
pub const IMPLICIT_ENVIRONMENT: &str = "development";

const RESERVED_ENVIRONMENTS: &[&str] = &["default", "local"];

/// Check environments and instance against the loaded source file names.
///
/// Matching is by substring of the base file name, so `qa` is satisfied by
/// `qa.json` as well as `web1-qa.yaml`.
pub fn run_strictness_checks(
    file_names: &[String],
    environments: &[String],
    instance: Option<&str>,
) -> Vec<ConfigWarning> {
    let mut findings = Vec::new();
    let matches_any = |needle: &str| file_names.iter().any(|name| name.contains(needle));

    for env in environments {
        if env.is_empty() {
            continue;
        }
        if env != IMPLICIT_ENVIRONMENT && !matches_any(env) {
            findings.push(
                ConfigWarning::new(
                    WarningKind::UnmatchedEnvironment,
                    format!("environment value of '{env}' did not match any deployment config file names"),
                )
                .with_source(env.clone()),
            );
        }
        if RESERVED_ENVIRONMENTS.contains(&env.as_str()) {
            findings.push(
                ConfigWarning::new(
                    WarningKind::AmbiguousEnvironment,
                    format!("environment value of '{env}' is ambiguous"),
                )
                .with_source(env.clone()),
            );
        }
    }

    if let Some(instance) = instance.filter(|i| !i.is_empty()) {
        if !matches_any(instance) {
            findings.push(
                ConfigWarning::new(
                    WarningKind::UnmatchedInstance,
                    format!("instance value of '{instance}' did not match any instance config file names"),
                )
                .with_source(instance),
            );
        }
    }

    findings
}
