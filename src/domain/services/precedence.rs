//! Source precedence
//!
//! Computes which configuration file names apply and in what order
//! (lowest priority first):
//! 1. `default`
//! 2. each environment, in the order given
//! 3. per environment: short host name, `host-env` (and the full host name
//!    pair when it differs from the short one)
//! 4. per environment: `local`, `local-env`
//!
//! Every base name is immediately followed by its `-instance` variant when an
//! instance is set, and every name is tried with each extension in turn.

use std::collections::HashMap;

/// Inputs to file-name ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Discriminators {
    pub environments: Vec<String>,
    pub instance: Option<String>,
    pub hostname: Option<String>,
}

/// Base names (no extension, instance variants included), lowest first.
pub fn base_names(discriminators: &Discriminators) -> Vec<String> {
    let envs = &discriminators.environments;
    let mut bases = vec!["default".to_string()];
    bases.extend(envs.iter().cloned());

    if let Some(full) = discriminators.hostname.as_deref().filter(|h| !h.is_empty()) {
        let short = full.split('.').next().unwrap_or(full);
        for env in envs {
            bases.push(short.to_string());
            bases.push(format!("{short}-{env}"));
            if full != short {
                bases.push(full.to_string());
                bases.push(format!("{full}-{env}"));
            }
        }
    }

    for env in envs {
        bases.push("local".to_string());
        bases.push(format!("local-{env}"));
    }

    let mut names = Vec::with_capacity(bases.len() * 2);
    for base in bases {
        if let Some(instance) = &discriminators.instance {
            let variant = format!("{base}-{instance}");
            names.push(base);
            names.push(variant);
        } else {
            names.push(base);
        }
    }
    dedup_keep_first(names)
}

/// Full file names mapped to their resolution index (lower applies first).
pub fn resolution_order(discriminators: &Discriminators, extensions: &[&str]) -> HashMap<String, usize> {
    let mut order = HashMap::new();
    for base in base_names(discriminators) {
        for ext in extensions {
            let next = order.len();
            order.entry(format!("{base}.{ext}")).or_insert(next);
        }
    }
    order
}

fn dedup_keep_first(names: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    names.into_iter().filter(|n| seen.insert(n.clone())).collect()
}
