//! Construction context for `Config`
//!
//! Everything the loader needs is captured here up front, so building a
//! configuration never reads process-global state on its own. `from_env`
//! snapshots the process environment and arguments; `from_parts` takes them
//! explicitly.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::env_validator::{parse_flag, EnvVarValidator, FLAG_VALUES};
use crate::domain::services::{Discriminators, IMPLICIT_ENVIRONMENT};
use crate::domain::value_objects::ConfigWarning;

pub const CONFIG_DIR_VAR: &str = "STRATA_CONFIG_DIR";
pub const ENV_VAR: &str = "STRATA_ENV";
pub const FALLBACK_ENV_VAR: &str = "APP_ENV";
pub const INSTANCE_VAR: &str = "STRATA_APP_INSTANCE";
pub const STRICT_MODE_VAR: &str = "STRATA_STRICT_MODE";
pub const ALLOW_MUTATIONS_VAR: &str = "STRATA_ALLOW_MUTATIONS";
pub const SUPPRESS_NO_CONFIG_WARNING_VAR: &str = "STRATA_SUPPRESS_NO_CONFIG_WARNING";
pub const OVERRIDE_VAR: &str = "STRATA_CONFIG";

const DEFAULT_CONFIG_DIR: &str = "config";

/// Load-time parameters.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    config_dirs: Vec<PathBuf>,
    environments: Vec<String>,
    environment_implicit: bool,
    instance: Option<String>,
    hostname: Option<String>,
    strict: bool,
    allow_mutations: bool,
    suppress_no_config_warning: bool,
    env_override: Option<String>,
    arg_override: Option<String>,
    vars: BTreeMap<String, String>,
    warnings: Vec<ConfigWarning>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadOptions {
    /// Defaults: `./config`, the implicit `development` environment, no
    /// instance or host name, and an empty variable snapshot.
    pub fn new() -> Self {
        Self {
            config_dirs: vec![PathBuf::from(DEFAULT_CONFIG_DIR)],
            environments: vec![IMPLICIT_ENVIRONMENT.to_string()],
            environment_implicit: true,
            instance: None,
            hostname: None,
            strict: false,
            allow_mutations: false,
            suppress_no_config_warning: false,
            env_override: None,
            arg_override: None,
            vars: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }

    /// Snapshot of the running process: environment variables, command-line
    /// arguments, and the system host name when neither `HOST` nor
    /// `HOSTNAME` is set.
    pub fn from_env() -> Self {
        let options = Self::from_parts(std::env::vars(), std::env::args().skip(1));
        if options.hostname.is_some() {
            return options;
        }
        match system_hostname() {
            Some(host) => options.with_hostname(host),
            None => options,
        }
    }

    /// Build from explicit variables and arguments. Arguments take
    /// precedence and may be written `--NAME=value` or `--NAME value`.
    pub fn from_parts<V, A, K, S, T>(vars: V, args: A) -> Self
    where
        V: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<String>,
        A: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let vars: BTreeMap<String, String> = vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let lookup = |name: &str| -> Option<String> {
            argument(&args, name).or_else(|| vars.get(name).cloned())
        };

        let mut options = Self::new();

        if let Some(dirs) = lookup(CONFIG_DIR_VAR).filter(|d| !d.is_empty()) {
            options.config_dirs = std::env::split_paths(&dirs).collect();
        }
        if let Some(envs) = lookup(ENV_VAR).or_else(|| lookup(FALLBACK_ENV_VAR)) {
            options = options.with_environments(envs.split(','));
        }
        options.instance = lookup(INSTANCE_VAR).filter(|i| !i.is_empty());
        options.hostname = lookup("HOST")
            .or_else(|| lookup("HOSTNAME"))
            .filter(|h| !h.is_empty());

        let mut warnings = Vec::new();
        let mut flag = |name: &str| -> bool {
            let Some(raw) = lookup(name) else {
                return false;
            };
            EnvVarValidator::new(name, FLAG_VALUES)
                .parse(&raw, parse_flag)
                .unwrap_or_else(|warning| {
                    warnings.push(warning);
                    false
                })
        };
        options.strict = flag(STRICT_MODE_VAR);
        options.allow_mutations = flag(ALLOW_MUTATIONS_VAR);
        options.suppress_no_config_warning = flag(SUPPRESS_NO_CONFIG_WARNING_VAR);
        options.warnings = warnings;

        options.env_override = vars.get(OVERRIDE_VAR).cloned();
        options.arg_override = argument(&args, OVERRIDE_VAR);
        options.vars = vars;
        options
    }

    /// Replace the config directory list.
    pub fn with_config_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.config_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config_dir(self, dir: impl Into<PathBuf>) -> Self {
        self.with_config_dirs([dir.into()])
    }

    /// Set the deployment environments, lowest precedence first. Blank
    /// entries are ignored; an empty list falls back to the implicit one.
    pub fn with_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let envs: Vec<String> = environments
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .collect();
        if envs.is_empty() {
            self.environments = vec![IMPLICIT_ENVIRONMENT.to_string()];
            self.environment_implicit = true;
        } else {
            self.environments = envs;
            self.environment_implicit = false;
        }
        self
    }

    pub fn with_environment(self, environment: impl AsRef<str>) -> Self {
        self.with_environments([environment])
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into()).filter(|i| !i.is_empty());
        self
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into()).filter(|h| !h.is_empty());
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_allow_mutations(mut self, allow: bool) -> Self {
        self.allow_mutations = allow;
        self
    }

    pub fn with_suppress_no_config_warning(mut self, suppress: bool) -> Self {
        self.suppress_no_config_warning = suppress;
        self
    }

    /// JSON text applied as if it came from the `STRATA_CONFIG` variable.
    pub fn with_env_override(mut self, json: impl Into<String>) -> Self {
        self.env_override = Some(json.into());
        self
    }

    /// JSON text applied as if it came from `--STRATA_CONFIG=...`.
    pub fn with_arg_override(mut self, json: impl Into<String>) -> Self {
        self.arg_override = Some(json.into());
        self
    }

    /// Add a variable to the snapshot used for custom environment mappings.
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn config_dirs(&self) -> &[PathBuf] {
        &self.config_dirs
    }

    pub fn environments(&self) -> &[String] {
        &self.environments
    }

    /// Whether the environment list is the fallback rather than configured.
    pub fn is_environment_implicit(&self) -> bool {
        self.environment_implicit
    }

    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    pub fn allows_mutations(&self) -> bool {
        self.allow_mutations
    }

    pub fn suppresses_no_config_warning(&self) -> bool {
        self.suppress_no_config_warning
    }

    pub fn env_override(&self) -> Option<&str> {
        self.env_override.as_deref()
    }

    pub fn arg_override(&self) -> Option<&str> {
        self.arg_override.as_deref()
    }

    /// A variable from the snapshot.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Problems found while reading flags.
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn discriminators(&self) -> Discriminators {
        Discriminators {
            environments: self.environments.clone(),
            instance: self.instance.clone(),
            hostname: self.hostname.clone(),
        }
    }
}

fn argument(args: &[String], name: &str) -> Option<String> {
    let flag = format!("--{name}");
    let prefix = format!("{flag}=");
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(value) = arg.strip_prefix(&prefix) {
            return Some(value.to_string());
        }
        if *arg == flag {
            return iter.next().cloned();
        }
    }
    None
}

fn system_hostname() -> Option<String> {
    match hostname::get() {
        Ok(name) => Some(name.to_string_lossy().into_owned()).filter(|h| !h.is_empty()),
        Err(err) => {
            tracing::debug!(%err, "could not read the system host name");
            None
        }
    }
}
