//! Isolated configuration directories and CLI runner.

use std::path::Path;
use std::process::Command;

use strata::{Config, ConfigResult, LoadOptions};
use tempfile::TempDir;

/// Variables the loader reads; removed from every CLI run.
const LOADER_VARS: &[&str] = &[
    "STRATA_CONFIG_DIR",
    "STRATA_ENV",
    "APP_ENV",
    "STRATA_APP_INSTANCE",
    "STRATA_STRICT_MODE",
    "STRATA_ALLOW_MUTATIONS",
    "STRATA_SUPPRESS_NO_CONFIG_WARNING",
    "STRATA_CONFIG",
    "HOST",
    "HOSTNAME",
];

/// A temporary config directory.
pub struct ConfigDir {
    dir: TempDir,
}

impl ConfigDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Add a file and return self, for chaining.
    pub fn with_file(self, name: &str, body: &str) -> Self {
        self.write(name, body);
        self
    }

    pub fn write(&self, name: &str, body: &str) {
        std::fs::write(self.dir.path().join(name), body).unwrap();
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Options pointing at this directory and nothing else from the process.
    pub fn options(&self) -> LoadOptions {
        LoadOptions::new().with_config_dir(self.path())
    }

    pub fn load(&self, options: LoadOptions) -> ConfigResult<Config> {
        Config::load(options)
    }
}

/// Result of running the strata CLI
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Run the strata binary against `dir` with only `env_vars` from the loader's
/// variables set.
pub fn run_strata(dir: &ConfigDir, args: &[&str], env_vars: &[(&str, &str)]) -> CliResult {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_strata"));
    cmd.current_dir(dir.path())
        .arg("--config-dir")
        .arg(dir.path())
        .args(args)
        .env("RUST_LOG", "warn");
    for var in LOADER_VARS {
        cmd.env_remove(var);
    }
    for (key, value) in env_vars {
        cmd.env(key, value);
    }

    let output = cmd.output().expect("Failed to execute strata");
    CliResult {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
