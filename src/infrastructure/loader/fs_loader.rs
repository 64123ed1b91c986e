//! File system SourceLoader implementation

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::env_overrides::{parse_override, substitute_env_vars, ARG_OVERRIDE_SOURCE, ENV_OVERRIDE_SOURCE};
use crate::config::LoadOptions;
use crate::domain::entities::ConfigSource;
use crate::domain::ports::{LoadedSources, SourceLoader};
use crate::domain::services::resolution_order;
use crate::domain::value_objects::{ConfigWarning, Node, WarningKind};
use crate::error::{ConfigError, ConfigResult};
use crate::infrastructure::parsers::{Format, EXTENSIONS};

/// Base name of the file mapping config paths to environment variables.
pub const CUSTOM_ENV_VARS_FILE: &str = "custom-environment-variables";

/// Loads sources from the configured directories, then the environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSourceLoader;

impl FsSourceLoader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceLoader for FsSourceLoader {
    fn load_sources(&self, options: &LoadOptions) -> ConfigResult<LoadedSources> {
        let mut loaded = LoadedSources::default();

        let files = locate_files(options);
        if files.is_empty() && !options.suppresses_no_config_warning() {
            let dirs: Vec<String> = options
                .config_dirs()
                .iter()
                .map(|d| d.display().to_string())
                .collect();
            let warning = ConfigWarning::new(
                WarningKind::NoConfigFiles,
                format!("no configurations found in configuration directory: {}", dirs.join(", ")),
            );
            tracing::warn!("{warning}");
            loaded.warnings.push(warning);
        }
        for path in files {
            loaded.sources.push(read_source(&path)?);
        }

        for dir in options.config_dirs() {
            for ext in EXTENSIONS {
                let path = dir.join(format!("{CUSTOM_ENV_VARS_FILE}.{ext}"));
                if !path.is_file() {
                    continue;
                }
                let mapping = read_source(&path)?;
                let parsed = substitute_env_vars(&mapping.parsed, options, &mut loaded.warnings);
                tracing::debug!(source = %path.display(), keys = parsed.len(), "mapped environment variables");
                loaded.sources.push(ConfigSource::new(mapping.name, parsed));
            }
        }

        let overrides = [
            (ENV_OVERRIDE_SOURCE, options.env_override()),
            (ARG_OVERRIDE_SOURCE, options.arg_override()),
        ];
        for (name, text) in overrides {
            let Some(text) = text else { continue };
            if let Some(node) = parse_override(name, text, &mut loaded.warnings) {
                loaded.sources.push(ConfigSource::new(name, node).with_original(text));
            }
        }

        Ok(loaded)
    }
}

/// Applicable files across all config dirs, in resolution order. Files of
/// equal rank keep the order of their directories.
fn locate_files(options: &LoadOptions) -> Vec<PathBuf> {
    let order = resolution_order(&options.discriminators(), &EXTENSIONS);
    let mut found: Vec<(usize, usize, PathBuf)> = Vec::new();

    for (dir_index, dir) in options.config_dirs().iter().enumerate() {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    tracing::warn!(dir = %dir.display(), error = %e, "cannot read config directory");
                }
                continue;
            }
        };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(&rank) = order.get(&name) {
                found.push((rank, dir_index, entry.path()));
            }
        }
    }

    found.sort_by_key(|(rank, dir_index, _)| (*rank, *dir_index));
    found.into_iter().map(|(_, _, path)| path).collect()
}

fn read_source(path: &Path) -> ConfigResult<ConfigSource> {
    let name = path.display().to_string();
    let format = Format::from_path(path)
        .ok_or_else(|| ConfigError::malformed(&name, "unsupported file extension"))?;
    let text = fs::read_to_string(path).map_err(|e| ConfigError::malformed(&name, e))?;
    let parsed: Node = format.parse(&name, &text)?;
    tracing::debug!(source = %name, keys = parsed.len(), "loaded config source");
    Ok(ConfigSource::new(name, parsed).with_original(text))
}
