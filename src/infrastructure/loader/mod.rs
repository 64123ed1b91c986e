//! Source loading
//!
//! - `fs_loader` - config directory discovery and parsing
//! - `env_overrides` - custom environment variables and JSON overrides

mod env_overrides;
mod fs_loader;

pub use env_overrides::{parse_override, substitute_env_vars, ARG_OVERRIDE_SOURCE, ENV_OVERRIDE_SOURCE};
pub use fs_loader::{FsSourceLoader, CUSTOM_ENV_VARS_FILE};
