//! Configuration facade for strata
//!
//! Source precedence (lowest first):
//! 1. `default` files
//! 2. Environment files (`STRATA_ENV`)
//! 3. Host name files
//! 4. `local` files
//! 5. Custom environment variables
//! 6. `STRATA_CONFIG` environment variable
//! 7. `--STRATA_CONFIG` argument (highest priority)
//!
//! Module defaults sit underneath all of these and never replace a value.

mod env_validator;
mod facade;
mod options;
mod watch;

pub use crate::domain::value_objects::{ConfigWarning, WarningKind};
pub use env_validator::{levenshtein, parse_flag, EnvVarValidator, FLAG_VALUES};
pub use facade::Config;
pub use options::{
    LoadOptions, ALLOW_MUTATIONS_VAR, CONFIG_DIR_VAR, ENV_VAR, FALLBACK_ENV_VAR, INSTANCE_VAR,
    OVERRIDE_VAR, STRICT_MODE_VAR, SUPPRESS_NO_CONFIG_WARNING_VAR,
};
pub use watch::{Change, Updates, MAX_DISPATCH_ROUNDS};
