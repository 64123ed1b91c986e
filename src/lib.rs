//! strata - layered configuration for applications
//!
//! Configuration is assembled from an ordered stack of sources (`default`,
//! per-environment, per-host, `local`, environment variables, overrides),
//! deep-merged into one tree, resolved, and frozen on first read.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::{Change, Config, LoadOptions};
pub use domain::entities::{ConfigSource, MODULE_DEFAULTS};
pub use domain::ports::{LoadedSources, SourceLoader};
pub use domain::services::{
    clone_deep, clone_node, diff_deep, equals_deep, extend_deep, has_deferred, is_object,
    make_immutable, make_immutable_keys, resolve_deferred, DEFAULT_MAX_DEPTH,
};
pub use domain::value_objects::{
    defer, Accessor, ConfigWarning, Deferred, KeyPath, List, Node, Pattern, Property, Value,
    WarningKind,
};
pub use error::{ConfigError, ConfigResult};
pub use infrastructure::loader::FsSourceLoader;
pub use infrastructure::parsers::Format;
