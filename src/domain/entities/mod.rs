//! Domain Entities
//!
//! - `ConfigSource` - one parsed origin of configuration data
//! - `SourceLog` - every source that contributed, in application order

mod config_source;

pub use config_source::{ConfigSource, SourceLog, MODULE_DEFAULTS};
