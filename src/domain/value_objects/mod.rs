//! Domain Value Objects
//!
//! The configuration value model and the small immutable types around it.

mod config_warning;
mod deferred;
mod key_path;
mod pattern;
mod value;

pub use config_warning::{ConfigWarning, WarningKind};
pub use deferred::{defer, Deferred};
pub use key_path::KeyPath;
pub use pattern::Pattern;
pub use value::{Accessor, List, Node, Property, Slot, Value};
