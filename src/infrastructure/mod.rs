//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `parsers/` - JSON, TOML and YAML sources to configuration nodes
//! - `loader/` - Config directory discovery and environment sources

pub mod loader;
pub mod parsers;

// Re-export for convenience
pub use loader::FsSourceLoader;
pub use parsers::Format;
