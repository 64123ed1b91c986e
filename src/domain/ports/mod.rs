//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod source_loader;

pub use source_loader::{LoadedSources, SourceLoader};
