//! Domain Layer
//!
//! The configuration value model and the pure algorithms over it.
//!
//! ## Structure
//!
//! - `entities/` - Sources and the source log
//! - `value_objects/` - Value model (Value, Node, List, Deferred, Pattern)
//! - `services/` - Merge, clone, equality, diff, resolution, freezing, precedence
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system or environment directly
//! 2. **Pure Functions** - Services are stateless and testable
//! 3. **Ports & Adapters** - Source discovery goes through the `SourceLoader` port

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
