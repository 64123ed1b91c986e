//! Common test utilities for strata contract and scenario tests.
//!
//! This module provides:
//! - `ConfigDir`: an isolated config directory in a temp dir
//! - `run_strata`: run the CLI with a scrubbed environment
//! - Fixtures: reusable source documents

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
