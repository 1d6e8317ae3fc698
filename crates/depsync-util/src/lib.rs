//! Shared utilities for depsync.
//!
//! This crate provides cross-cutting concerns used by all other depsync crates:
//! error types, manifest discovery, insertion-ordered maps, process spawning,
//! and terminal status lines.

pub mod errors;
pub mod fs;
pub mod ordered;
pub mod process;
pub mod progress;
