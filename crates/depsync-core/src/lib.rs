//! Core data types for depsync.
//!
//! This crate defines what depsync reads from a monorepo: `pyproject.toml`
//! manifests, the dependency declarations inside them, the optional
//! `depsync.toml` configuration, and the [`workspace::Workspace`] snapshot
//! that ties manifest discovery and extraction together.
//!
//! This crate performs file reads only; nothing here writes to disk or
//! spawns processes.

/// Manifest file name searched for when no configuration overrides it.
pub const DEFAULT_MANIFEST_NAME: &str = "pyproject.toml";

/// Configuration file looked up at the scan root.
pub const CONFIG_FILE_NAME: &str = "depsync.toml";

pub mod config;
pub mod dependency;
pub mod manifest;
pub mod workspace;
