use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all depsync operations.
#[derive(Debug, Error, Diagnostic)]
pub enum DepsyncError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scan root does not exist or cannot be listed.
    #[error("Cannot scan {}: {reason}", path.display())]
    #[diagnostic(help("Pass an existing directory with --root or DEPSYNC_ROOT"))]
    RootUnreadable { path: PathBuf, reason: String },

    /// Invalid or malformed manifest (e.g. pyproject.toml).
    #[error("Manifest error: {message}")]
    #[diagnostic(help("Check the manifest for TOML syntax errors"))]
    Manifest { message: String },

    /// `depsync.toml` exists but could not be loaded.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Fix or remove depsync.toml at the scan root"))]
    Config { message: String },

    /// A version constraint given on the command line does not parse.
    #[error("Invalid version constraint '{constraint}' for {package}")]
    #[diagnostic(help("Use comma-separated comparators such as '>=1.2,<2'"))]
    InvalidConstraint { package: String, constraint: String },

    /// Other projects declare the package, but never at a satisfying version.
    #[error("Found versions of {package} in other projects ({found}), but none satisfy '{constraint}'")]
    #[diagnostic(help(
        "Relax the constraint, update the other projects, or add the dependency manually"
    ))]
    Unsatisfiable {
        package: String,
        constraint: String,
        found: String,
    },

    /// The external package manager failed or could not be started.
    #[error("Package manager failed: {message}")]
    Sync { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}

/// Convenience alias for `miette::Result<T>`.
pub type DepsyncResult<T> = miette::Result<T>;
