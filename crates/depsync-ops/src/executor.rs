//! The package-manager collaborator used by `depsync add`.

use std::path::PathBuf;

use depsync_core::config::SyncConfig;
use depsync_util::errors::DepsyncError;
use depsync_util::process::{Captured, CommandBuilder};

/// What to add, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub package: String,
    /// Requirement handed to the package manager, e.g. `pandas==1.2.0`.
    pub requirement: String,
    pub project_dir: PathBuf,
    /// Dependency group (`--group`).
    pub group: Option<String>,
    /// Optional-dependency extra (`--optional`).
    pub optional: Option<String>,
}

/// How the package manager finished.
pub type SyncOutcome = Captured;

/// Something that can add a dependency to a project.
pub trait PackageManager {
    /// Human-readable command line for `request`, used by dry runs and logs.
    fn describe(&self, request: &AddRequest) -> String;

    /// Perform the addition. An `Err` means the manager could not be run at
    /// all; a manager that ran and failed reports `success: false`.
    fn add(&self, request: &AddRequest) -> Result<SyncOutcome, DepsyncError>;
}

/// Runs an external program such as `uv add`.
#[derive(Debug, Clone)]
pub struct CommandPackageManager {
    program: String,
    args: Vec<String>,
}

impl CommandPackageManager {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(config.program.clone(), config.args.clone())
    }

    fn command(&self, request: &AddRequest) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.program).args(self.args.iter().cloned());
        if let Some(ref group) = request.group {
            cmd = cmd.args(["--group", group.as_str()]);
        }
        if let Some(ref extra) = request.optional {
            cmd = cmd.args(["--optional", extra.as_str()]);
        }
        cmd.arg(&request.requirement).cwd(&request.project_dir)
    }
}

impl PackageManager for CommandPackageManager {
    fn describe(&self, request: &AddRequest) -> String {
        self.command(request).display()
    }

    fn add(&self, request: &AddRequest) -> Result<SyncOutcome, DepsyncError> {
        let cmd = self.command(request);
        tracing::info!(
            "Running {} in {}",
            cmd.display(),
            request.project_dir.display()
        );
        cmd.capture().map_err(|e| DepsyncError::Sync {
            message: format!("could not run `{}`: {e}", self.program),
        })
    }
}
