//! Command dispatch and handler modules.

mod add;
mod audit;
mod resolve;

use std::path::{Path, PathBuf};

use miette::Result;

use depsync_core::CONFIG_FILE_NAME;
use depsync_util::errors::DepsyncError;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().map_err(DepsyncError::Io)?;
    let root = scan_root(cli.root.as_deref(), &cwd);
    tracing::debug!("Scan root: {}", root.display());

    match cli.command {
        Command::Audit {
            format,
            fail_on_conflict,
        } => audit::exec(&root, format.into(), fail_on_conflict),
        Command::Resolve { spec, format } => resolve::exec(&root, &spec, format.into()),
        Command::Add {
            spec,
            group,
            optional,
            project,
            dry_run,
        } => add::exec(&root, &cwd, spec, group, optional, project, dry_run),
    }
}

/// `--root`/`DEPSYNC_ROOT`, else the nearest ancestor holding `depsync.toml`,
/// else the current directory.
fn scan_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(root) = explicit {
        return cwd.join(root);
    }
    depsync_util::fs::find_ancestor_with(cwd, CONFIG_FILE_NAME).unwrap_or_else(|| cwd.to_path_buf())
}
