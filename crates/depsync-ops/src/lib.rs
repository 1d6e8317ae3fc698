//! High-level operations behind the `depsync` commands.

pub mod executor;
pub mod ops_add;
pub mod ops_audit;
pub mod ops_resolve;

use std::path::Path;

use depsync_core::config::DepsyncConfig;
use depsync_core::workspace::Workspace;
use depsync_util::errors::{DepsyncError, DepsyncResult};
use depsync_util::progress;

/// How a report is rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Human,
    Json,
}

/// Load `depsync.toml` and scan every manifest under `root`.
pub fn load_workspace(root: &Path) -> DepsyncResult<(DepsyncConfig, Workspace)> {
    let config = DepsyncConfig::load(root)?;
    let workspace = Workspace::load(root, &config)?;
    progress::status(
        "Scanning",
        &format!(
            "{} manifests under {}",
            workspace.manifest_count(),
            workspace.root.display()
        ),
    );
    if !workspace.skipped.is_empty() {
        progress::status_warn(
            "Skipped",
            &format!(
                "{} manifest(s) that could not be parsed",
                workspace.skipped.len()
            ),
        );
    }
    Ok((config, workspace))
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> DepsyncResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        DepsyncError::Generic {
            message: format!("Failed to serialize report: {e}"),
        }
        .into()
    })
}
