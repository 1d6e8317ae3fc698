//! Operation: report packages declared with inconsistent constraints.

use std::path::Path;

use depsync_core::config::DepsyncConfig;
use depsync_core::workspace::Workspace;
use depsync_resolver::conflict::ConflictReport;
use depsync_util::errors::{DepsyncError, DepsyncResult};
use depsync_util::progress;

use crate::ReportFormat;

/// Options for `depsync audit`.
#[derive(Debug, Default)]
pub struct AuditOptions {
    pub format: ReportFormat,
    /// Fail when at least one conflict remains after ignores.
    pub fail_on_conflict: bool,
}

/// Build the conflict report for `workspace`, honouring `[audit] ignore`.
pub fn conflict_report(workspace: &Workspace, config: &DepsyncConfig) -> ConflictReport {
    ConflictReport::from_workspace(workspace).without(|package| config.is_audit_ignored(package))
}

/// Render a report in the requested format.
pub fn render(report: &ConflictReport, format: ReportFormat) -> DepsyncResult<String> {
    match format {
        ReportFormat::Human => Ok(report.to_string()),
        ReportFormat::Json => crate::to_json(report).map(|json| json + "\n"),
    }
}

/// Scan `root`, print the conflict report to stdout, and return it.
pub fn audit(root: &Path, opts: &AuditOptions) -> DepsyncResult<ConflictReport> {
    let (config, workspace) = crate::load_workspace(root)?;
    let report = conflict_report(&workspace, &config);

    print!("{}", render(&report, opts.format)?);

    if report.is_empty() {
        progress::status("Audit", "all projects agree on their dependency constraints");
        return Ok(report);
    }

    progress::status_warn(
        "Audit",
        &format!("{} package(s) with inconsistent constraints", report.len()),
    );
    if opts.fail_on_conflict {
        return Err(DepsyncError::Generic {
            message: format!(
                "Audit failed: {} package(s) declared with conflicting constraints",
                report.len()
            ),
        }
        .into());
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn monorepo() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        write(
            tmp.path(),
            "etl/pyproject.toml",
            "[project]\ndependencies = [\"pandas>=1.0.1\", \"numpy==1.26.0\"]\n",
        );
        write(
            tmp.path(),
            "api/pyproject.toml",
            "[project]\ndependencies = [\"pandas\", \"numpy==1.26.0\"]\n",
        );
        write(
            tmp.path(),
            "web/pyproject.toml",
            "[project]\ndependencies = [\"numpy<2\"]\n",
        );
        write(tmp.path(), "broken/pyproject.toml", "[project\n");
        tmp
    }

    #[test]
    fn reports_conflicts_despite_malformed_manifest() {
        let tmp = monorepo();
        let report = audit(tmp.path(), &AuditOptions::default()).unwrap();
        let pkgs: Vec<&str> = report.conflicts.iter().map(|c| c.package.as_str()).collect();
        // path order: api, broken (skipped), etl, web
        assert_eq!(pkgs, vec!["pandas", "numpy"]);
        let numpy = report.get("numpy").unwrap();
        assert_eq!(numpy.constraints[0].projects, vec!["api", "etl"]);
        assert_eq!(numpy.constraints[1].projects, vec!["web"]);
    }

    #[test]
    fn ignore_list_applies() {
        let tmp = monorepo();
        write(tmp.path(), "depsync.toml", "[audit]\nignore = [\"Pandas\"]\n");
        let report = audit(tmp.path(), &AuditOptions::default()).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.get("pandas").is_none());
    }

    #[test]
    fn fail_on_conflict_errors() {
        let tmp = monorepo();
        let opts = AuditOptions {
            fail_on_conflict: true,
            ..AuditOptions::default()
        };
        assert!(audit(tmp.path(), &opts).is_err());
    }

    #[test]
    fn rendering_is_idempotent() {
        let tmp = monorepo();
        let render_once = || {
            let (config, ws) = crate::load_workspace(tmp.path()).unwrap();
            let report = conflict_report(&ws, &config);
            (
                render(&report, ReportFormat::Human).unwrap(),
                render(&report, ReportFormat::Json).unwrap(),
            )
        };
        assert_eq!(render_once(), render_once());
    }

    #[test]
    fn json_shape() {
        let tmp = monorepo();
        let (config, ws) = crate::load_workspace(tmp.path()).unwrap();
        let json = render(&conflict_report(&ws, &config), ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["conflicts"][0]["package"], "pandas");
        assert_eq!(value["conflicts"][0]["constraints"][1]["constraint"], ">=1.0.1");
        assert_eq!(value["conflicts"][0]["constraints"][1]["projects"][0], "etl");
    }
}
