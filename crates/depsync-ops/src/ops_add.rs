//! Operation: add a dependency to one project at a version consistent with
//! the rest of the monorepo.

use std::path::{Path, PathBuf};

use depsync_core::config::DepsyncConfig;
use depsync_resolver::resolver::{Outcome, Resolution};
use depsync_util::errors::{DepsyncError, DepsyncResult};
use depsync_util::progress;

use crate::executor::{AddRequest, CommandPackageManager, PackageManager};
use crate::ops_resolve::{self, PackageRequest};

/// Options for `depsync add`.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Package, optionally with a constraint: `pandas>=1.0.1`.
    pub spec: String,
    /// Project receiving the dependency.
    pub project_dir: PathBuf,
    pub group: Option<String>,
    pub optional: Option<String>,
    /// Print the package-manager command instead of running it.
    pub dry_run: bool,
}

/// What `add` decided to hand to the package manager.
#[derive(Debug, Clone)]
pub struct AddPlan {
    pub resolution: Resolution,
    pub request: AddRequest,
    pub command: String,
}

/// Decide the requirement to add from a resolution.
///
/// A resolved version is pinned exactly; a package with no precedent keeps
/// the user's constraint. Unsatisfiable resolutions are an error for the
/// caller to act on.
pub fn requirement_for(
    request: &PackageRequest,
    resolution: &Resolution,
) -> Result<String, DepsyncError> {
    match &resolution.outcome {
        Outcome::Resolved(version) => Ok(format!("{}=={version}", request.package)),
        Outcome::NotFound => Ok(format!("{}{}", request.package, request.constraint)),
        Outcome::Unsatisfiable => Err(DepsyncError::Unsatisfiable {
            package: request.package.clone(),
            constraint: request.constraint.to_string(),
            found: resolution.found_summary(),
        }),
    }
}

/// Resolve `opts.spec` across `root` and add it with the configured
/// package manager.
pub fn add(root: &Path, opts: &AddOptions) -> DepsyncResult<AddPlan> {
    let config = DepsyncConfig::load(root)?;
    let manager = CommandPackageManager::from_config(&config.sync);
    add_with(root, opts, &manager)
}

/// Like [`add`], with an explicit package manager.
pub fn add_with(
    root: &Path,
    opts: &AddOptions,
    manager: &dyn PackageManager,
) -> DepsyncResult<AddPlan> {
    let request = PackageRequest::parse(&opts.spec)?;
    let (_config, workspace) = crate::load_workspace(root)?;
    let resolution = ops_resolve::resolve_in(&workspace, &request);

    match &resolution.outcome {
        Outcome::Resolved(version) => {
            let found: Vec<String> = resolution
                .found
                .iter()
                .map(|c| c.version.to_string())
                .collect();
            progress::status_info("Found", &format!("versions {}", found.join(", ")));
            progress::status("Resolved", &format!("{} {version}", request.package));
        }
        Outcome::NotFound => progress::status_info(
            "New",
            &format!(
                "no existing versions of {} found; adding as requested",
                request.package
            ),
        ),
        Outcome::Unsatisfiable => {}
    }

    let requirement = requirement_for(&request, &resolution)?;
    let add_request = AddRequest {
        package: request.package.clone(),
        requirement,
        project_dir: opts.project_dir.clone(),
        group: opts.group.clone(),
        optional: opts.optional.clone(),
    };
    let command = manager.describe(&add_request);
    let plan = AddPlan {
        resolution,
        request: add_request,
        command,
    };

    if opts.dry_run {
        progress::status_info("Dry run", &plan.command);
        println!("{}", plan.command);
        return Ok(plan);
    }

    progress::status("Running", &plan.command);
    let outcome = manager.add(&plan.request)?;
    print!("{}", outcome.stdout);
    if !outcome.success {
        let status = outcome
            .code
            .map(|c| format!("exit code {c}"))
            .unwrap_or_else(|| "terminated by signal".to_string());
        return Err(DepsyncError::Sync {
            message: format!("`{}` failed with {status}\n{}", plan.command, outcome.stderr),
        }
        .into());
    }
    eprint!("{}", outcome.stderr);
    progress::status("Added", &plan.request.requirement);
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::executor::SyncOutcome;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<AddRequest>>,
        fail: bool,
    }

    impl PackageManager for Recorder {
        fn describe(&self, request: &AddRequest) -> String {
            format!("fake add {}", request.requirement)
        }

        fn add(&self, request: &AddRequest) -> Result<SyncOutcome, DepsyncError> {
            self.calls.borrow_mut().push(request.clone());
            Ok(SyncOutcome {
                success: !self.fail,
                code: Some(if self.fail { 2 } else { 0 }),
                stdout: String::new(),
                stderr: if self.fail { "error: no such index".to_string() } else { String::new() },
            })
        }
    }

    fn monorepo() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        for (name, dep) in [("a", "p==1.0.0"), ("b", "p>=1.2.0"), ("c", "p==2.0.0")] {
            let dir = tmp.path().join(name);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(
                dir.join("pyproject.toml"),
                format!("[project]\ndependencies = [\"{dep}\"]\n"),
            )
            .unwrap();
        }
        tmp
    }

    fn opts(spec: &str, dir: &Path) -> AddOptions {
        AddOptions {
            spec: spec.to_string(),
            project_dir: dir.to_path_buf(),
            group: Some("dev".to_string()),
            optional: None,
            dry_run: false,
        }
    }

    #[test]
    fn pins_resolved_version() {
        let tmp = monorepo();
        let rec = Recorder::default();
        let plan = add_with(tmp.path(), &opts("p<2.0.0", &tmp.path().join("a")), &rec).unwrap();
        assert_eq!(plan.request.requirement, "p==1.2.0");
        let calls = rec.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].group.as_deref(), Some("dev"));
        assert!(calls[0].project_dir.ends_with("a"));
    }

    #[test]
    fn fresh_package_keeps_user_constraint() {
        let tmp = monorepo();
        let rec = Recorder::default();
        let plan = add_with(tmp.path(), &opts("Q>=0.3", tmp.path()), &rec).unwrap();
        assert_eq!(plan.request.requirement, "q>=0.3");
        let plan = add_with(tmp.path(), &opts("r", tmp.path()), &rec).unwrap();
        assert_eq!(plan.request.requirement, "r");
    }

    #[test]
    fn unsatisfiable_does_not_call_manager() {
        let tmp = monorepo();
        let rec = Recorder::default();
        let err = add_with(tmp.path(), &opts("p>=3.0.0", tmp.path()), &rec).unwrap_err();
        assert!(err.to_string().contains("none satisfy '>=3.0.0'"), "{err}");
        assert!(rec.calls.borrow().is_empty());
    }

    #[test]
    fn dry_run_does_not_call_manager() {
        let tmp = monorepo();
        let rec = Recorder::default();
        let mut o = opts("p", tmp.path());
        o.dry_run = true;
        let plan = add_with(tmp.path(), &o, &rec).unwrap();
        assert_eq!(plan.command, "fake add p==2.0.0");
        assert!(rec.calls.borrow().is_empty());
    }

    #[test]
    fn manager_failure_is_surfaced() {
        let tmp = monorepo();
        let rec = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let err = add_with(tmp.path(), &opts("p", tmp.path()), &rec).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("exit code 2"), "{msg}");
        assert!(msg.contains("error: no such index"), "{msg}");
    }
}
