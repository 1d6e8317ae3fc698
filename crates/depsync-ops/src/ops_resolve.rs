//! Operation: resolve a package against the rest of the monorepo.

use std::path::Path;

use depsync_core::dependency::split_declaration;
use depsync_core::workspace::Workspace;
use depsync_resolver::resolver::{self, Resolution};
use depsync_resolver::version::Constraint;
use depsync_util::errors::{DepsyncError, DepsyncResult};

use crate::ReportFormat;

/// A package request such as `pandas>=1.0.1`.
#[derive(Debug, Clone)]
pub struct PackageRequest {
    pub package: String,
    pub constraint: Constraint,
}

impl PackageRequest {
    /// Parse a command-line request, rejecting anything the declaration
    /// grammar would only accept through its lenient fallback.
    pub fn parse(spec: &str) -> Result<Self, DepsyncError> {
        let (package, constraint) = split_declaration(spec);
        let valid_name = !package.is_empty()
            && package
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid_name {
            return Err(DepsyncError::Generic {
                message: format!(
                    "Invalid package specification '{spec}'. Expected a name optionally followed by a constraint, e.g. pandas>=1.0"
                ),
            });
        }
        let parsed = Constraint::parse(&constraint);
        if !parsed.is_well_formed() {
            return Err(DepsyncError::InvalidConstraint {
                package,
                constraint,
            });
        }
        Ok(Self {
            package,
            constraint: parsed,
        })
    }
}

pub fn resolve_in(workspace: &Workspace, request: &PackageRequest) -> Resolution {
    resolver::resolve(workspace, &request.package, &request.constraint)
}

pub fn render(resolution: &Resolution, format: ReportFormat) -> DepsyncResult<String> {
    match format {
        ReportFormat::Human => Ok(resolution.to_string()),
        ReportFormat::Json => crate::to_json(resolution).map(|json| json + "\n"),
    }
}

/// Scan `root`, print the resolution report for `spec`, and return it.
pub fn resolve(root: &Path, spec: &str, format: ReportFormat) -> DepsyncResult<Resolution> {
    let request = PackageRequest::parse(spec)?;
    let (_config, workspace) = crate::load_workspace(root)?;
    let resolution = resolve_in(&workspace, &request);
    print!("{}", render(&resolution, format)?);
    Ok(resolution)
}
