//! Dependency extraction from `pyproject.toml`.
//!
//! Only two locations are read: `[project].dependencies` and every list in
//! `[project.optional-dependencies]`. Everything else in the file is ignored,
//! and wrongly typed values inside those locations are skipped rather than
//! treated as errors. Only a file that is not valid TOML is rejected.

use std::path::Path;

use depsync_util::errors::DepsyncError;

use crate::dependency::{Declaration, DeclarationGroup};

/// The dependency-relevant content of one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Declarations in file order: direct dependencies first, then each
    /// optional group in the order the groups appear.
    pub declarations: Vec<Declaration>,
}

impl Manifest {
    /// Read and parse a manifest from disk.
    pub fn from_path(path: &Path) -> Result<Self, DepsyncError> {
        let content = std::fs::read_to_string(path).map_err(|e| DepsyncError::Manifest {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content).map_err(|e| match e {
            DepsyncError::Manifest { message } => DepsyncError::Manifest {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    /// Parse manifest content.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, DepsyncError> {
        let doc: toml::Table = content.parse().map_err(|e| DepsyncError::Manifest {
            message: format!("invalid TOML: {e}"),
        })?;

        let Some(project) = doc.get("project").and_then(|p| p.as_table()) else {
            return Ok(Self::default());
        };

        let mut declarations = Vec::new();
        if let Some(deps) = project.get("dependencies") {
            collect_group(deps, &DeclarationGroup::Direct, &mut declarations);
        }
        if let Some(groups) = project
            .get("optional-dependencies")
            .and_then(|o| o.as_table())
        {
            for (group, deps) in groups {
                collect_group(
                    deps,
                    &DeclarationGroup::Optional(group.clone()),
                    &mut declarations,
                );
            }
        }

        Ok(Self { declarations })
    }
}

fn collect_group(value: &toml::Value, group: &DeclarationGroup, out: &mut Vec<Declaration>) {
    let Some(entries) = value.as_array() else {
        tracing::debug!("Ignoring {group}: expected a list of strings");
        return;
    };
    for entry in entries {
        match entry.as_str() {
            Some(raw) => out.push(Declaration::parse(raw, group.clone())),
            None => tracing::debug!("Ignoring non-string entry in {group}: {entry}"),
        }
    }
}
