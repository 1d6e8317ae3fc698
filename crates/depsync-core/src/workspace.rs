//! A snapshot of every project manifest under a monorepo root.

use std::path::{Path, PathBuf};

use depsync_util::errors::DepsyncError;

use crate::config::DepsyncConfig;
use crate::dependency::Declaration;
use crate::manifest::Manifest;

/// One discovered manifest and the project it belongs to.
#[derive(Debug, Clone)]
pub struct ProjectManifest {
    pub path: PathBuf,
    /// Name of the directory containing the manifest; a reporting label only.
    pub project: String,
    pub manifest: Manifest,
}

impl ProjectManifest {
    pub fn declarations(&self) -> &[Declaration] {
        &self.manifest.declarations
    }
}

/// A manifest that was found but could not be used.
#[derive(Debug, Clone)]
pub struct SkippedManifest {
    pub path: PathBuf,
    pub reason: String,
}

/// All usable manifests below a root, in path order.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root: PathBuf,
    pub projects: Vec<ProjectManifest>,
    pub skipped: Vec<SkippedManifest>,
}

impl Workspace {
    /// Discover and parse every manifest below `root`.
    ///
    /// Fails only when `root` itself is inaccessible. Manifests that cannot be
    /// read or parsed are logged, recorded in [`Workspace::skipped`], and left
    /// out of [`Workspace::projects`].
    pub fn load(root: &Path, config: &DepsyncConfig) -> Result<Self, DepsyncError> {
        let root = root
            .canonicalize()
            .map_err(|e| DepsyncError::RootUnreadable {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
        let paths = depsync_util::fs::find_manifests(&root, &config.manifest, &config.exclude)?;
        tracing::debug!("Found {} manifests under {}", paths.len(), root.display());

        let mut projects = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for path in paths {
            match Manifest::from_path(&path) {
                Ok(manifest) => {
                    tracing::debug!(
                        "{}: {} declarations",
                        path.display(),
                        manifest.declarations.len()
                    );
                    projects.push(ProjectManifest {
                        project: depsync_util::fs::parent_dir_name(&path),
                        path,
                        manifest,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {e}", path.display());
                    skipped.push(SkippedManifest {
                        path,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            root,
            projects,
            skipped,
        })
    }

    /// Every declaration in traversal order, paired with its project.
    pub fn declarations(&self) -> impl Iterator<Item = (&ProjectManifest, &Declaration)> {
        self.projects
            .iter()
            .flat_map(|p| p.declarations().iter().map(move |d| (p, d)))
    }

    pub fn manifest_count(&self) -> usize {
        self.projects.len() + self.skipped.len()
    }
}
