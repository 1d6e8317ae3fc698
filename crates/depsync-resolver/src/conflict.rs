//! Detection of packages declared with differing constraints across projects.
//!
//! Constraints are grouped by their exact text. `>=1.0` and `>=1.0.0` are
//! reported as different on purpose: the report exists to surface textual
//! drift for a human to reconcile.

use std::fmt;

use depsync_core::workspace::Workspace;
use depsync_util::ordered::OrderedMap;
use serde::Serialize;

/// Label printed in place of an empty constraint.
pub const UNCONSTRAINED_LABEL: &str = "(no version constraint)";

/// All packages whose declarations disagree, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<PackageConflict>,
}

/// One package and every distinct constraint it is declared with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageConflict {
    pub package: String,
    pub constraints: Vec<ConstraintUsage>,
}

/// A constraint string and the projects declaring it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintUsage {
    /// Verbatim constraint; empty when unconstrained.
    pub constraint: String,
    /// Project names, deduplicated, in first-seen order.
    pub projects: Vec<String>,
}

impl ConstraintUsage {
    pub fn label(&self) -> &str {
        if self.constraint.is_empty() {
            UNCONSTRAINED_LABEL
        } else {
            &self.constraint
        }
    }
}

/// Accumulates package → constraint → projects over any number of manifests.
#[derive(Debug, Default)]
pub struct ConflictAggregator {
    packages: OrderedMap<String, OrderedMap<String, Vec<String>>>,
}

impl ConflictAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `project` declares `package` with `constraint`.
    pub fn record(&mut self, package: &str, constraint: &str, project: &str) {
        let projects = self
            .packages
            .entry_or_insert_with(package.to_string(), OrderedMap::new)
            .entry_or_insert_with(constraint.to_string(), Vec::new);
        if !projects.iter().any(|p| p == project) {
            projects.push(project.to_string());
        }
    }

    /// Record every declaration of every project, in traversal order.
    pub fn record_workspace(&mut self, workspace: &Workspace) {
        for (project, decl) in workspace.declarations() {
            self.record(&decl.package, &decl.constraint, &project.project);
        }
    }

    /// Packages with more than one distinct constraint string.
    pub fn into_report(self) -> ConflictReport {
        let conflicts = self
            .packages
            .into_entries()
            .into_iter()
            .filter(|(_, constraints)| constraints.len() > 1)
            .map(|(package, constraints)| PackageConflict {
                package,
                constraints: constraints
                    .into_entries()
                    .into_iter()
                    .map(|(constraint, projects)| ConstraintUsage {
                        constraint,
                        projects,
                    })
                    .collect(),
            })
            .collect();
        ConflictReport { conflicts }
    }
}

impl ConflictReport {
    /// Build the report for a whole workspace.
    pub fn from_workspace(workspace: &Workspace) -> Self {
        let mut aggregator = ConflictAggregator::new();
        aggregator.record_workspace(workspace);
        aggregator.into_report()
    }

    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.conflicts.len()
    }

    pub fn get(&self, package: &str) -> Option<&PackageConflict> {
        self.conflicts.iter().find(|c| c.package == package)
    }

    /// Drop packages for which `ignored` returns true.
    pub fn without(mut self, ignored: impl Fn(&str) -> bool) -> Self {
        self.conflicts.retain(|c| !ignored(&c.package));
        self
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conflicts.is_empty() {
            return writeln!(f, "No version conflicts.");
        }
        writeln!(f, "Version conflicts ({}):", self.conflicts.len())?;
        for c in &self.conflicts {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for PackageConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Package '{}' is declared with multiple versions/constraints:",
            self.package
        )?;
        for usage in &self.constraints {
            writeln!(f, "  {}: {}", usage.label(), usage.projects.join(", "))?;
        }
        Ok(())
    }
}
