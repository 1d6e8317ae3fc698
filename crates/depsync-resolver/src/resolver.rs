//! Max-satisfying version resolution across a monorepo.
//!
//! Every declaration of the target package, in any project and any group,
//! contributes the version literal of its constraint as a candidate. The
//! highest candidate satisfying the requested constraint wins, so adding the
//! package to one project reuses a version the rest of the repo already
//! declares.

use std::fmt;

use depsync_core::dependency::DeclarationGroup;
use depsync_core::workspace::Workspace;
use serde::Serialize;

use crate::version::{version_literal, Constraint, ReleaseVersion, Version};

/// Where a declaration of the target package was seen.
#[derive(Debug, Clone, Serialize)]
pub struct Sighting {
    pub project: String,
    pub group: DeclarationGroup,
    /// Verbatim constraint; empty when unconstrained.
    pub constraint: String,
}

/// A parsable candidate and the project it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    pub version: ReleaseVersion,
    /// The version as written in the manifest, e.g. `1.02`.
    pub literal: String,
    pub project: String,
}

/// The three mutually exclusive resolution states.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "version", rename_all = "kebab-case")]
pub enum Outcome {
    /// The highest declared version satisfying the request.
    Resolved(ReleaseVersion),
    /// Versions are declared elsewhere but none satisfy the request.
    Unsatisfiable,
    /// No project declares a version of the package.
    NotFound,
}

/// Everything learned while resolving one package.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub package: String,
    /// Requested constraint text; empty when unconstrained.
    pub requested: String,
    pub sightings: Vec<Sighting>,
    /// Version literals found in declarations, parsable or not.
    pub literals: Vec<String>,
    /// Parsable candidates in traversal order.
    pub found: Vec<Candidate>,
    /// Candidates satisfying the request, in traversal order.
    pub satisfying: Vec<Candidate>,
    pub outcome: Outcome,
}

impl Resolution {
    pub fn resolved(&self) -> Option<&ReleaseVersion> {
        match &self.outcome {
            Outcome::Resolved(v) => Some(v),
            _ => None,
        }
    }

    /// Comma-separated literals for messages, duplicates removed.
    pub fn found_summary(&self) -> String {
        let mut seen: Vec<&str> = Vec::new();
        for literal in &self.literals {
            if !seen.contains(&literal.as_str()) {
                seen.push(literal);
            }
        }
        seen.join(", ")
    }
}

/// Resolve `package` against every declaration in `workspace`.
///
/// Traversal order is manifest path order, then declaration order within a
/// manifest. On equal maxima the first candidate in that order is kept.
pub fn resolve(workspace: &Workspace, package: &str, requested: &Constraint) -> Resolution {
    let target = package.trim().to_lowercase();
    let mut sightings = Vec::new();
    let mut literals = Vec::new();
    let mut found = Vec::new();

    for (project, decl) in workspace.declarations() {
        if !decl.is_package(&target) {
            continue;
        }
        sightings.push(Sighting {
            project: project.project.clone(),
            group: decl.group.clone(),
            constraint: decl.constraint.clone(),
        });
        let Some(literal) = version_literal(&decl.constraint) else {
            continue;
        };
        literals.push(literal.to_string());
        match Version::parse(literal) {
            Version::Release(version) => found.push(Candidate {
                version,
                literal: literal.to_string(),
                project: project.project.clone(),
            }),
            Version::Unparsable(text) => {
                tracing::debug!(
                    "{}: ignoring unparsable version '{text}' for {target}",
                    project.path.display()
                );
            }
        }
    }

    let satisfying: Vec<Candidate> = found
        .iter()
        .filter(|c| requested.matches_declared(&c.version, &c.literal))
        .cloned()
        .collect();

    let outcome = match max_first(&satisfying) {
        Some(best) => Outcome::Resolved(best.version.clone()),
        None if literals.is_empty() => Outcome::NotFound,
        None => Outcome::Unsatisfiable,
    };

    Resolution {
        package: target,
        requested: requested.as_str().to_string(),
        sightings,
        literals,
        found,
        satisfying,
        outcome,
    }
}

/// Maximum by version; the earliest wins among equals.
fn max_first(candidates: &[Candidate]) -> Option<&Candidate> {
    candidates.iter().fold(None, |best, c| match best {
        Some(b) if c.version <= b.version => Some(b),
        _ => Some(c),
    })
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let request = if self.requested.is_empty() {
            self.package.clone()
        } else {
            format!("{}{}", self.package, self.requested)
        };
        writeln!(f, "Resolution for {request}:")?;
        if !self.sightings.is_empty() {
            writeln!(f, "  Declared in:")?;
            for s in &self.sightings {
                let constraint = if s.constraint.is_empty() {
                    crate::conflict::UNCONSTRAINED_LABEL
                } else {
                    s.constraint.as_str()
                };
                writeln!(f, "    {} ({}): {constraint}", s.project, s.group)?;
            }
        }
        match &self.outcome {
            Outcome::Resolved(v) => {
                let found: Vec<String> = self.found.iter().map(|c| c.version.to_string()).collect();
                writeln!(f, "  Found versions: {}", found.join(", "))?;
                writeln!(f, "  Using latest matching version: {v}")
            }
            Outcome::Unsatisfiable => {
                writeln!(
                    f,
                    "  Found versions ({}) in other projects, but none satisfy '{}'.",
                    self.found_summary(),
                    self.requested
                )?;
                writeln!(
                    f,
                    "  Consider updating other projects, relaxing your constraint, or adding it manually."
                )
            }
            Outcome::NotFound => writeln!(
                f,
                "  No existing versions of {} found; it will be added as requested.",
                self.package
            ),
        }
    }
}
