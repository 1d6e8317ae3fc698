//! Version parsing, comparison, and constraint matching.
//!
//! Versions are dotted runs of unsigned integers (`1`, `1.2`, `2024.10.3`),
//! optionally prefixed with `v`. Ordering compares component by component
//! with missing trailing components treated as zero:
//! - `1.9.0` < `1.10.0` (numeric, not lexicographic)
//! - `1.0` == `1.0.0`
//!
//! Anything else (`1.0rc1`, `latest`, `1.*`) parses to
//! [`Version::Unparsable`], which compares with nothing and never satisfies
//! a constraint.

use std::cmp::Ordering;
use std::fmt;

use depsync_core::dependency::COMPARATOR_CHARS;
use serde::{Serialize, Serializer};

/// A parsed release version: non-empty tuple of numeric components.
#[derive(Debug, Clone)]
pub struct ReleaseVersion {
    components: Vec<u64>,
}

impl ReleaseVersion {
    /// Parse a bare dotted-numeric version; `None` if it is not one.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let text = text
            .strip_prefix('v')
            .or_else(|| text.strip_prefix('V'))
            .unwrap_or(text);
        if text.is_empty() {
            return None;
        }
        let components = text
            .split('.')
            .map(|part| {
                if !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) {
                    part.parse::<u64>().ok()
                } else {
                    None
                }
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { components })
    }

    pub fn components(&self) -> &[u64] {
        &self.components
    }

    fn component(&self, i: usize) -> u64 {
        self.components.get(i).copied().unwrap_or(0)
    }

    /// Whether the first `prefix.len()` components equal `prefix`, zero padded.
    fn has_prefix(&self, prefix: &[u64]) -> bool {
        prefix.iter().enumerate().all(|(i, &c)| self.component(i) == c)
    }

    /// Exclusive upper bound for a caret requirement: bump the first
    /// non-zero component (or the last one if all are zero).
    fn caret_upper(&self) -> Self {
        let pivot = self
            .components
            .iter()
            .position(|&c| c != 0)
            .unwrap_or(self.components.len().saturating_sub(1));
        self.bumped(pivot)
    }

    /// Exclusive upper bound for a tilde requirement: bump the minor
    /// component, or the major when only one component is given.
    fn tilde_upper(&self) -> Self {
        self.bumped(if self.components.len() >= 2 { 1 } else { 0 })
    }

    fn bumped(&self, pivot: usize) -> Self {
        let mut components: Vec<u64> = (0..pivot).map(|i| self.component(i)).collect();
        components.push(self.component(pivot).saturating_add(1));
        Self { components }
    }
}

impl PartialEq for ReleaseVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ReleaseVersion {}

impl Ord for ReleaseVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        (0..len)
            .map(|i| self.component(i).cmp(&other.component(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for ReleaseVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for c in &self.components {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{c}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ReleaseVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A version literal that may or may not have parsed.
#[derive(Debug, Clone)]
pub enum Version {
    Release(ReleaseVersion),
    /// Kept verbatim for diagnostics.
    Unparsable(String),
}

impl Version {
    /// Parse a version literal, ignoring any leading comparator symbols.
    pub fn parse(literal: &str) -> Self {
        let stripped = literal.trim().trim_start_matches(COMPARATOR_CHARS);
        match ReleaseVersion::parse(stripped) {
            Some(v) => Version::Release(v),
            None => Version::Unparsable(literal.to_string()),
        }
    }

    pub fn as_release(&self) -> Option<&ReleaseVersion> {
        match self {
            Version::Release(v) => Some(v),
            Version::Unparsable(_) => None,
        }
    }

    pub fn is_parsable(&self) -> bool {
        self.as_release().is_some()
    }
}

impl PartialEq for Version {
    /// Unparsable values are equal to nothing, themselves included.
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Version::Release(a), Version::Release(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Version::Release(v) => v.fmt(f),
            Version::Unparsable(s) => f.write_str(s),
        }
    }
}

/// Comparison operator of a single constraint clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Ne,
    Ge,
    Le,
    Gt,
    Lt,
    /// `~=`: compatible release.
    Compatible,
    /// `^`: same left-most non-zero component.
    Caret,
    /// `~`: same minor series.
    Tilde,
    /// `===`: exact text match.
    Arbitrary,
}

impl Op {
    /// Longest-first so `===` wins over `==` and `~=` over `~`.
    const TOKENS: &'static [(&'static str, Op)] = &[
        ("===", Op::Arbitrary),
        ("==", Op::Eq),
        ("!=", Op::Ne),
        ("~=", Op::Compatible),
        (">=", Op::Ge),
        ("<=", Op::Le),
        (">", Op::Gt),
        ("<", Op::Lt),
        ("^", Op::Caret),
        ("~", Op::Tilde),
        ("=", Op::Eq),
    ];

    fn split(clause: &str) -> (Op, &str) {
        Self::TOKENS
            .iter()
            .find_map(|&(token, op)| clause.strip_prefix(token).map(|rest| (op, rest)))
            .unwrap_or((Op::Eq, clause))
    }
}

/// Right-hand side of a comparator.
#[derive(Debug, Clone)]
enum Target {
    Version(Version),
    /// `==1.2.*` / `!=1.2.*`
    Prefix(ReleaseVersion),
    /// `===text`
    Text(String),
}

/// One `<op><version>` clause.
#[derive(Debug, Clone)]
pub struct Comparator {
    pub op: Op,
    target: Target,
    text: String,
}

impl Comparator {
    pub fn parse(clause: &str) -> Self {
        let clause = clause.trim();
        let (op, rest) = Op::split(clause);
        let rest = rest.trim();
        let target = match op {
            Op::Arbitrary => Target::Text(rest.to_string()),
            Op::Eq | Op::Ne if rest.ends_with(".*") => {
                match ReleaseVersion::parse(&rest[..rest.len() - 2]) {
                    Some(prefix) => Target::Prefix(prefix),
                    None => Target::Version(Version::Unparsable(rest.to_string())),
                }
            }
            _ => Target::Version(Version::parse(rest)),
        };
        Self {
            op,
            target,
            text: clause.to_string(),
        }
    }

    pub fn is_well_formed(&self) -> bool {
        match &self.target {
            Target::Version(v) => v.is_parsable(),
            Target::Prefix(_) => true,
            Target::Text(t) => !t.is_empty(),
        }
    }

    pub fn matches(&self, version: &ReleaseVersion) -> bool {
        self.matches_declared(version, &version.to_string())
    }

    /// Like [`Comparator::matches`], with `literal` being the version exactly
    /// as it was written. Only `===` looks at the literal.
    pub fn matches_declared(&self, version: &ReleaseVersion, literal: &str) -> bool {
        let target = match &self.target {
            Target::Text(text) => return self.op == Op::Arbitrary && literal.trim() == text,
            Target::Prefix(prefix) => {
                let inside = version.has_prefix(prefix.components());
                return if self.op == Op::Ne { !inside } else { inside };
            }
            Target::Version(Version::Unparsable(_)) => return false,
            Target::Version(Version::Release(v)) => v,
        };
        match self.op {
            Op::Eq => version == target,
            Op::Ne => version != target,
            Op::Ge => version >= target,
            Op::Le => version <= target,
            Op::Gt => version > target,
            Op::Lt => version < target,
            Op::Compatible => {
                let n = target.components().len();
                n >= 2 && version >= target && version.has_prefix(&target.components()[..n - 1])
            }
            Op::Caret => version >= target && *version < target.caret_upper(),
            Op::Tilde => version >= target && *version < target.tilde_upper(),
            Op::Arbitrary => false,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A set of comparators that must all hold.
#[derive(Debug, Clone, Default)]
pub struct Constraint {
    raw: String,
    comparators: Vec<Comparator>,
}

impl Constraint {
    /// Parse a constraint such as `>=1.2,<2; python_version<'3.12'`.
    ///
    /// Text after `;` is an environment marker and does not take part in
    /// matching. An empty string yields the unconstrained constraint.
    pub fn parse(raw: &str) -> Self {
        let comparators = strip_marker(raw)
            .split(',')
            .map(str::trim)
            .filter(|clause| !clause.is_empty())
            .map(Comparator::parse)
            .collect();
        Self {
            raw: raw.trim().to_string(),
            comparators,
        }
    }

    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_any(&self) -> bool {
        self.comparators.is_empty()
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether every clause has a usable right-hand side.
    pub fn is_well_formed(&self) -> bool {
        self.comparators.iter().all(Comparator::is_well_formed)
    }

    pub fn matches(&self, version: &ReleaseVersion) -> bool {
        self.comparators.iter().all(|c| c.matches(version))
    }

    /// Match a version declared in a manifest as `literal`.
    pub fn matches_declared(&self, version: &ReleaseVersion, literal: &str) -> bool {
        self.comparators
            .iter()
            .all(|c| c.matches_declared(version, literal))
    }

    /// Like [`Constraint::matches`], but an unparsable version never matches.
    pub fn matches_version(&self, version: &Version) -> bool {
        version.as_release().is_some_and(|v| self.matches(v))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn strip_marker(raw: &str) -> &str {
    raw.split_once(';').map_or(raw, |(spec, _)| spec)
}

/// The version literal a declared constraint pins or starts from.
///
/// Takes the first clause (marker removed) and strips its comparator, so
/// `>=1.2,<2` yields `1.2`. Returns `None` for an unconstrained declaration.
pub fn version_literal(constraint: &str) -> Option<&str> {
    let first = strip_marker(constraint).split(',').next().unwrap_or("");
    let literal = first.trim().trim_start_matches(COMPARATOR_CHARS).trim();
    (!literal.is_empty()).then_some(literal)
}
