//! Dependency declarations and the declaration-string grammar.
//!
//! A declaration is one entry such as `"pandas>=1.0.1"` from a manifest. It
//! splits into a package identifier and a constraint string:
//!
//! ```text
//! declaration := identifier tail?
//! identifier  := [A-Za-z0-9_-]+
//! tail        := ('<' | '>' | '=' | '!' | '~' | '^') any*
//! ```
//!
//! Inputs outside this grammar are not rejected. They become a package named
//! after the whole (lowercased) string with no constraint, so one odd entry
//! never stops a monorepo scan.

use std::fmt;

use serde::Serialize;

/// Characters that may start a constraint tail.
pub const COMPARATOR_CHARS: &[char] = &['<', '>', '=', '!', '~', '^'];

/// Where inside a manifest a declaration was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum DeclarationGroup {
    /// `[project].dependencies`
    Direct,
    /// `[project.optional-dependencies].<name>`
    Optional(String),
}

impl fmt::Display for DeclarationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationGroup::Direct => f.write_str("dependencies"),
            DeclarationGroup::Optional(name) => write!(f, "optional-dependencies.{name}"),
        }
    }
}

/// A parsed dependency declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Lowercased package identifier; used as the key for every comparison.
    pub package: String,
    /// Constraint text exactly as written, or empty when unconstrained.
    pub constraint: String,
    /// The declaration as it appeared in the manifest.
    pub raw: String,
    pub group: DeclarationGroup,
}

impl Declaration {
    pub fn parse(raw: &str, group: DeclarationGroup) -> Self {
        let (package, constraint) = split_declaration(raw);
        Self {
            package,
            constraint,
            raw: raw.to_string(),
            group,
        }
    }

    pub fn is_constrained(&self) -> bool {
        !self.constraint.is_empty()
    }

    /// Whether this declaration names `package`, ignoring case.
    pub fn is_package(&self, package: &str) -> bool {
        self.package.eq_ignore_ascii_case(package.trim())
    }
}

/// Split a declaration into `(lowercased package, verbatim constraint)`.
pub fn split_declaration(raw: &str) -> (String, String) {
    let text = raw.trim();
    let ident_len = text
        .char_indices()
        .find(|&(_, c)| !is_identifier_char(c))
        .map(|(i, _)| i)
        .unwrap_or(text.len());

    if ident_len == 0 {
        return fallback(text);
    }

    let (ident, tail) = text.split_at(ident_len);
    if tail.is_empty() {
        (ident.to_lowercase(), String::new())
    } else if tail.starts_with(COMPARATOR_CHARS) {
        (ident.to_lowercase(), tail.to_string())
    } else {
        fallback(text)
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn fallback(text: &str) -> (String, String) {
    (text.to_lowercase(), String::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_display() {
        assert_eq!(DeclarationGroup::Direct.to_string(), "dependencies");
        assert_eq!(
            DeclarationGroup::Optional("dev".into()).to_string(),
            "optional-dependencies.dev"
        );
    }

    #[test]
    fn declaration_keeps_raw_and_group() {
        let decl = Declaration::parse("  Requests==2.31.0 ", DeclarationGroup::Direct);
        assert_eq!(decl.package, "requests");
        assert_eq!(decl.constraint, "==2.31.0");
        assert_eq!(decl.raw, "  Requests==2.31.0 ");
        assert!(decl.is_constrained());
        assert!(decl.is_package("REQUESTS"));
    }

    #[test]
    fn unicode_identifier_falls_back() {
        assert_eq!(split_declaration("pändas>=1"), ("pändas>=1".to_string(), String::new()));
    }
}
