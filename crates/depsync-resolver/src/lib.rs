//! Cross-project analysis of a loaded workspace: version parsing and
//! constraint matching, conflict aggregation for audits, and the
//! max-satisfying version resolver used when syncing a dependency.

pub mod conflict;
pub mod resolver;
pub mod version;
