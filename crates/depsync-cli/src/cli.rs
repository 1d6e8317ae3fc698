//! CLI argument definitions for depsync.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "depsync",
    version,
    about = "Keep dependency versions consistent across a Python monorepo",
    long_about = "depsync scans every pyproject.toml under a monorepo root, reports packages \
                  declared with conflicting constraints, and adds new dependencies at a version \
                  already used elsewhere in the repository."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Monorepo root to scan (defaults to the nearest directory containing depsync.toml)
    #[arg(long, global = true, env = "DEPSYNC_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report packages declared with different constraints across projects
    Audit {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
        /// Exit with an error when any conflict is found
        #[arg(long)]
        fail_on_conflict: bool,
    },

    /// Show which version a package would resolve to
    Resolve {
        /// Package with an optional constraint, e.g. pandas>=1.0
        spec: String,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },

    /// Add a dependency at the version already used in the monorepo
    Add {
        /// Package with an optional constraint, e.g. pandas>=1.0
        spec: String,
        /// Dependency group to add to (e.g. dev)
        #[arg(long)]
        group: Option<String>,
        /// Optional-dependency extra to add to
        #[arg(long)]
        optional: Option<String>,
        /// Project directory receiving the dependency (defaults to the current directory)
        #[arg(long)]
        project: Option<PathBuf>,
        /// Print the package-manager command without running it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Human,
    Json,
}

impl From<Format> for depsync_ops::ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Human => depsync_ops::ReportFormat::Human,
            Format::Json => depsync_ops::ReportFormat::Json,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
