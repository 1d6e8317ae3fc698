//! Handler for `depsync add`.

use std::path::{Path, PathBuf};

use miette::Result;

use depsync_ops::ops_add::{self, AddOptions};

pub fn exec(
    root: &Path,
    cwd: &Path,
    spec: String,
    group: Option<String>,
    optional: Option<String>,
    project: Option<PathBuf>,
    dry_run: bool,
) -> Result<()> {
    let project_dir = project.map_or_else(|| cwd.to_path_buf(), |p| cwd.join(p));
    let opts = AddOptions {
        spec,
        project_dir,
        group,
        optional,
        dry_run,
    };
    ops_add::add(root, &opts).map(|_| ())
}
