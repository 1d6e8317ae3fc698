//! Handler for `depsync resolve`.

use std::path::Path;

use miette::Result;

use depsync_ops::ops_resolve;
use depsync_ops::ReportFormat;

pub fn exec(root: &Path, spec: &str, format: ReportFormat) -> Result<()> {
    ops_resolve::resolve(root, spec, format).map(|_| ())
}
