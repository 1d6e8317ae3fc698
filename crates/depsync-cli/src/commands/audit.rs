//! Handler for `depsync audit`.

use std::path::Path;

use miette::Result;

use depsync_ops::ops_audit::{self, AuditOptions};
use depsync_ops::ReportFormat;

pub fn exec(root: &Path, format: ReportFormat, fail_on_conflict: bool) -> Result<()> {
    let opts = AuditOptions {
        format,
        fail_on_conflict,
    };
    ops_audit::audit(root, &opts).map(|_| ())
}
