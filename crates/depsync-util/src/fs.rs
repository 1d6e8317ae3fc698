use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::DepsyncError;

/// The nearest directory, starting at `start` itself, that directly contains
/// a file called `filename`.
pub fn find_ancestor_with(start: &Path, filename: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(filename).is_file())
        .map(Path::to_path_buf)
}

/// Recursively collect every file named exactly `filename` below `root`.
///
/// Directories whose name appears in `exclude` are not descended into.
/// Entries that cannot be read are skipped with a warning; only an
/// inaccessible `root` is an error. Results are sorted by path.
pub fn find_manifests(
    root: &Path,
    filename: &str,
    exclude: &[String],
) -> Result<Vec<PathBuf>, DepsyncError> {
    let meta = std::fs::metadata(root).map_err(|e| DepsyncError::RootUnreadable {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;
    if !meta.is_dir() {
        return Err(DepsyncError::RootUnreadable {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }
    std::fs::read_dir(root).map_err(|e| DepsyncError::RootUnreadable {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !exclude
                    .iter()
                    .any(|name| entry.file_name().to_string_lossy() == name.as_str())
        });

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let at = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| root.display().to_string());
                tracing::warn!("Skipping unreadable entry {at}: {e}");
                continue;
            }
        };
        if entry.file_type().is_file() && entry.file_name() == filename {
            found.push(entry.into_path());
        }
    }
    found.sort();
    Ok(found)
}

/// Name of the directory containing `path`, used as a project label.
pub fn parent_dir_name(path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| ".".to_string())
}
