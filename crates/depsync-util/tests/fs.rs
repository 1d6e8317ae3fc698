use depsync_util::errors::DepsyncError;
use depsync_util::fs::{find_ancestor_with, find_manifests, parent_dir_name};
use std::path::Path;
use tempfile::TempDir;

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[test]
fn test_config_found_from_nested_project() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("depsync.toml"));
    let project = tmp.path().join("services/etl/src");
    std::fs::create_dir_all(&project).unwrap();
    assert_eq!(
        find_ancestor_with(&project, "depsync.toml"),
        Some(tmp.path().to_path_buf())
    );
    assert_eq!(
        find_ancestor_with(tmp.path(), "depsync.toml"),
        Some(tmp.path().to_path_buf())
    );
}

#[test]
fn test_config_directory_is_not_a_match() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("depsync.toml")).unwrap();
    assert_eq!(find_ancestor_with(tmp.path(), "depsync.toml"), None);
}

#[test]
fn test_find_manifests_recursive_and_sorted() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("zeta/pyproject.toml"));
    touch(&tmp.path().join("alpha/pyproject.toml"));
    touch(&tmp.path().join("alpha/nested/deep/pyproject.toml"));
    touch(&tmp.path().join("pyproject.toml"));

    let found = find_manifests(tmp.path(), "pyproject.toml", &[]).unwrap();
    let rel: Vec<String> = found
        .iter()
        .map(|p| {
            p.strip_prefix(tmp.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(
        rel,
        vec![
            "alpha/nested/deep/pyproject.toml",
            "alpha/pyproject.toml",
            "pyproject.toml",
            "zeta/pyproject.toml",
        ]
    );
}

#[test]
fn test_find_manifests_exact_name_only() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("a/pyproject.toml.bak"));
    touch(&tmp.path().join("b/PyProject.toml"));
    touch(&tmp.path().join("c/my-pyproject.toml"));
    touch(&tmp.path().join("d/pyproject.toml"));

    let found = find_manifests(tmp.path(), "pyproject.toml", &[]).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("d/pyproject.toml"));
}

#[test]
fn test_find_manifests_skips_excluded_dirs() {
    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("app/pyproject.toml"));
    touch(&tmp.path().join("app/.venv/lib/pkg/pyproject.toml"));

    let found = find_manifests(tmp.path(), "pyproject.toml", &[".venv".to_string()]).unwrap();
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("app/pyproject.toml"));
}

#[test]
fn test_find_manifests_missing_root_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("does-not-exist");
    let err = find_manifests(&missing, "pyproject.toml", &[]).unwrap_err();
    assert!(matches!(err, DepsyncError::RootUnreadable { .. }));
}

#[test]
fn test_find_manifests_file_root_fails() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("pyproject.toml");
    touch(&file);
    let err = find_manifests(&file, "pyproject.toml", &[]).unwrap_err();
    assert!(err.to_string().contains("not a directory"), "got: {err}");
}

#[test]
fn test_parent_dir_name() {
    assert_eq!(
        parent_dir_name(Path::new("/repo/projects/api/pyproject.toml")),
        "api"
    );
}

#[cfg(unix)]
#[test]
fn test_find_manifests_skips_unreadable_directory() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    touch(&tmp.path().join("api/pyproject.toml"));
    touch(&tmp.path().join("locked/pyproject.toml"));
    touch(&tmp.path().join("web/pyproject.toml"));
    let locked = tmp.path().join("locked");
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores directory permissions; nothing to observe then.
    if std::fs::read_dir(&locked).is_ok() {
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let found = find_manifests(tmp.path(), "pyproject.toml", &[]);
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

    let found = found.unwrap();
    assert_eq!(
        found,
        vec![
            tmp.path().join("api/pyproject.toml"),
            tmp.path().join("web/pyproject.toml"),
        ]
    );
}
