#![allow(dead_code)]

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::TempDir;

pub fn depsync_cmd() -> Command {
    let mut cmd = Command::cargo_bin("depsync").unwrap();
    cmd.env_remove("DEPSYNC_ROOT").env_remove("RUST_LOG");
    cmd
}

pub fn write_project(root: &Path, name: &str, dependencies: &[&str]) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    let deps: Vec<String> = dependencies.iter().map(|d| format!("\"{d}\"")).collect();
    fs::write(
        dir.join("pyproject.toml"),
        format!(
            "[project]\nname = \"{name}\"\ndependencies = [{}]\n",
            deps.join(", ")
        ),
    )
    .unwrap();
}

/// Three services that disagree about pandas and agree about requests.
pub fn monorepo() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), "api", &["pandas==1.0.0", "requests==2.31.0"]);
    write_project(tmp.path(), "etl", &["pandas>=1.2.0", "requests==2.31.0"]);
    write_project(tmp.path(), "web", &["pandas==2.0.0"]);
    tmp
}
