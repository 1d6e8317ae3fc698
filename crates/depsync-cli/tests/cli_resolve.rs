mod common;

use common::{depsync_cmd, monorepo};
use predicates::prelude::*;

#[test]
fn test_resolve_picks_highest_matching() {
    let tmp = monorepo();

    depsync_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "pandas<2.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolution for pandas<2.0.0:"))
        .stdout(predicate::str::contains(
            "Using latest matching version: 1.2.0",
        ));
}

#[test]
fn test_resolve_unsatisfiable() {
    let tmp = monorepo();

    depsync_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "pandas>=3.0.0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("none satisfy '>=3.0.0'"));
}

#[test]
fn test_resolve_not_found_json() {
    let tmp = monorepo();

    let output = depsync_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "polars", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["package"], "polars");
    assert_eq!(json["outcome"]["state"], "not-found");
}

#[test]
fn test_resolve_rejects_invalid_constraint() {
    let tmp = monorepo();

    depsync_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "pandas>=banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid version constraint"));
}
