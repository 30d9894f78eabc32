//! E2E CLI tests covering:
//! - Adding, editing, and deleting people
//! - Spousal symmetry maintenance on interactive edits
//! - Offline bulk import from a candidate file
//! - Layout, share/view, and verify workflows
//!
//! Each test runs `stm` as a subprocess against a tree file in an
//! isolated temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the stm binary, pointed at a tree in `dir`.
fn stm_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("stm"));
    cmd.env("STEMMA_TREE", dir.join("tree.json"));
    cmd.env("STEMMA_CONFIG", dir.join("no-config.toml"));
    cmd
}

/// Add a person via CLI, return their id.
fn add_person(dir: &Path, name: &str, extra: &[&str]) -> String {
    let mut args = vec!["add", name, "--json"];
    args.extend_from_slice(extra);
    let output = stm_cmd(dir)
        .args(&args)
        .output()
        .expect("add should not crash");
    assert!(
        output.status.success(),
        "add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value =
        serde_json::from_slice(&output.stdout).expect("add --json should produce valid JSON");
    json["id"]
        .as_str()
        .expect("add output should have 'id' field")
        .to_string()
}

/// Run `stm show <who> --json` and return parsed JSON.
fn show_json(dir: &Path, who: &str) -> Value {
    let output = stm_cmd(dir)
        .args(["show", who, "--json"])
        .output()
        .expect("show should not crash");
    assert!(
        output.status.success(),
        "show failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

// ---------------------------------------------------------------------------
// Add / show / list
// ---------------------------------------------------------------------------

#[test]
fn add_then_show_round_trips_fields() {
    let dir = TempDir::new().expect("tempdir");
    add_person(
        dir.path(),
        "Li Hua",
        &["--gender", "female", "--birth", "1962", "--bio", "Teacher"],
    );

    let shown = show_json(dir.path(), "Li Hua");
    assert_eq!(shown["name"], "Li Hua");
    assert_eq!(shown["gender"], "female");
    assert_eq!(shown["birth"], "1962-01-01", "bare year normalizes to Jan 1");
    assert_eq!(shown["bio"], "Teacher");
}

#[test]
fn list_shows_everyone() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "A", &[]);
    add_person(dir.path(), "B", &[]);

    let output = stm_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("list");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["people"].as_array().expect("array").len(), 2);
}

#[test]
fn add_me_sets_the_marker() {
    let dir = TempDir::new().expect("tempdir");
    let id = add_person(dir.path(), "Zhang San", &["--me"]);

    let output = stm_cmd(dir.path())
        .args(["me", "--json"])
        .output()
        .expect("me");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["id"], id.as_str());
}

// ---------------------------------------------------------------------------
// Edit: spousal symmetry
// ---------------------------------------------------------------------------

#[test]
fn marrying_by_name_links_both_directions() {
    let dir = TempDir::new().expect("tempdir");
    let a = add_person(dir.path(), "Zhang San", &[]);
    let b = add_person(dir.path(), "Li Hua", &[]);

    stm_cmd(dir.path())
        .args(["edit", "Zhang San", "--spouse", "Li Hua"])
        .assert()
        .success();

    let shown_a = show_json(dir.path(), &a);
    let shown_b = show_json(dir.path(), &b);
    assert_eq!(shown_a["spouse"], b.as_str());
    assert_eq!(shown_b["spouse"], a.as_str());
}

#[test]
fn remarrying_clears_the_previous_partner() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "A", &[]);
    let b = add_person(dir.path(), "B", &[]);
    let c = add_person(dir.path(), "C", &[]);

    stm_cmd(dir.path())
        .args(["edit", "A", "--spouse", "B"])
        .assert()
        .success();
    stm_cmd(dir.path())
        .args(["edit", "A", "--spouse", "C"])
        .assert()
        .success();

    let shown_b = show_json(dir.path(), &b);
    let shown_c = show_json(dir.path(), &c);
    assert!(shown_b.get("spouse").is_none(), "B's stale link cleared");
    assert_eq!(shown_c["spouse_name"], "A");
}

#[test]
fn self_marriage_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "A", &[]);

    stm_cmd(dir.path())
        .args(["edit", "A", "--spouse", "A"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// Delete: transactional reference scrubbing
// ---------------------------------------------------------------------------

#[test]
fn delete_scrubs_references_and_passes_verify() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "Parent", &["--gender", "male"]);
    add_person(dir.path(), "Child", &[]);
    stm_cmd(dir.path())
        .args(["edit", "Child", "--parent-a", "Parent"])
        .assert()
        .success();

    stm_cmd(dir.path())
        .args(["delete", "Parent", "--force"])
        .assert()
        .success();

    let shown = show_json(dir.path(), "Child");
    assert!(shown.get("parent_a").is_none(), "parent reference scrubbed");

    stm_cmd(dir.path()).args(["verify"]).assert().success();
}

// ---------------------------------------------------------------------------
// Bulk import (offline candidate file)
// ---------------------------------------------------------------------------

#[test]
fn import_candidates_resolves_and_reconciles() {
    let dir = TempDir::new().expect("tempdir");
    let batch = dir.path().join("batch.json");
    std::fs::write(
        &batch,
        r#"[
            {"name": "Zhang San", "gender": "male", "birthDate": "1985-04-11", "spouseName": "Li Hua"},
            {"name": "Li Hua", "gender": "female", "spouseName": "Zhang San"},
            {"name": "Xiao Ming", "fatherName": "Zhang San"}
        ]"#,
    )
    .expect("write batch");

    let output = stm_cmd(dir.path())
        .args(["import", "--candidates"])
        .arg(&batch)
        .arg("--json")
        .output()
        .expect("import");
    assert!(
        output.status.success(),
        "import failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["candidates"], 3);
    assert_eq!(report["created"], 3);

    // Spouses linked, and Xiao Ming's second parent inferred from the
    // spouse pair.
    let ming = show_json(dir.path(), "Xiao Ming");
    assert_eq!(ming["parent_a_name"], "Zhang San");
    assert_eq!(ming["parent_b_name"], "Li Hua");

    stm_cmd(dir.path()).args(["verify"]).assert().success();
}

#[test]
fn import_merges_into_existing_people_without_duplicates() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "Li Hua", &["--gender", "female"]);

    let batch = dir.path().join("batch.json");
    std::fs::write(&batch, r#"[{"name": "Li Hua", "bio": "Teacher"}]"#).expect("write batch");

    stm_cmd(dir.path())
        .args(["import", "--candidates"])
        .arg(&batch)
        .assert()
        .success();

    let output = stm_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("list");
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(
        json["people"].as_array().expect("array").len(),
        1,
        "no duplicate person created"
    );

    let shown = show_json(dir.path(), "Li Hua");
    assert_eq!(shown["bio"], "Teacher");
    assert_eq!(shown["gender"], "female", "human-entered gender preserved");
}

#[test]
fn malformed_candidate_file_imports_nothing() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "Keep Me", &[]);

    let batch = dir.path().join("batch.json");
    std::fs::write(&batch, "this is not json").expect("write batch");

    let output = stm_cmd(dir.path())
        .args(["import", "--candidates"])
        .arg(&batch)
        .arg("--json")
        .output()
        .expect("import");
    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(report["candidates"], 0);

    let output = stm_cmd(dir.path())
        .args(["list", "--json"])
        .output()
        .expect("list");
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["people"].as_array().expect("array").len(), 1);
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[test]
fn layout_emits_nodes_and_edges() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "Parent", &["--gender", "female"]);
    add_person(dir.path(), "Child", &[]);
    stm_cmd(dir.path())
        .args(["edit", "Child", "--parent-b", "Parent"])
        .assert()
        .success();

    let output = stm_cmd(dir.path())
        .args(["layout", "--json"])
        .output()
        .expect("layout");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");

    let nodes = json["nodes"].as_array().expect("nodes");
    assert_eq!(nodes.len(), 2);
    let edges = json["edges"].as_array().expect("edges");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["kind"], "primary");
}

#[test]
fn layout_on_empty_tree_is_empty_not_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let output = stm_cmd(dir.path())
        .args(["layout", "--json"])
        .output()
        .expect("layout");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["nodes"].as_array().expect("nodes").len(), 0);
}

// ---------------------------------------------------------------------------
// Share / view
// ---------------------------------------------------------------------------

#[test]
fn share_then_view_round_trips() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "Zhang San", &[]);
    add_person(dir.path(), "Li Hua", &["--gender", "female"]);

    let output = stm_cmd(dir.path())
        .args(["share", "--json"])
        .output()
        .expect("share");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let payload = json["payload"].as_str().expect("payload");

    // Viewing in a fresh directory must not need the original tree.
    let other = TempDir::new().expect("tempdir");
    let output = stm_cmd(other.path())
        .args(["view", payload, "--json"])
        .output()
        .expect("view");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["people"].as_array().expect("people").len(), 2);

    // Read-only: the fresh directory's tree stays empty.
    let output = stm_cmd(other.path())
        .args(["list", "--json"])
        .output()
        .expect("list");
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["people"].as_array().expect("people").len(), 0);
}

#[test]
fn viewing_garbage_payload_fails_cleanly() {
    let dir = TempDir::new().expect("tempdir");
    stm_cmd(dir.path())
        .args(["view", "!!!definitely-not-a-payload!!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("E4002"));
}

// ---------------------------------------------------------------------------
// Verify
// ---------------------------------------------------------------------------

#[test]
fn verify_is_clean_on_a_fresh_tree() {
    let dir = TempDir::new().expect("tempdir");
    add_person(dir.path(), "A", &[]);
    stm_cmd(dir.path()).args(["verify"]).assert().success();
}
