//! E2E walk of the full CLI surface: init, person intake, relationship
//! validation, and tree rendering, with JSON + human output verification.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn lin_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("lin"));
    cmd.current_dir(dir);
    cmd.env("LINEAGE_LOG", "error");
    cmd
}

fn init_project(dir: &Path) {
    lin_cmd(dir).args(["init"]).assert().success();
}

fn add_person(dir: &Path, name: &str, born: &str) -> String {
    let output = lin_cmd(dir)
        .args(["person", "add", "--name", name, "--born", born, "--json"])
        .output()
        .expect("person add should not crash");
    assert!(
        output.status.success(),
        "person add failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    json["id"].as_str().expect("id must exist").to_string()
}

fn link(dir: &Path, parent: &str, child: &str) {
    lin_cmd(dir)
        .args(["link", parent, child])
        .assert()
        .success();
}

fn tree_json(dir: &Path, root: &str) -> Value {
    let output = lin_cmd(dir)
        .args(["tree", root, "--json"])
        .output()
        .expect("tree should not crash");
    assert!(
        output.status.success(),
        "tree failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid JSON")
}

#[test]
fn init_creates_project_once() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());
    assert!(dir.path().join(".lineage/lineage.db").exists());
    assert!(dir.path().join(".lineage/config.toml").exists());

    // Second init without --force fails; with --force succeeds.
    lin_cmd(dir.path()).args(["init"]).assert().failure();
    lin_cmd(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn commands_outside_a_project_fail_with_hint() {
    let dir = TempDir::new().expect("temp dir");
    lin_cmd(dir.path())
        .args(["person", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("lin init"));
}

#[test]
fn three_generation_family_renders_sorted_tree() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());

    let grandpa = add_person(dir.path(), "Grandpa", "1930-01-01");
    let dad = add_person(dir.path(), "Dad", "1955-06-15");
    let aunt = add_person(dir.path(), "Aunt", "1952-02-10");
    let son = add_person(dir.path(), "Son", "1985-03-20");

    link(dir.path(), &grandpa, &dad);
    link(dir.path(), &grandpa, &aunt);
    link(dir.path(), &dad, &son);

    let tree = tree_json(dir.path(), &grandpa);
    assert_eq!(tree["name"], "Grandpa");

    // Children ordered ascending by birth date: Aunt (1952) before Dad (1955).
    let children = tree["children"].as_array().expect("children array");
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["name"], "Aunt");
    assert_eq!(children[1]["name"], "Dad");

    let grandchildren = children[1]["children"].as_array().expect("nested array");
    assert_eq!(grandchildren.len(), 1);
    assert_eq!(grandchildren[0]["name"], "Son");
    assert_eq!(grandchildren[0]["date_of_birth"], "1985-03-20");

    // Human rendering shows the ASCII branches.
    lin_cmd(dir.path())
        .args(["tree", &grandpa])
        .assert()
        .success()
        .stdout(predicate::str::contains("└──"))
        .stdout(predicate::str::contains("Grandpa (1930-01-01)"));
}

#[test]
fn person_list_is_oldest_first() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());

    add_person(dir.path(), "Younger", "1990-05-05");
    add_person(dir.path(), "Older", "1940-05-05");

    let output = lin_cmd(dir.path())
        .args(["person", "list", "--json"])
        .output()
        .expect("person list should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    let names: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, vec!["Older", "Younger"]);
}

#[test]
fn malformed_inputs_fail_request_layer_validation() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());

    // Bad date at intake.
    lin_cmd(dir.path())
        .args(["person", "add", "--name", "Noah", "--born", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VALIDATION_ERROR"));

    // Non-UUID ids on link and tree.
    lin_cmd(dir.path())
        .args(["link", "not-a-uuid", "also-not"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VALIDATION_ERROR"));

    lin_cmd(dir.path())
        .args(["tree", "not-a-uuid"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("VALIDATION_ERROR"));
}

#[test]
fn domain_rejections_surface_their_taxonomy_code() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());

    let parent = add_person(dir.path(), "Noah", "1960-01-01");
    let child = add_person(dir.path(), "Emma", "1990-01-01");
    let close = add_person(dir.path(), "Close", "1995-01-01");

    // Self-parentage.
    lin_cmd(dir.path())
        .args(["link", &parent, &parent])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SELF_PARENT"));

    // Unknown person (well-formed UUID that is not in the store).
    lin_cmd(dir.path())
        .args(["link", &parent, "1f9d94a2-0000-4000-8000-000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PERSON_NOT_FOUND"));

    // Insufficient age gap.
    lin_cmd(dir.path())
        .args(["link", &child, &close])
        .assert()
        .failure()
        .stderr(predicate::str::contains("AGE_RULE"));

    // Duplicate pair: first succeeds, second carries DUPLICATE.
    link(dir.path(), &parent, &child);
    lin_cmd(dir.path())
        .args(["link", &parent, &child])
        .assert()
        .failure()
        .stderr(predicate::str::contains("DUPLICATE"));

    // Reversal of a committed edge never commits.
    lin_cmd(dir.path())
        .args(["link", &child, &parent])
        .assert()
        .failure();

    // Tree for an unknown root.
    lin_cmd(dir.path())
        .args(["tree", "1f9d94a2-0000-4000-8000-000000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PERSON_NOT_FOUND"));
}

#[test]
fn json_error_output_is_machine_parseable() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());

    let parent = add_person(dir.path(), "Noah", "1960-01-01");

    let output = lin_cmd(dir.path())
        .args(["link", &parent, &parent, "--json"])
        .output()
        .expect("link should not crash");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let json_part = stderr
        .lines()
        .skip_while(|line| !line.starts_with('{'))
        .take_while(|line| !line.starts_with("Error:"))
        .collect::<Vec<_>>()
        .join("\n");
    let json: Value = serde_json::from_str(&json_part).expect("stderr carries JSON error");
    assert_eq!(json["code"], "SELF_PARENT");
}

#[test]
fn depth_flag_tightens_the_tree_bound() {
    let dir = TempDir::new().expect("temp dir");
    init_project(dir.path());

    let grandpa = add_person(dir.path(), "Grandpa", "1930-01-01");
    let dad = add_person(dir.path(), "Dad", "1955-06-15");
    let son = add_person(dir.path(), "Son", "1985-03-20");
    link(dir.path(), &grandpa, &dad);
    link(dir.path(), &dad, &son);

    lin_cmd(dir.path())
        .args(["tree", &grandpa, "--depth", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("TREE_TOO_DEEP"));

    lin_cmd(dir.path())
        .args(["tree", &grandpa, "--depth", "2"])
        .assert()
        .success();
}
