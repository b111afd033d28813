//! End-to-end composition tests against local layer stacks

mod common;

use assert_cmd::Command;
use common::TestProject;
use predicates::prelude::*;

#[allow(deprecated)]
fn lamina_cmd() -> Command {
    Command::cargo_bin("lamina").unwrap()
}

#[test]
fn test_compose_single_layer() {
    let project = TestProject::new();
    project.write_layer(
        "app",
        "stylesheets: [main.css]\nbuild:\n  target: esnext\nprebundle: [zod]\n",
    );

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("main.css"))
        .stdout(predicate::str::contains("target: esnext"))
        .stdout(predicate::str::contains("zod"));
}

#[test]
fn test_compose_root_overrides_base_target() {
    let project = TestProject::new();
    project.write_layer("layers/base", "build:\n  target: es2020\n");
    project.write_layer(
        "app",
        "extends: [../layers/base]\nbuild:\n  target: esnext\n",
    );

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("target: esnext"))
        .stdout(predicate::str::contains("es2020").not());
}

#[test]
fn test_compose_json_format() {
    let project = TestProject::new();
    project.write_layer("app", "prebundle: [klona, zod]\n");

    lamina_cmd()
        .args(["compose", "--format", "json", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"prebundle\""))
        .stdout(predicate::str::contains("\"klona\""));
}

#[test]
fn test_compose_digest_is_stable() {
    let project = TestProject::new();
    project.write_layer("layers/base", "stylesheets: [base.css]\n");
    project.write_layer(
        "app",
        "extends: [../layers/base]\nstylesheets: [app.css]\n",
    );

    let first = lamina_cmd()
        .args(["compose", "--digest", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("blake3:"))
        .get_output()
        .stdout
        .clone();

    lamina_cmd()
        .args(["compose", "--digest", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .stdout(predicate::eq(first));
}

#[test]
fn test_compose_diamond_merges_shared_base_once() {
    let project = TestProject::new();
    project.write_layer("layers/shared", "stylesheets: [shared.css]\n");
    project.write_layer("layers/a", "extends: [../shared]\nstylesheets: [a.css]\n");
    project.write_layer("layers/b", "extends: [../shared]\nstylesheets: [b.css]\n");
    project.write_layer("app", "extends: [../layers/a, ../layers/b]\n");

    let output = lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.matches("shared.css").count(), 1);
    let shared = stdout.find("shared.css").unwrap();
    assert!(shared < stdout.find("a.css").unwrap());
    assert!(shared < stdout.find("b.css").unwrap());
}

#[test]
fn test_compose_rejects_unknown_target() {
    let project = TestProject::new();
    project.write_layer("app", "build:\n  target: es5\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("build.target"))
        .stderr(predicate::str::contains("es5"));
}

#[test]
fn test_compose_reports_cycle_chain() {
    let project = TestProject::new();
    project.write_layer("layers/a", "extends: [../b]\n");
    project.write_layer("layers/b", "extends: [../a]\n");
    project.write_layer("app", "extends: [../layers/a]\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("a -> b -> a"));
}

#[test]
fn test_compose_reports_missing_layer() {
    let project = TestProject::new();
    project.write_layer("app", "extends: [../layers/missing]\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing"));
}

#[test]
fn test_compose_reports_malformed_fragment() {
    let project = TestProject::new();
    project.write_layer("app", "stylesheets: [unterminated\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_compose_rejects_unknown_fragment_field() {
    let project = TestProject::new();
    project.write_layer("app", "stylehseets: [typo.css]\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_compose_layer_without_fragment_file() {
    let project = TestProject::new();
    project.create_dir("layers/empty");
    project.write_layer("app", "extends: [../layers/empty]\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("fragment file not found"));
}

#[test]
fn test_compose_remote_without_version_fails() {
    let project = TestProject::new();
    project.write_layer("app", "extends: [\"gh:acme/layers/base\"]\n");

    lamina_cmd()
        .args(["compose", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("version"));
}
