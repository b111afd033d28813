//! CLI integration tests using the real lamina binary

mod common;

use assert_cmd::Command;
use common::TestProject;
use predicates::prelude::*;

#[allow(deprecated)]
fn lamina_cmd() -> Command {
    Command::cargo_bin("lamina").unwrap()
}

#[test]
fn test_help_output() {
    lamina_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Layered configuration composer"))
        .stdout(predicate::str::contains("compose"))
        .stdout(predicate::str::contains("layers"))
        .stdout(predicate::str::contains("env"));
}

#[test]
fn test_version_output() {
    lamina_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lamina"))
        .stdout(predicate::str::contains("Build info"));
}

#[test]
fn test_completions_zsh() {
    lamina_cmd()
        .args(["completions", "--shell", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lamina"));
}

#[test]
fn test_completions_unknown_shell() {
    lamina_cmd()
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown shell"));
}

#[test]
fn test_compose_missing_directory() {
    lamina_cmd()
        .args(["compose", "-d", "/nonexistent/project"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_layers_lists_stack() {
    let project = TestProject::new();
    project.write_layer("layers/base", "stylesheets: [base.css]\n");
    project.write_layer("app", "extends: [../layers/base]\n");

    lamina_cmd()
        .args(["layers", "-d"])
        .arg(project.layer_path("app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Resolved layers (2):"))
        .stdout(predicate::str::contains("base"))
        .stdout(predicate::str::contains("app"));
}
