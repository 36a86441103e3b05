use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform state backend"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("show"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tfboot"));
}

#[test]
fn test_init_help() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.arg("init")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--cloud"))
        .stdout(predicate::str::contains("--region"))
        .stdout(predicate::str::contains("--name-prefix"));
}

#[test]
fn test_init_requires_cloud_and_region() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--cloud"))
        .stderr(predicate::str::contains("--region"));
}

#[test]
fn test_show_requires_cloud_and_region() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.arg("show").arg("--cloud").arg("aws").assert().failure();
}

#[test]
fn test_init_rejects_unknown_cloud() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.args(["init", "--cloud", "digitalocean", "--region", "eu-central-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported cloud \"digitalocean\""));
}

#[test]
fn test_init_rejects_unimplemented_clouds() {
    for cloud in ["gcp", "azure"] {
        let mut cmd = Command::cargo_bin("tfboot").unwrap();
        cmd.args(["init", "--cloud", cloud, "--region", "europe-west1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("unsupported cloud"));
    }
}

#[test]
fn test_show_rejects_unimplemented_cloud() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.args(["show", "--cloud", "GCP", "--region", "europe-west1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported cloud \"gcp\""));
}

#[test]
fn test_invalid_command() {
    let mut cmd = Command::cargo_bin("tfboot").unwrap();
    cmd.arg("destroy").assert().failure();
}
