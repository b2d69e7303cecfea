// tests/integration_test.rs
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn semver_stamp(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_semver-stamp"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("CI_NUM")
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

fn project(content: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("gradle.properties"), content).unwrap();
    dir
}

#[test]
fn test_semver_stamp_help() {
    let dir = TempDir::new().unwrap();
    let output = semver_stamp(dir.path(), &["--help"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("semver-stamp"));
    assert!(out.contains("bump-major"));
    assert!(out.contains("drop-patch"));
}

#[test]
fn test_print_uses_default_store() {
    let dir = project("major=1\nminor=2\npatch=3\nartifact-type=SNAPSHOT\n");
    let output = semver_stamp(dir.path(), &["print"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "1.2.3-SNAPSHOT\n");
}

#[test]
fn test_bump_patch_persists() {
    let dir = project("major=1\nminor=2\npatch=3\nartifact-type=SNAPSHOT\n");
    let output = semver_stamp(dir.path(), &["bump-patch"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "1.2.4-SNAPSHOT\n");

    let text = fs::read_to_string(dir.path().join("gradle.properties")).unwrap();
    assert!(text.contains("patch=4\n"));
}

#[test]
fn test_remote_build_flags() {
    let dir = project("major=2\nminor=0\npatch=0\nartifact-type=BETA\n");
    let output = Command::new(env!("CARGO_BIN_EXE_semver-stamp"))
        .current_dir(dir.path())
        .env("CI_NUM", "42")
        .args(["--remote-build", "--build-number-var", "CI_NUM", "print"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2.0.0.42-BETA\n");
}

#[test]
fn test_missing_build_number_warns_but_succeeds() {
    let dir = project("major=2\nminor=0\npatch=0\nartifact-type=BETA\n");
    let output = semver_stamp(
        dir.path(),
        &["--remote-build", "--build-number-var", "CI_NUM", "print"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "2.0.0-BETA\n");
    assert!(stderr(&output).contains("CI_NUM"));
}

#[test]
fn test_custom_store_and_artifact_type() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("version.properties"),
        "major=0\nminor=9\npatch=0\n",
    )
    .unwrap();
    let output = semver_stamp(
        dir.path(),
        &["--store", "version.properties", "-t", "release", "print"],
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "0.9.0\n");
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = project("major=5\nminor=0\npatch=0\nartifact-type=LOCAL\n");
    fs::write(
        dir.path().join("semver-stamp.toml"),
        "artifact_type = \"canary\"\n",
    )
    .unwrap();
    let output = semver_stamp(dir.path(), &["print"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5.0.0-CANARY\n");
}

#[test]
fn test_missing_store_fails() {
    let dir = TempDir::new().unwrap();
    let output = semver_stamp(dir.path(), &["bump-minor"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("not found"));
    assert!(!dir.path().join("gradle.properties").exists());
}

#[test]
fn test_unparsable_field_fails() {
    let dir = project("major=x\nminor=0\npatch=0\n");
    let output = semver_stamp(dir.path(), &["print"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("major"));
}
