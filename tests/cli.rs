//! End-to-end tests of the cmdkit binary

#![cfg(unix)]

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

/// cmdkit invocation isolated from user config files
fn cmdkit(workdir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("cmdkit").expect("binary should build");
    cmd.current_dir(workdir)
        .env("HOME", workdir)
        .env("XDG_CONFIG_HOME", workdir.join(".config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_run_streams_stdout() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["run", "echo hello"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_run_joins_words() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["run", "printf", "'%s-%s'", "a", "b"])
        .assert()
        .success()
        .stdout("a-b");
}

#[test]
fn test_run_propagates_exit_code() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["run", "echo partial; exit 3"])
        .assert()
        .code(3)
        .stdout("partial\n");
}

#[test]
fn test_run_spawn_failure() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["run", "__not_a_real_binary__"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Failed to spawn process"));
}

#[test]
fn test_run_large_output_with_small_chunks() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["run", "--chunk-size", "7", &common::numbered_lines_command(50)])
        .assert()
        .success()
        .stdout(predicate::str::diff(common::numbered_lines_output(50)));
}

#[test]
fn test_run_verbose_summary() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["-v", "run", "echo hi"])
        .assert()
        .success()
        .stdout("hi\n")
        .stderr(predicate::str::contains("3 bytes"));
}

#[test]
fn test_exec_plain() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["exec", "echo 'hello' && echo 'world'"])
        .assert()
        .success()
        .stdout("hello\nworld\n");
}

#[test]
fn test_exec_json() {
    let dir = common::create_workdir();

    let output = cmdkit(dir.path())
        .args(["exec", "--format", "json", "echo json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["stdout"], "json\n");
    assert_eq!(value["success"], true);
    assert_eq!(value["command"], "echo json");
}

#[test]
fn test_exec_json_spawn_failure() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["exec", "-f", "json", "__not_a_real_binary__"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"error_type\": \"process_spawn\""));
}

#[test]
fn test_which_finds_sh() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["which", "sh"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("sh\n"));
}

#[test]
fn test_which_missing() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["which", "--format", "json", "__not_a_real_binary__"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"found\": false"));
}

#[test]
fn test_copy_blob() {
    let blob = common::sample_blob();
    let (dir, source) = common::create_blob("in.bin", &blob);
    let destination = dir.path().join("out.bin");

    cmdkit(dir.path())
        .args([
            "copy",
            source.to_str().unwrap(),
            destination.to_str().unwrap(),
        ])
        .assert()
        .success();

    assert_eq!(std::fs::read(&destination).unwrap(), blob);
}

#[test]
fn test_copy_missing_source() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["copy", "missing.bin", "out.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File does not exist"));

    assert!(!dir.path().join("out.bin").exists());
}

#[test]
fn test_config_defaults_json() {
    let dir = common::create_workdir();

    cmdkit(dir.path())
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"chunk_size\": 128"));
}

#[test]
fn test_config_override_and_env() {
    let (dir, config) = common::create_config(
        r#"
        [exec]
        chunk_size = 32
        "#,
    );

    cmdkit(dir.path())
        .args(["-c", config.to_str().unwrap(), "config"])
        .env("CMDKIT_LOGGING__LEVEL", "error")
        .assert()
        .success()
        .stdout(predicate::str::contains("chunk_size = 32"))
        .stdout(predicate::str::contains("level = \"error\""));
}

#[test]
fn test_invalid_config_is_reported() {
    let (dir, config) = common::create_config(
        r#"
        [exec]
        chunk_size = 0
        "#,
    );

    cmdkit(dir.path())
        .args(["-c", config.to_str().unwrap(), "run", "echo unreachable"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("chunk_size"));
}
