//! Integration tests for the hookchain binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn workspace(config: &str) -> TempDir {
    let temp_dir = tempfile::Builder::new()
        .prefix("hookchain_test_")
        .tempdir()
        .expect("Failed to create temp directory");
    fs::write(temp_dir.path().join("hookchain.toml"), config).unwrap();
    temp_dir
}

fn hookchain(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("hookchain").unwrap();
    cmd.current_dir(dir)
        .env_remove("HOOKCHAIN_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn commit_msg_hooks_rewrite_the_message_file() {
    let dir = workspace(
        r#"
[hooks]
commit-msg = [{ message-prefix = { prefix = "[ABC-1]" } }]
"#,
    );
    let message = dir.path().join("COMMIT_EDITMSG");
    fs::write(&message, "init\n").unwrap();

    hookchain(dir.path())
        .args(["run", "commit-msg"])
        .arg(&message)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "   HOOK  Commit message prefix: loading...\n   HOOK  Commit message prefix: ✔\n",
        ));

    assert_eq!(fs::read_to_string(&message).unwrap(), "[ABC-1] init\n");
}

#[test]
fn non_utf8_message_passes_checks_unchanged() {
    let dir = workspace(
        r#"
[hooks]
commit-msg = [{ message-pattern = { pattern = "^caf" } }]
"#,
    );
    let message = dir.path().join("COMMIT_EDITMSG");
    let latin1 = b"caf\xe9\n".to_vec();
    fs::write(&message, &latin1).unwrap();

    hookchain(dir.path())
        .args(["run", "commit-msg"])
        .arg(&message)
        .assert()
        .success();

    assert_eq!(fs::read(&message).unwrap(), latin1);
}

#[cfg(unix)]
#[test]
fn failing_command_aborts_with_status_one() {
    let dir = workspace(
        r#"
[hooks]
pre-commit = [
    { command = { program = "sh", args = ["-c", "echo lint errors; exit 1"], name = "Lint" } },
    { command = { program = "sh", args = ["-c", "exit 0"], name = "Never runs" } },
]
"#,
    );

    hookchain(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("   HOOK  Lint: failed\n"))
        .stdout(predicate::str::contains("Never runs").not())
        .stderr(predicate::str::contains("lint errors"));
}

#[cfg(unix)]
#[test]
fn later_failure_keeps_earlier_success_lines() {
    let dir = workspace(
        r#"
[hooks]
pre-push = [
    { command = { program = "sh", args = ["-c", "exit 0"], name = "Build" } },
    { command = { program = "sh", args = ["-c", "echo 2 tests failed >&2; exit 4"], name = "Test" } },
]
"#,
    );

    hookchain(dir.path())
        .args(["run", "pre-push", "origin"])
        .assert()
        .code(1)
        .stdout(
            "   HOOK  Build: loading...\n   HOOK  Build: ✔\n\
             \x20  HOOK  Test: loading...\n   HOOK  Test: failed\n",
        )
        .stderr(predicate::str::contains("2 tests failed"));
}

#[test]
fn unknown_hook_fails_before_any_status_line() {
    let dir = workspace("[hooks]\npre-commit = [\"does-not-exist\"]\n");

    hookchain(dir.path())
        .args(["run", "pre-commit"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("does-not-exist"));
}

#[test]
fn unknown_event_is_a_usage_error() {
    let dir = workspace("[hooks]\n");

    hookchain(dir.path())
        .args(["run", "pre-everything"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pre-everything"));
}

#[test]
fn explicit_config_path_is_used() {
    let dir = workspace("[hooks]\npre-commit = [\"does-not-exist\"]\n");
    let custom = dir.path().join("custom.toml");
    fs::write(
        &custom,
        "[hooks]\npost-merge = [{ command = { program = \"true\", name = \"Noop\" } }]\n",
    )
    .unwrap();

    hookchain(dir.path())
        .args(["list", "--config"])
        .arg(&custom)
        .assert()
        .success()
        .stdout("post-merge\n  1. Noop (command)\n");
}

#[test]
fn missing_message_file_is_an_io_error() {
    let dir = workspace(
        r#"
[hooks]
commit-msg = [{ message-prefix = { prefix = "[ABC-1]" } }]
"#,
    );

    hookchain(dir.path())
        .args(["run", "commit-msg", "missing-file"])
        .assert()
        .code(3)
        .stdout(predicate::str::is_empty());
}

#[test]
fn no_configuration_means_nothing_to_run() {
    let dir = tempfile::tempdir().unwrap();

    hookchain(dir.path())
        .args(["run", "pre-push", "origin", "git@example.com:repo.git"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
