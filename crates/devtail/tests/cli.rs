//! End-to-end CLI tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn devtail(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("devtail").unwrap();
    cmd.current_dir(dir.path());
    cmd.env_remove("DEVTAIL_SESSION");
    cmd
}

fn latest_session(dir: &TempDir) -> PathBuf {
    std::fs::canonicalize(dir.path().join("tmp/logs/latest")).unwrap()
}

fn session_dirs(dir: &TempDir) -> Vec<PathBuf> {
    std::fs::read_dir(dir.path().join("tmp/logs"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_dir()).unwrap_or(false))
        .map(|e| e.path())
        .collect()
}

#[test]
fn init_creates_session_and_latest_link() {
    let dir = TempDir::new().unwrap();

    let assert = devtail(&dir).arg("init").assert().success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let session_dir = PathBuf::from(stdout.trim());
    assert!(session_dir.is_dir());
    assert!(session_dir.join("browser.log").is_file());

    let link = dir.path().join("tmp/logs/latest");
    assert!(std::fs::symlink_metadata(&link)
        .unwrap()
        .file_type()
        .is_symlink());
}

#[test]
fn init_respects_max_sessions() {
    let dir = TempDir::new().unwrap();

    for _ in 0..4 {
        devtail(&dir)
            .args(["init", "--max-sessions", "2"])
            .assert()
            .success();
    }

    assert_eq!(session_dirs(&dir).len(), 2);
}

#[test]
fn init_respects_log_dir_override() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["init", "--log-dir", "var/devlogs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("var/devlogs"));

    assert!(dir.path().join("var/devlogs/latest").exists());
}

#[test]
fn run_two_services_produces_all_logs() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["run", "a: echo from-a", "b: echo from-b"])
        .assert()
        .success();

    let session = latest_session(&dir);
    let a = std::fs::read_to_string(session.join("a.log")).unwrap();
    let b = std::fs::read_to_string(session.join("b.log")).unwrap();
    assert_eq!(a, "from-a\n");
    assert_eq!(b, "from-b\n");

    let combined = std::fs::read_to_string(session.join("combined.log")).unwrap();
    assert!(combined.contains("[a] from-a"));
    assert!(combined.contains("[b] from-b"));
}

#[test]
fn run_rejects_invalid_service_syntax() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["run", "no-colon-here"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name: command"));

    // Nothing written to disk
    assert!(!dir.path().join("tmp/logs").exists());
}

#[test]
fn run_exits_zero_even_when_a_service_fails() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["run", "bad: exit 9", "good: echo fine"])
        .assert()
        .success();

    let session = latest_session(&dir);
    let good = std::fs::read_to_string(session.join("good.log")).unwrap();
    assert_eq!(good, "fine\n");
}

#[test]
fn run_mute_suppresses_combined_but_not_own_log() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args([
            "run",
            "--mute",
            "quiet",
            "loud: echo loud-line",
            "quiet: echo quiet-line",
        ])
        .assert()
        .success();

    let session = latest_session(&dir);
    let combined = std::fs::read_to_string(session.join("combined.log")).unwrap();
    assert!(combined.contains("[loud] loud-line"));
    assert!(!combined.contains("quiet-line"));

    let quiet = std::fs::read_to_string(session.join("quiet.log")).unwrap();
    assert_eq!(quiet, "quiet-line\n");
}

#[test]
fn run_exclude_drops_lines_everywhere() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args([
            "run",
            "--exclude",
            "noise",
            "a: printf 'keep\\nnoise here\\n'",
        ])
        .assert()
        .success();

    let session = latest_session(&dir);
    let a = std::fs::read_to_string(session.join("a.log")).unwrap();
    assert_eq!(a, "keep\n");
    let combined = std::fs::read_to_string(session.join("combined.log")).unwrap();
    assert_eq!(combined, "[a] keep\n");
}

#[test]
fn run_no_combined_flag() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["run", "--no-combined", "a: echo hi"])
        .assert()
        .success();

    let session = latest_session(&dir);
    assert!(!session.join("combined.log").exists());
    assert!(session.join("a.log").is_file());
}

#[test]
fn wrap_captures_output_and_echoes() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["wrap", "web", "--", "echo", "hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello"));

    let session = latest_session(&dir);
    let web = std::fs::read_to_string(session.join("web.log")).unwrap();
    assert_eq!(web, "hello\n");
}

#[test]
fn wrap_propagates_exit_code() {
    let dir = TempDir::new().unwrap();

    devtail(&dir)
        .args(["wrap", "failing", "--", "false"])
        .assert()
        .code(1);
}

#[test]
fn wrap_joins_existing_session() {
    let dir = TempDir::new().unwrap();

    devtail(&dir).arg("init").assert().success();
    devtail(&dir)
        .args(["wrap", "web", "--", "echo", "joined"])
        .assert()
        .success();

    // Reused the session created by init instead of making a second one
    assert_eq!(session_dirs(&dir).len(), 1);
    let session = latest_session(&dir);
    assert!(session.join("browser.log").is_file());
    assert!(session.join("web.log").is_file());
}

#[test]
fn wrap_requires_a_command() {
    let dir = TempDir::new().unwrap();

    devtail(&dir).args(["wrap", "lonely"]).assert().failure();
}

#[test]
fn config_file_sets_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("devtail.toml"), "log_dir = \"custom/logs\"\n").unwrap();

    devtail(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("custom/logs"));
}

#[test]
fn cli_flag_overrides_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("devtail.toml"), "log_dir = \"custom/logs\"\n").unwrap();

    devtail(&dir)
        .args(["init", "--log-dir", "flag/logs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flag/logs"));

    assert!(!dir.path().join("custom/logs").exists());
}
