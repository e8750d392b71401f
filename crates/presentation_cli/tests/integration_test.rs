//! Integration tests for CLI
//!
//! These tests run the built binary with a scratch working directory so no
//! local `interview.toml` is picked up.

use std::{
    io::Write,
    process::{Command, Output, Stdio},
};

fn cli(dir: &tempfile::TempDir, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_interview-cli"))
        .args(args)
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env("INTERVIEW_SPEECH__RATE", "50")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn config_prints_effective_toml() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir, &["config"], "");

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[interview]"));
    assert!(text.contains("silence_timeout_ms = 2000"));
    assert!(text.contains("rate = 50"));
}

#[test]
fn config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[interview]\nrearm_delay_ms = 750\n").unwrap();

    let output = cli(&dir, &["config", "--config", path.to_str().unwrap()], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("rearm_delay_ms = 750"));
}

#[test]
fn missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir, &["config", "--config", "nope.toml"], "");
    assert!(!output.status.success());
}

#[test]
fn voices_marks_selected_voice() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir, &["voices"], "");

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("* Google UK English Female (en-GB, female)"));
    assert!(text.contains("  Daniel (en-GB, male)"));
}

#[test]
fn interview_ends_when_input_closes() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir, &["interview", "--scripted", "--session-token", "t-1"], "");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Interview ended."));
}

#[test]
fn interview_stop_command_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let output = cli(&dir, &["interview", "--scripted"], "/stop\n");

    assert!(output.status.success());
    assert!(stdout(&output).contains("Interview ended."));
}
