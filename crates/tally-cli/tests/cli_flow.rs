//! End-to-end tests for the `tally` binary.
//!
//! Each test isolates `HOME`/`XDG_CONFIG_HOME` in a temp dir so a user's
//! own config never leaks in.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::{NamedTempFile, TempDir};

fn tally_binary() -> String {
    env!("CARGO_BIN_EXE_tally").to_string()
}

fn tally(home: &TempDir) -> Command {
    let mut cmd = Command::new(tally_binary());
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("RUST_LOG");
    for (key, _) in std::env::vars() {
        if key.starts_with("TALLY_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run_with_stdin(mut cmd: Command, stdin: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tally");
    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().expect("failed to wait for tally")
}

/// A multi-burst config replays the documented timeline to one count.
#[test]
fn test_replay_file_with_config() {
    let home = TempDir::new().unwrap();
    let config = write_config("rapid_mode = false\namount = 2\nidle_ms = 500\n");
    let script = write_config(
        r#"{"input": {"type": "key_down", "code": 44, "timestamp_ms": 0}}
{"input": {"type": "key_down", "code": 44, "timestamp_ms": 100}}
{"input": {"type": "key_down", "code": 44, "timestamp_ms": 700}}
{"input": {"type": "key_down", "code": 44, "timestamp_ms": 1300}}
"#,
    );

    let output = tally(&home)
        .arg("--config")
        .arg(config.path())
        .arg("replay")
        .arg(script.path())
        .output()
        .expect("failed to run tally replay");

    assert!(
        output.status.success(),
        "replay failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Multi-Burst Count (2 bursts met)"), "{stdout}");
    assert_eq!(stdout.lines().last(), Some("final count 1"));
}

/// Scripts can be piped on stdin and emit JSON lines.
#[test]
fn test_replay_stdin_json() {
    let home = TempDir::new().unwrap();
    let mut cmd = tally(&home);
    cmd.arg("replay").arg("--json");
    let output = run_with_stdin(
        cmd,
        "{\"control\": \"increment\"}\n{\"control\": \"increment\"}\n",
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for line in stdout.lines() {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert!(value.get("kind").is_some());
    }
    assert_eq!(stdout.lines().last(), Some(r#"{"kind":"count","value":2}"#));
}

/// Environment variables override the config file.
#[test]
fn test_env_overrides_config() {
    let home = TempDir::new().unwrap();
    let config = write_config("rapid_mode = false\namount = 5\n");

    let output = tally(&home)
        .env("TALLY_AMOUNT", "3")
        .arg("--config")
        .arg(config.path())
        .arg("mode")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.starts_with("Mode: Multi-Click (Count every 3 presses)"),
        "{stdout}"
    );
}

/// An unknown mouse code is a startup error, not a panic.
#[test]
fn test_invalid_tracked_input_fails_gracefully() {
    let home = TempDir::new().unwrap();
    let config = write_config("input_type = \"mouse\"\ninput_code = 9\n");

    let mut cmd = tally(&home);
    cmd.arg("--config").arg(config.path()).arg("replay");
    let output = run_with_stdin(cmd, "");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown mouse input code: 9"), "{stderr}");
}

/// The interactive driver honours the hotkey tokens and quits on delete.
#[test]
fn test_watch_hotkeys() {
    let home = TempDir::new().unwrap();
    let mut cmd = tally(&home);
    cmd.arg("watch");
    let output = run_with_stdin(cmd, "=\n=\n-\n9\n=\n9\ndelete\n");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let counts: Vec<&str> = stdout.lines().filter(|l| l.starts_with("count ")).collect();
    assert_eq!(counts, vec!["count 0", "count 1", "count 2", "count 1"]);
    assert!(stdout.contains("paused"));
    assert!(stdout.contains("resumed"));
}
