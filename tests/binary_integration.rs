// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the bridgelog binary.
//!
//! The binary reads one JSON call per stdin line, prints each result on
//! stdout and reports failures on stderr.

use serial_test::serial;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::thread;

mod common;
use common::{JsonFileSetup, context_of};

fn run_binary(envs: &[(&str, &str)], input: &str) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_bridgelog"));
    command
        .env_remove("BRIDGELOG_CONFIG_FILE")
        .env_remove("BRIDGELOG_APP_NAME")
        .env("RUST_LOG", "warn")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in envs {
        command.env(key, value);
    }

    let mut child = command.spawn().expect("failed to start bridgelog binary");
    let mut stdin = child.stdin.take().expect("stdin");
    let input = input.to_string();
    // the child fills stdout while it is still reading stdin
    let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

    let output = child.wait_with_output().expect("wait for bridgelog binary");
    writer.join().expect("stdin writer").expect("write stdin");
    output
}

#[test]
#[serial]
fn test_binary_dispatches_lines() {
    let setup = JsonFileSetup::new("info", "");

    let input = concat!(
        r#"{"method": "log", "args": ["error", "payment failed", {"order": 7}]}"#,
        "\n",
        r#"{"method": "log", "args": ["payment retried", 4, "billing"]}"#,
        "\n",
        r#"{"method": "debug", "args": ["below threshold"]}"#,
        "\n",
        r#"{"method": "get_name"}"#,
        "\n",
    );

    let output = run_binary(&[("BRIDGELOG_CONFIG_FILE", setup.config_path_str())], input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let results: Vec<&str> = stdout.lines().collect();
    assert_eq!(results, vec!["true", "true", "false", "\"integration\""]);

    let records = setup.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["msg"], "payment failed");
    assert_eq!(context_of(&records[0]), serde_json::json!({"order": 7}));
    assert_eq!(records[1]["msg"], "payment retried");
    assert_eq!(context_of(&records[1]), serde_json::json!({"category": "billing"}));
}

#[test]
#[serial]
fn test_binary_reports_bad_lines_and_continues() {
    let input = concat!(
        "not json\n",
        r#"{"method": "rotate", "args": []}"#,
        "\n",
        r#"{"method": "get_name"}"#,
        "\n",
    );

    let output = run_binary(&[("BRIDGELOG_APP_NAME", "cli")], input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "\"cli\"");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 1: invalid call"));
    assert!(stderr.contains("line 2"));
    assert!(stderr.contains("rotate"));
}

#[test]
#[serial]
fn test_binary_missing_config_file_error() {
    let output = run_binary(
        &[("BRIDGELOG_CONFIG_FILE", "/nonexistent/bridgelog.toml")],
        "",
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to build bridge"));
}

#[test]
#[serial]
fn test_binary_with_stdout_json_handler_writes_every_record() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("stdout.toml");
    std::fs::write(
        &config_path,
        "[logger]\nname = \"piped\"\n\n[[logger.handlers]]\ntype = \"json\"\n",
    )
    .unwrap();

    let input: String = (0..2000)
        .map(|i| format!("{{\"method\": \"info\", \"args\": [\"m{i}\"]}}\n"))
        .collect();

    let output = run_binary(
        &[("BRIDGELOG_CONFIG_FILE", config_path.to_str().unwrap())],
        &input,
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let results = stdout.lines().filter(|l| *l == "true").count();
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(results, 2000);
    assert_eq!(records.len(), 2000);
    assert_eq!(records[0]["msg"], "m0");
    assert_eq!(records[1999]["msg"], "m1999");
    assert_eq!(records[1999]["channel"], "piped");
}
