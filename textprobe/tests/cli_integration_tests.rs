// textprobe/tests/cli_integration_tests.rs
//! Command-line integration tests for the `textprobe` binary.
//!
//! Each test runs the built executable through `assert_cmd`, with files laid
//! out in a `tempfile` directory, and asserts on the JSON written to stdout and
//! on the exit code.

use anyhow::Result;
use assert_cmd::Command;
#[allow(unused_imports)]
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn textprobe() -> Command {
    let mut cmd = Command::cargo_bin("textprobe").unwrap();
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn stdout_json(output: &std::process::Output) -> Result<Value> {
    Ok(serde_json::from_slice(&output.stdout)?)
}

#[test]
fn test_probe_inline_filepath() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("data");
    fs::write(&file, "abc123def456")?;

    let output = textprobe()
        .args(["probe", "--filepath"])
        .arg(&file)
        .args(["--pattern", "[0-9]+", "--instance", "2"])
        .output()?;
    assert!(output.status.success());

    let json = stdout_json(&output)?;
    assert_eq!(json["flag"], "complete");
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["text"], "456");
    assert_eq!(items[0]["instance"], 2);
    assert_eq!(items[0]["line"], "[0-9]+");
    Ok(())
}

#[test]
fn test_probe_object_file_with_captures() -> Result<()> {
    let dir = tempdir()?;
    fs::write(dir.path().join("sshd_config"), "Port 22\nPermitRootLogin no\n")?;
    let object = dir.path().join("object.yaml");
    fs::write(
        &object,
        format!(
            "path: {}\nfilename: sshd_config\npattern: '^PermitRootLogin\\s+(\\S+)'\ninstance:\n  operation: greater than or equal\n  value: 1\n",
            dir.path().display()
        ),
    )?;

    let output = textprobe().args(["probe", "--object"]).arg(&object).output()?;
    assert!(output.status.success());

    let json = stdout_json(&output)?;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["subexpression"][0], "no");
    assert_eq!(items[0]["filename"], "sshd_config");
    Ok(())
}

#[test]
fn test_missing_pattern_exits_with_usage_code() -> Result<()> {
    textprobe()
        .args(["probe", "--filepath", "/etc/hosts", "--instance", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pattern"));
    Ok(())
}

#[test]
fn test_invalid_pattern_reports_error_flag() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("data");
    fs::write(&file, "abc")?;

    let output = textprobe()
        .args(["probe", "--filepath"])
        .arg(&file)
        .args(["--pattern", "(", "--instance", "1"])
        .output()?;
    assert_eq!(output.status.code(), Some(1));

    let json = stdout_json(&output)?;
    assert_eq!(json["flag"], "error");
    assert_eq!(json["items"].as_array().unwrap().len(), 0);
    assert_eq!(json["messages"].as_array().unwrap().len(), 1);
    Ok(())
}

#[test]
fn test_missing_file_yields_no_items() -> Result<()> {
    let dir = tempdir()?;
    let output = textprobe()
        .args(["probe", "--path"])
        .arg(dir.path())
        .args(["--filename", "absent", "--pattern", "x", "--instance", "1"])
        .output()?;
    assert!(output.status.success());

    let json = stdout_json(&output)?;
    assert_eq!(json["flag"], "complete");
    assert!(json["items"].as_array().unwrap().is_empty());
    Ok(())
}

#[test]
fn test_ignore_case_and_operation_flags() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("data");
    fs::write(&file, "Key key KEY")?;

    let output = textprobe()
        .args(["-q", "probe", "--filepath"])
        .arg(&file)
        .args(["--pattern", "key", "--ignore-case", "--instance", "1", "--operation", "greater-than"])
        .output()?;
    assert!(output.status.success());
    assert!(output.stderr.is_empty());

    let json = stdout_json(&output)?;
    let ordinals: Vec<i64> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["instance"].as_i64().unwrap())
        .collect();
    assert_eq!(ordinals, vec![2, 3]);
    Ok(())
}

#[test]
fn test_out_writes_result_file() -> Result<()> {
    let dir = tempdir()?;
    let file = dir.path().join("data");
    fs::write(&file, "one")?;
    let out = dir.path().join("result.json");

    textprobe()
        .args(["probe", "--filepath"])
        .arg(&file)
        .args(["--pattern", "one", "--instance", "1", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: Value = serde_json::from_str(&fs::read_to_string(&out)?)?;
    assert_eq!(json["items"][0]["text"], "one");
    Ok(())
}

#[test]
fn test_check_prints_resolved_object() -> Result<()> {
    let output = textprobe()
        .args(["check", "--filepath", "/etc/hosts", "--pattern", "a", "--instance", "1", "--backend", "regex"])
        .output()?;
    assert!(output.status.success());

    let json = stdout_json(&output)?;
    assert_eq!(json["backend"], "regex");
    assert_eq!(json["object"]["pattern"], "a");
    assert_eq!(json["object"]["behaviors"]["recurse_direction"], "none");
    Ok(())
}

#[test]
fn test_check_rejects_bad_pattern() -> Result<()> {
    textprobe()
        .args(["check", "--filepath", "/etc/hosts", "--pattern", "[", "--instance", "1", "--backend", "regex"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to compile pattern"));
    Ok(())
}

#[cfg(not(feature = "pcre2"))]
#[test]
fn test_pcre2_unavailable_without_feature() -> Result<()> {
    textprobe()
        .args(["check", "--filepath", "/etc/hosts", "--pattern", "a", "--instance", "1", "--backend", "pcre2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not available"));
    Ok(())
}

#[test]
fn test_operation_requires_instance() {
    textprobe()
        .args(["probe", "--filepath", "/etc/hosts", "--pattern", "a", "--operation", "equals"])
        .assert()
        .code(2);
}
