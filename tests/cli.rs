//! Integration tests for the `convert` command.

#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const PAYLOAD: &str = "<html><body><!--StartFragment-->\
                       <div><span style=\"color: #cd3131;\">error </span></div>\
                       <div><span>next</span></div>\
                       <!--EndFragment--></body></html>";

#[test]
fn converts_stdin_to_stdout() {
    Command::cargo_bin("ansicopy")
        .unwrap()
        .arg("convert")
        .write_stdin(PAYLOAD)
        .assert()
        .success()
        .stdout("\x1b[31merror \x1b[0m\nnext");
}

#[test]
fn converts_file_to_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("copy.html");
    let output = dir.path().join("copy.ans");
    fs::write(&input, PAYLOAD).unwrap();

    Command::cargo_bin("ansicopy")
        .unwrap()
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&output).unwrap(), "\x1b[31merror \x1b[0m\nnext");
}

#[test]
fn blank_input_writes_nothing() {
    Command::cargo_bin("ansicopy")
        .unwrap()
        .arg("convert")
        .write_stdin("  \n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_input_file_fails_with_context() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("ansicopy")
        .unwrap()
        .arg("convert")
        .arg(dir.path().join("nope.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.html"));
}
