#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]
//! Configuration files and command-line overrides

use std::path::PathBuf;

use assert_matches::assert_matches;
use loginwatch_terminal::{TerminalConfig, TerminalError};
use tempfile::TempDir;

#[test]
fn test_explicit_file_is_loaded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loginwatch.toml");
    std::fs::write(
        &path,
        "data_file = \"/var/lib/loginwatch/state.txt\"\nautosave_on_exit = false\n",
    )
    .unwrap();

    let config = TerminalConfig::resolve(Some(&path)).unwrap();

    let expected = PathBuf::from("/var/lib/loginwatch/state.txt");
    assert_eq!(config.data_file, expected);
    assert!(!config.autosave_on_exit);
    assert!(config.load_on_start);
    assert_eq!(config.log_level, "info");
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = TerminalConfig::resolve(Some(&missing)).unwrap_err();

    assert_matches!(err, TerminalError::Config(msg) if msg.contains("nope.toml"));
}

#[test]
fn test_bad_value_type_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "load_on_start = \"sometimes\"\n").unwrap();

    assert_matches!(TerminalConfig::load(&path), Err(TerminalError::Config(_)));
}

#[test]
fn test_cli_overrides_win_over_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("loginwatch.toml");
    let text = "data_file = \"from-file.txt\"\nlog_level = \"warn\"\n";
    std::fs::write(&path, text).unwrap();

    let config = TerminalConfig::resolve(Some(&path))
        .unwrap()
        .with_overrides(Some(PathBuf::from("from-cli.txt")), true);

    assert_eq!(config.data_file, PathBuf::from("from-cli.txt"));
    assert_eq!(config.log_level, "debug");
}

#[test]
fn test_empty_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.toml");
    std::fs::write(&path, "").unwrap();

    let config = TerminalConfig::load(&path).unwrap();
    assert_eq!(config, TerminalConfig::default());
}
