// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Write;
use yare::parameterized;

#[test]
fn defaults_apply_when_only_name_given() {
    let config = SemaphoreConfig::from_toml(r#"name = "/jobs""#).unwrap();
    assert_eq!(config, SemaphoreConfig::new("/jobs"));
    assert_eq!(config.mode, 0o644);
    assert_eq!(config.initial_value, 1);
}

#[parameterized(
    integer = { "mode = 416", 0o640 },
    octal_string = { r#"mode = "0600""#, 0o600 },
    prefixed_octal = { r#"mode = "0o660""#, 0o660 },
)]
fn mode_forms(line: &str, expected: u32) {
    let content = format!("name = \"/m\"\n{}\n", line);
    let config = SemaphoreConfig::from_toml(&content).unwrap();
    assert_eq!(config.mode, expected);
}

#[test]
fn rejects_non_octal_mode() {
    let err = SemaphoreConfig::from_toml("name = \"/m\"\nmode = \"0800\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn rejects_missing_name() {
    let err = SemaphoreConfig::from_toml("initial_value = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "name = \"/slots\"\ninitial_value = 4").unwrap();

    let config = SemaphoreConfig::from_file(file.path()).unwrap();
    assert_eq!(
        config,
        SemaphoreConfig::new("/slots").with_initial_value(4)
    );
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = SemaphoreConfig::from_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert!(reported.ends_with("absent.toml")),
        other => panic!("unexpected error: {other:?}"),
    }
}
