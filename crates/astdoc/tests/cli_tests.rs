// AstDoc - Solidity AST Documentation Extractor
// Copyright (C) 2024 Zhuo Zhang and Wuqi Zhang
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use tracing::info;

const TESTDATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../engine/tests/testdata");

/// Lays out a project directory with the compiler artifacts under `cache/`.
fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("cache");
    fs::create_dir_all(&cache).unwrap();
    for artifact in ["solc-input.json", "solc-output.json"] {
        fs::copy(Path::new(TESTDATA).join(artifact), cache.join(artifact)).unwrap();
    }
    dir
}

fn astdoc(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("astdoc").unwrap();
    cmd.current_dir(dir)
        .env_remove("ASTDOC_CACHE_DIR")
        .env_remove("ASTDOC_DIR")
        .env("HOME", dir)
        .arg("--no-file-log");
    cmd
}

#[test]
fn test_help_command() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");

    let mut cmd = Command::cargo_bin("astdoc").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("documentation model"))
        .stdout(predicate::str::contains("--cache-dir"));
}

#[test]
fn test_version_command() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");
    let mut cmd = Command::cargo_bin("astdoc").unwrap();
    cmd.arg("--version").assert().success().stdout(predicate::str::contains("astdoc"));
}

#[test]
fn test_writes_default_location() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = project();

    astdoc(dir.path()).assert().success();

    let written = fs::read_to_string(dir.path().join("ast-docs/ast-docs.json")).unwrap();
    assert!(written.starts_with("{\n    \"contracts/Parent.sol\": {"));
    let document: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(
        document["contracts/Child.sol"]["contracts"]["Child"]["inherits"],
        serde_json::json!(["Parent", "IChild"])
    );
    assert_eq!(
        document["contracts/Parent.sol"]["contracts"]["Parent"]["functions"][0]["requires"][0]["name"],
        "require(..., ok)"
    );
}

#[test]
fn test_flags_override_locations() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = project();
    fs::rename(dir.path().join("cache"), dir.path().join("build")).unwrap();

    astdoc(dir.path())
        .args(["--cache-dir", "build", "--ast-doc-dir", "out", "--output-name", "docs.json"])
        .assert()
        .success();

    assert!(dir.path().join("out/docs.json").exists());
    assert!(!dir.path().join("ast-docs").exists());
}

#[test]
fn test_config_file_sets_indent() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = project();
    fs::write(dir.path().join("astdoc.toml"), "[output]\nindent = 2\nfile = \"two.json\"\n")
        .unwrap();

    astdoc(dir.path()).assert().success();

    let written = fs::read_to_string(dir.path().join("ast-docs/two.json")).unwrap();
    assert!(written.starts_with("{\n  \"contracts/Parent.sol\": {"));
}

#[test]
fn test_missing_artifacts_fail() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = tempfile::tempdir().unwrap();

    astdoc(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("solc-input.json"));
}

#[test]
fn test_missing_explicit_config_fails() {
    astdoc_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = project();

    astdoc(dir.path())
        .args(["--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}
