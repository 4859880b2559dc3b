use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_config_path_command() {
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_creates_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    assert!(!config_path.exists());

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config at"));

    let contents = fs::read_to_string(&config_path).unwrap();
    assert!(contents.contains("# api_url ="));
    assert!(contents.contains("request_timeout_secs"));
}

#[test]
fn test_config_init_fails_if_exists() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(&config_path, "# existing config").unwrap();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(&config_path).unwrap(), "# existing config");
}

#[test]
fn test_broken_config_still_prints_path() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "api_url = [").unwrap();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .args(["config", "path"])
        .assert()
        .success();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .args(["plain", "--no-start"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("load config"));
}
