//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn petfamily(dir: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("petfamily").unwrap();
    // Keep the caller's .env, config file and DATABASE_URL out of the way
    cmd.current_dir(dir.path())
        .env_remove("DATABASE_URL")
        .env_remove("PETFAMILY_CONFIG")
        .env_remove("PETFAMILY_BIND");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    petfamily(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let dir = tempfile::tempdir().unwrap();
    petfamily(&dir)
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--max-connections"))
        .stdout(predicate::str::contains("--migrate"));
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    petfamily(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_migrate_without_database_url_fails() {
    let dir = tempfile::tempdir().unwrap();
    petfamily(&dir)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let dir = tempfile::tempdir().unwrap();
    petfamily(&dir)
        .args(["serve", "--bind", "not-an-address"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bind"));
}

#[test]
fn test_broken_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("petfamily.toml"), "[server\n").unwrap();
    petfamily(&dir)
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config file"));
}
