//! E2E tests for wrong input of parameters
//! Tests that invalid invocations fail with a diagnostic on stderr

use mapsweep_gis::{Session, config};
use std::process::{Command, Output};
use tempfile::TempDir;

const CLI_BINARY: &str = "target/debug/mapsweep-cli";

fn test_session() -> (TempDir, Session) {
    let dir = TempDir::new().unwrap();
    let session = Session::new(dir.path(), "test_location", "user1");
    session.create().unwrap();
    (dir, session)
}

fn run_module(session: &Session, args: &[&str]) -> Output {
    Command::new(CLI_BINARY)
        .args(args)
        .env(config::ENV_GISDBASE, session.gisdbase())
        .env(config::ENV_LOCATION, session.location())
        .env(config::ENV_MAPSET, session.mapset())
        .env_remove(config::ENV_CONFIG)
        .output()
        .unwrap_or_else(|_| panic!("Failed to execute {CLI_BINARY}"))
}

#[test]
fn test_re_flags_are_exclusive() {
    let (_dir, session) = test_session();

    let output = run_module(&session, &["-r", "-e", "-t", "rast", "-p", "xxxyyyzzz"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-r"));
    assert!(stderr.contains("-e"));
}

#[test]
fn test_missing_pattern_fails() {
    let (_dir, session) = test_session();

    let output = run_module(&session, &["-t", "rast"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--pattern"));
}

#[test]
fn test_unknown_type_fails() {
    let (_dir, session) = test_session();

    let output = run_module(&session, &["-t", "bogus", "-p", "x"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("bogus"));
}

#[test]
fn test_bad_pattern_fails() {
    let (_dir, session) = test_session();

    let output = run_module(&session, &["-p", "test_{apples"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("test_{apples"));
}

#[test]
fn test_missing_environment_fails() {
    let output = Command::new(CLI_BINARY)
        .args(["-p", "x"])
        .env_remove(config::ENV_GISDBASE)
        .env_remove(config::ENV_LOCATION)
        .env_remove(config::ENV_MAPSET)
        .env_remove(config::ENV_CONFIG)
        .output()
        .unwrap_or_else(|_| panic!("Failed to execute {CLI_BINARY}"));

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains(config::ENV_GISDBASE));
}

#[test]
fn test_missing_mapset_fails() {
    let dir = TempDir::new().unwrap();
    let session = Session::new(dir.path(), "test_location", "nosuch");

    let output = run_module(&session, &["-p", "x"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"));
    assert!(stderr.contains("nosuch"));
}
