#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Binary under test, with HOME pointed at a per-test directory so the
/// user's real configuration is never read or written.
pub fn rtp(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("rtripplanner");
    cmd.env("HOME", home).env("APPDATA", home).env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtripplanner.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty home directory for one test
pub fn setup_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rtripplanner_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path.to_string_lossy().to_string()
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Fresh home + database, initialized through the CLI
pub fn init_env(name: &str) -> (String, String) {
    let home = setup_home(name);
    let db = setup_test_db(name);
    rtp(&home)
        .args(["--db", &db, "--test", "init"])
        .assert()
        .success();
    (home, db)
}

/// Run a command against `db` and assert it succeeded
pub fn ok(home: &str, db: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut full = vec!["--db", db];
    full.extend_from_slice(args);
    rtp(home).args(full).assert().success()
}

/// Export every trip as JSON and parse it back
pub fn snapshot(home: &str, db: &str, name: &str) -> serde_json::Value {
    let out = temp_out(name, "json");
    ok(home, db, &["export", "--format", "json", "--file", &out, "--force"]);
    let raw = fs::read_to_string(&out).expect("read snapshot");
    serde_json::from_str(&raw).expect("parse snapshot")
}

/// Id of the active trip, read from a JSON export
pub fn active_trip_id(home: &str, db: &str, name: &str) -> String {
    snapshot(home, db, name)["activeTripId"]
        .as_str()
        .expect("active trip id")
        .to_string()
}
