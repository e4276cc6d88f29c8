//! End-to-end tests driving the `configlite` binary.

use assert_cmd::Command;
use configlite::config::DB_ENV_VAR;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn db_path(dir: &TempDir) -> PathBuf {
    dir.path().join("config.db")
}

fn configlite(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("configlite").unwrap();
    cmd.env_remove(DB_ENV_VAR)
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(db)
        .arg("--no-color");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn upsert_then_list_configs_as_json() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["upsert-config", "svc", "timeout", "30"])
        .assert()
        .success();
    configlite(&db)
        .args(["uc", "svc", "retries", "3"])
        .assert()
        .success();

    let out = stdout_of(configlite(&db).args(["list-configs", "svc"]));
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed, serde_json::json!({"timeout": "30", "retries": "3"}));
}

#[test]
fn list_configs_as_text() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["upsert-config", "svc", "timeout", "30"])
        .assert()
        .success();

    let out = stdout_of(configlite(&db).args(["lc", "--format", "text", "svc"]));
    assert_eq!(out, "timeout 30\n");
}

#[test]
fn list_app_shows_upserted_application_once() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["register-app", "svc"])
        .assert()
        .success();
    configlite(&db)
        .args(["register-app", "svc"])
        .assert()
        .success();
    configlite(&db)
        .args(["upsert-config", "svc", "timeout", "30"])
        .assert()
        .success();

    let out = stdout_of(configlite(&db).arg("list-app"));
    assert_eq!(out, "svc\n");
}

#[test]
fn strict_registration_fails_on_duplicate() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["register-app", "--strict", "svc"])
        .assert()
        .success();
    configlite(&db)
        .args(["register-app", "--strict", "svc"])
        .assert()
        .failure()
        .code(5);
}

#[test]
fn get_config_prints_raw_value() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["upsert-config", "svc", "url", "postgres://localhost/app"])
        .assert()
        .success();

    let out = stdout_of(configlite(&db).args(["get-config", "svc", "url"]));
    assert_eq!(out, "postgres://localhost/app\n");
}

#[test]
fn missing_config_exits_with_not_found_and_suggestion() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["upsert-config", "svc", "timeout", "30"])
        .assert()
        .success();

    let assert = configlite(&db)
        .args(["get-config", "svc", "timout"])
        .assert()
        .failure()
        .code(3);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("timeout"));
}

#[test]
fn delete_exact_then_get_fails() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["upsert-config", "svc", "timeout", "30"])
        .assert()
        .success();
    configlite(&db)
        .args(["delete-config", "svc", "timeout"])
        .assert()
        .success();
    configlite(&db)
        .args(["get-config", "svc", "timeout"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn delete_nothing_is_an_error() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["dc", "svc", "missing"])
        .assert()
        .failure()
        .code(3);
}

#[test]
fn delete_like_reports_count_in_json() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    for (key, value) in [("http.timeout", "30"), ("http.retries", "3"), ("db.url", "x")] {
        configlite(&db)
            .args(["upsert-config", "svc", key, value])
            .assert()
            .success();
    }

    let out = stdout_of(configlite(&db).args(["--json", "delete-config", "--like", "svc", "http.%"]));
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["deleted"], 2);
    assert_eq!(parsed["mode"], "like");

    let out = stdout_of(configlite(&db).args(["lc", "-f", "text", "svc"]));
    assert_eq!(out, "db.url x\n");
}

#[test]
fn json_errors_are_structured() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    let assert = configlite(&db)
        .args(["--json", "get-config", "svc", "timeout"])
        .assert()
        .failure()
        .code(3);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(parsed["error"]["code"], "CONFIG_NOT_FOUND");
}

#[test]
fn blank_names_are_rejected() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    configlite(&db)
        .args(["upsert-config", "svc", " ", "30"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn db_path_from_environment() {
    let dir = TempDir::new().unwrap();
    let db = db_path(&dir);

    Command::cargo_bin("configlite")
        .unwrap()
        .env(DB_ENV_VAR, &db)
        .args(["upsert-config", "svc", "timeout", "30"])
        .assert()
        .success();

    assert!(db.exists());
}

#[test]
fn version_reports_schema() {
    let dir = TempDir::new().unwrap();
    let out = stdout_of(configlite(&db_path(&dir)).args(["--json", "version"]));
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["schema"], "002_create_configurations");
}
