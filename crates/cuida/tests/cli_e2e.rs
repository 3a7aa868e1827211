#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cuida_cmd(data: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("cuida"));
    cmd.env("CUIDA_DATA", data.as_os_str())
        .env_remove("RUST_LOG")
        .env_remove("CUIDA_USE_MOCK")
        .env_remove("CUIDA_SIMULATE_LATENCY")
        .env_remove("CUIDA_MOOD_LIMIT")
        .env_remove("CUIDA_DIARY_LIMIT");
    cmd
}

fn json_output(data: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--output", "json"];
    full.extend_from_slice(args);
    let output = cuida_cmd(data).args(&full).output().unwrap();
    assert!(output.status.success(), "cuida {:?} failed", args);
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_data_commands_require_login() {
    let temp = TempDir::new().unwrap();

    cuida_cmd(temp.path())
        .args(["mood", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Not logged in"));

    cuida_cmd(temp.path())
        .args(["whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[test]
fn test_journal_workflow() {
    let temp = TempDir::new().unwrap();
    let data = temp.path();

    // 1. Register
    cuida_cmd(data)
        .args(["register", "ana@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome, ana!"));
    assert!(data.join("cdm_user.json").exists());

    // 2. Logging in with the same email keeps the profile
    let registered = json_output(data, &["profile"]);
    let logged_in = json_output(data, &["login", "ana@x.com", "--password", "x"]);
    assert_eq!(registered, logged_in);
    assert_eq!(logged_in["plan"], "basic");
    assert_eq!(logged_in["level"], 1);

    // 3. Moods
    cuida_cmd(data)
        .args(["mood", "add", "4", "good", "day"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mood 4 recorded."));
    let moods = json_output(data, &["mood", "list"]);
    assert_eq!(moods[0]["value"], 4);
    assert_eq!(moods[0]["comment"], "good day");
    let chart = json_output(data, &["mood", "chart"]);
    assert_eq!(chart.as_array().unwrap().len(), 1);

    // 4. Priorities, three per day
    for text in ["one", "two", "three"] {
        cuida_cmd(data)
            .args(["priority", "add", "--date", "2024-08-01", text])
            .assert()
            .success();
    }
    cuida_cmd(data)
        .args(["priority", "add", "--date", "2024-08-01", "four"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already have 3 priorities"));
    cuida_cmd(data)
        .args(["priority", "done", "2", "--date", "2024-08-01"])
        .assert()
        .success();
    cuida_cmd(data)
        .args(["priority", "rm", "1", "--date", "2024-08-01"])
        .assert()
        .success();
    let items = json_output(data, &["priority", "list", "--date", "2024-08-01"]);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["text"], "two");
    assert_eq!(items[0]["completed"], true);

    // 5. Diary
    cuida_cmd(data)
        .args(["diary", "add", "-e", "calm", "-t", "Domingo", "Almoço", "em", "família"])
        .assert()
        .success();
    let diary = json_output(data, &["diary", "list"]);
    assert_eq!(diary[0]["title"], "Domingo");
    assert_eq!(diary[0]["content"], "Almoço em família");
    assert_eq!(diary[0]["color"], "#3b82f6");

    // 6. Habits
    cuida_cmd(data).args(["habit", "add", "Read"]).assert().success();
    cuida_cmd(data)
        .args(["habit", "toggle", "1", "--date", "2024-08-01"])
        .assert()
        .success();
    let habits = json_output(data, &["habit", "list"]);
    assert_eq!(habits[0]["streak"], 1);
    assert_eq!(habits[0]["completedDates"][0], "2024-08-01");

    // 7. Logout keeps the journal, ends the session
    cuida_cmd(data).args(["logout"]).assert().success();
    assert!(!data.join("cdm_user.json").exists());
    assert!(data.join("cdm_moods.json").exists());
    cuida_cmd(data)
        .args(["habit", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_invalid_mood_is_rejected() {
    let temp = TempDir::new().unwrap();
    cuida_cmd(temp.path())
        .args(["login", "a@x.com"])
        .assert()
        .success();

    cuida_cmd(temp.path())
        .args(["mood", "add", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid mood value: 6"));
    assert!(!temp.path().join("cdm_moods.json").exists());
}

#[test]
fn test_profile_set_and_tip() {
    let temp = TempDir::new().unwrap();
    cuida_cmd(temp.path())
        .args(["register", "a@x.com"])
        .assert()
        .success();

    let profile = json_output(
        temp.path(),
        &["profile", "set", "--goal", "focus", "--name", "Ana Paula"],
    );
    assert_eq!(profile["goal"], "focus");
    assert_eq!(profile["displayName"], "Ana Paula");

    let who = json_output(temp.path(), &["whoami"]);
    let features: Vec<&str> = who["features"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_str().unwrap())
        .collect();
    assert!(features.contains(&"focus_timer"));
    assert!(!features.contains(&"grounding"));

    cuida_cmd(temp.path())
        .args(["tip"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Ana, "));

    cuida_cmd(temp.path())
        .args(["profile", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing to update"));
}

#[test]
fn test_theme_persists() {
    let temp = TempDir::new().unwrap();
    cuida_cmd(temp.path())
        .args(["theme"])
        .assert()
        .success()
        .stdout("light\n");
    cuida_cmd(temp.path()).args(["theme", "dark"]).assert().success();
    cuida_cmd(temp.path())
        .args(["theme"])
        .assert()
        .success()
        .stdout("dark\n");
    assert_eq!(
        fs::read_to_string(temp.path().join("cdm_theme.json")).unwrap(),
        "\"dark\""
    );
}

#[test]
fn test_doctor_reports_corrupt_files() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("cdm_habits.json"), "[{]").unwrap();

    cuida_cmd(temp.path())
        .args(["doctor"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("CORRUPT"))
        .stderr(predicate::str::contains("1 damaged file(s)"));
}

#[test]
fn test_data_flag_overrides_env() {
    let env_dir = TempDir::new().unwrap();
    let flag_dir = TempDir::new().unwrap();

    cuida_cmd(env_dir.path())
        .args(["--data", flag_dir.path().to_str().unwrap(), "register", "a@x.com"])
        .assert()
        .success();

    assert!(flag_dir.path().join("cdm_user.json").exists());
    assert!(!env_dir.path().join("cdm_user.json").exists());
}
