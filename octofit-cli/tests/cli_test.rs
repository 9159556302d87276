use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `octofit` pointed at `api_url`, with a config file that does not exist
fn octofit(api_url: &str, home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("octofit").unwrap();
    cmd.env_remove("OCTOFIT_API_URL")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .arg("--config")
        .arg(home.path().join("config.toml"))
        .arg("--api-url")
        .arg(api_url);
    cmd
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("octofit").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("OctoFit Tracker API"))
        .stdout(predicate::str::contains("leaderboard"))
        .stdout(predicate::str::contains("dashboard"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("octofit").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("octofit").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_octofit"));
}

#[test]
fn test_users_table() {
    let mut server = mockito::Server::new();
    let users = server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"_id":"1","name":"Ana","email":"a@x.com","team":""}]"#)
        .create();
    let teams = server
        .mock("GET", "/api/teams/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let home = TempDir::new().unwrap();
    octofit(&server.url(), &home)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ana"))
        .stdout(predicate::str::contains("a@x.com"))
        .stdout(predicate::str::contains("—"))
        .stdout(predicate::str::contains("1 users"));

    users.assert();
    teams.assert();
}

#[test]
fn test_empty_leaderboard() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/leaderboard/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"results":[]}"#)
        .create();

    let home = TempDir::new().unwrap();
    octofit(&server.url(), &home)
        .arg("leaderboard")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_server_error_fails_command() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/workouts/")
        .with_status(500)
        .create();

    let home = TempDir::new().unwrap();
    octofit(&server.url(), &home)
        .arg("workouts")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Workouts").not())
        .stderr(predicate::str::contains("500"));
}

#[test]
fn test_edit_user_with_flags() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"_id":"1","name":"Ana","email":"a@x.com","team":""}]"#)
        .create();
    server
        .mock("GET", "/api/teams/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"_id":"t1","name":"Blue"}]"#)
        .create();
    let patch = server
        .mock("PATCH", "/api/users/1/")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "name": "Ana",
            "team": "Blue"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"_id":"1","name":"Ana","email":"a@x.com","team":"Blue"}"#)
        .create();

    let home = TempDir::new().unwrap();
    octofit(&server.url(), &home)
        .args(["users", "edit", "1", "--team", "Blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ User 1 updated"));

    patch.assert();
}

#[test]
fn test_edit_unknown_user() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/users/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    server
        .mock("GET", "/api/teams/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    let home = TempDir::new().unwrap();
    octofit(&server.url(), &home)
        .args(["users", "edit", "42", "--name", "Bo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("User 42 not found"));
}

#[test]
fn test_unknown_dashboard_route() {
    let home = TempDir::new().unwrap();
    octofit("http://127.0.0.1:9", &home)
        .args(["dashboard", "--route", "/settings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown route"));
}
