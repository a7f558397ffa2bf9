//! `users` command against a mock API.


use assert_cmd::cargo::cargo_bin_cmd;
use fixtures::{USERS_PAGE, can_bind_localhost, json_response, temp_home};
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_users_prints_table() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("limit", "3"))
        .and(query_param("skip", "0"))
        .respond_with(json_response(200, USERS_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("userdash")
        .env("USERDASH_HOME", home.path())
        .env("USERDASH_BASE_URL", mock_server.uri())
        .args(["users", "--limit", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First Name"))
        .stdout(predicate::str::contains("Michael"))
        .stdout(predicate::str::contains("Brown"))
        .stdout(predicate::str::contains("Showing 3 of 208 users"));
}

#[tokio::test]
async fn test_users_default_window() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("limit", "30"))
        .and(query_param("skip", "0"))
        .respond_with(json_response(200, USERS_PAGE))
        .expect(1)
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("userdash")
        .env("USERDASH_HOME", home.path())
        .env("USERDASH_BASE_URL", mock_server.uri())
        .arg("users")
        .assert()
        .success();
}

#[tokio::test]
async fn test_users_json_output() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("skip", "10"))
        .respond_with(json_response(200, USERS_PAGE))
        .mount(&mock_server)
        .await;

    let output = cargo_bin_cmd!("userdash")
        .env("USERDASH_HOME", home.path())
        .env("USERDASH_BASE_URL", mock_server.uri())
        .args(["users", "--skip", "10", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let users: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(users[0]["firstName"], "Emily");
    assert_eq!(users[2]["age"], 42);
}

#[tokio::test]
async fn test_users_server_error() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_home();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(json_response(503, r#"{"message":"Service Unavailable"}"#))
        .mount(&mock_server)
        .await;

    cargo_bin_cmd!("userdash")
        .env("USERDASH_HOME", home.path())
        .env("USERDASH_BASE_URL", mock_server.uri())
        .arg("users")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 503: Service Unavailable"));
}
