use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_health_prints_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .env("FRUITGUESS_API_URL", server.uri())
        .arg("health")
        .assert()
        .success()
        .stdout(predicate::str::diff("ok\n"));
}

#[tokio::test]
async fn test_health_reports_unhealthy_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": false })))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .env("FRUITGUESS_API_URL", server.uri())
        .arg("health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not healthy"));
}

#[tokio::test]
async fn test_health_reports_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    let dir = tempdir().unwrap();

    cargo_bin_cmd!("fruitguess")
        .env("FRUITGUESS_HOME", dir.path())
        .env("FRUITGUESS_API_URL", server.uri())
        .arg("health")
        .assert()
        .failure()
        .stderr(predicate::str::contains("HTTP 502"));
}
