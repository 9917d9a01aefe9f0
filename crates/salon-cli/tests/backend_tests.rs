//! End-to-end CLI runs against an in-process backend.

use std::fs;

use assert_cmd::Command;
use axum::{
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::net::TcpListener;

fn signed_in(headers: &HeaderMap) -> bool {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        == Some("Bearer access-1")
}

fn user() -> Value {
    json!({ "id": 7, "name": "Amy Chen", "email": "amy@example.com", "phone": "0912345678" })
}

async fn services() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Haircut", "category": "hair", "duration": 60, "price": 800,
          "is_active": true },
        { "id": 5, "name": "Gel manicure", "category": "nail", "duration": 30, "price": 600,
          "is_active": true },
        { "id": 9, "name": "Retired perm", "duration": 90, "price": 2500, "is_active": false }
    ]))
}

async fn stylists() -> Json<Value> {
    Json(json!([
        { "id": 4, "name": "Mia", "specialty": ["hair", "nail"], "experience": 8,
          "is_active": true }
    ]))
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    if body["password"] != "secret" {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid email or password" })),
        ));
    }
    Ok(Json(json!({
        "access_token": "access-1",
        "refresh_token": "refresh-1",
        "user": user()
    })))
}

async fn profile(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if signed_in(&headers) {
        Ok(Json(user()))
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn branding() -> Json<Value> {
    Json(json!({ "name": "Studio K" }))
}

async fn spawn_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener address");
    let app = Router::new()
        .route("/api/v1/services", get(services))
        .route("/api/v1/stylists", get(stylists))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/profile", get(profile))
        .route("/api/v1/settings/branding", get(branding));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn salon_cmd(data_dir: &TempDir, api_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("salon").expect("Failed to find salon binary");
    cmd.env("NO_PROXY", "127.0.0.1,localhost")
        .arg("--no-color")
        .arg("--data-dir")
        .arg(data_dir.path())
        .arg("--api-url")
        .arg(api_url);
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_lists_active_services() {
    let url = spawn_backend().await;
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    salon_cmd(&temp_dir, &url)
        .arg("services")
        .assert()
        .success()
        .stdout(predicate::str::contains("## 1. Haircut"))
        .stdout(predicate::str::contains("NT$ 600"))
        .stdout(predicate::str::contains("Retired perm").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_login_resumes_pending_booking() {
    let url = spawn_backend().await;
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    salon_cmd(&temp_dir, &url)
        .args(["book", "--service", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign-in required"));
    assert!(temp_dir.path().join("pending_booking.json").exists());

    salon_cmd(&temp_dir, &url)
        .args(["login", "--email", "amy@example.com", "--password", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Amy Chen"))
        .stdout(predicate::str::contains("- Services: Gel manicure"))
        .stdout(predicate::str::contains("## 4. Mia"));

    assert!(!temp_dir.path().join("pending_booking.json").exists());
    let session = fs::read_to_string(temp_dir.path().join("session.json"))
        .expect("session should be saved");
    assert!(session.contains("access-1"));

    salon_cmd(&temp_dir, &url)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Amy Chen"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_book_stops_at_first_missing_answer() {
    let url = spawn_backend().await;
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    salon_cmd(&temp_dir, &url)
        .args(["login", "--email", "amy@example.com", "--password", "secret"])
        .assert()
        .success();

    salon_cmd(&temp_dir, &url)
        .arg("book")
        .assert()
        .success()
        .stdout(predicate::str::contains("# Studio K"))
        .stdout(predicate::str::contains("Step 1 of 4"))
        .stdout(predicate::str::contains("Please select at least one service"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cli_login_failure_shows_server_message() {
    let url = spawn_backend().await;
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");

    salon_cmd(&temp_dir, &url)
        .args(["login", "--email", "amy@example.com", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email or password"));
}
