//! Integration tests for registration, login, and session behavior.
//!
//! These tests require:
//! - A running `PostgreSQL` database
//! - The server running (cargo run -p clementine-server)
//!
//! Run with: cargo test -p clementine-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use clementine_integration_tests::{base_url, random_email, session_client};

const PASSWORD: &str = "hunter2-but-longer";

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_establishes_session() {
    let client = session_client();
    let email = random_email();

    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": PASSWORD, "name": "Test User" }))
        .send()
        .await
        .expect("register request failed");

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("invalid response body");
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["name"], "Test User");

    // The session cookie from registration authenticates /me
    let resp = client
        .get(format!("{}/me", base_url()))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("invalid response body");
    assert_eq!(body["user"]["email"], email.as_str());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_registration_conflicts() {
    let email = random_email();

    let first = session_client()
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": PASSWORD, "name": "First" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = session_client()
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": PASSWORD, "name": "Second" }))
        .send()
        .await
        .expect("register request failed");
    assert_eq!(second.status(), StatusCode::CONFLICT);

    // The first account still works; no second row replaced it
    let login = session_client()
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": PASSWORD }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(login.status(), StatusCode::OK);
    let body: Value = login.json().await.expect("invalid response body");
    assert_eq!(body["user"]["name"], "First");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_rejects_bad_input() {
    let cases = [
        json!({ "email": "not-an-email", "password": PASSWORD, "name": "X" }),
        json!({ "email": random_email(), "password": "short", "name": "X" }),
        json!({ "email": random_email(), "password": PASSWORD, "name": "  " }),
    ];

    for body in cases {
        let resp = session_client()
            .post(format!("{}/auth/register", base_url()))
            .json(&body)
            .send()
            .await
            .expect("register request failed");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "case: {body}");
    }
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_failure_is_undifferentiated() {
    let email = random_email();
    session_client()
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": PASSWORD, "name": "X" }))
        .send()
        .await
        .expect("register request failed");

    // Wrong password for a real account
    let wrong_password = session_client()
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": email, "password": "not-the-password" }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body: Value = wrong_password.json().await.expect("invalid body");

    // Unknown email entirely
    let unknown_email = session_client()
        .post(format!("{}/auth/login", base_url()))
        .json(&json!({ "email": random_email(), "password": PASSWORD }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email_body: Value = unknown_email.json().await.expect("invalid body");

    // Identical error text: the response must not reveal which part was wrong
    assert_eq!(wrong_password_body, unknown_email_body);
}

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_protected_routes_require_session() {
    let anonymous = session_client();

    for path in ["/cart", "/me"] {
        let resp = anonymous
            .get(format!("{}{path}", base_url()))
            .send()
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "path: {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_logout_invalidates_session() {
    let client = session_client();
    let email = random_email();

    client
        .post(format!("{}/auth/register", base_url()))
        .json(&json!({ "email": email, "password": PASSWORD, "name": "X" }))
        .send()
        .await
        .expect("register request failed");

    let logout = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("logout request failed");
    assert_eq!(logout.status(), StatusCode::OK);

    let after = client
        .get(format!("{}/me", base_url()))
        .send()
        .await
        .expect("me request failed");
    assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
}
