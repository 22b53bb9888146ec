//! Integration tests for registration, login, logout, and the auth gateway.

mod helpers;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;

use clinic_auth::TokenIssuer;
use clinic_database::store::CredentialStore;

use helpers::{ADMIN, PASSWORD, SUPER_ADMIN, TestApp, USER};

#[tokio::test]
async fn test_register_returns_created_user() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "alice@clinic.test",
                "password": "secret123",
                "role_id": USER,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    assert_eq!(response.body["success"], true);
    let user = &response.data()["user"];
    assert_eq!(user["username"], "alice");
    assert_eq!(user["email"], "alice@clinic.test");
    assert_eq!(user["role"], "user");
    assert!(user["id"].as_i64().is_some());
    assert!(user.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_conflicts_and_unknown_role() {
    let app = TestApp::new();
    app.create_user("alice", USER).await;

    let duplicate = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "alice",
                "email": "other@clinic.test",
                "password": "secret123",
                "role_id": USER,
            })),
            None,
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["error"], "CONFLICT");

    let duplicate_email = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "bob",
                "email": "alice@clinic.test",
                "password": "secret123",
                "role_id": USER,
            })),
            None,
        )
        .await;
    assert_eq!(duplicate_email.status, StatusCode::CONFLICT);

    let unknown_role = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "carol",
                "email": "carol@clinic.test",
                "password": "secret123",
                "role_id": 99,
            })),
            None,
        )
        .await;
    assert_eq!(unknown_role.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_rejects_malformed_input() {
    let app = TestApp::new();

    let bad_username = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "username": "a!",
                "email": "a@clinic.test",
                "password": "secret123",
                "role_id": USER,
            })),
            None,
        )
        .await;
    assert_eq!(bad_username.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_username.body["error"], "VALIDATION_ERROR");

    let missing_field = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "username": "alice" })),
            None,
        )
        .await;
    assert_eq!(missing_field.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_field.body["success"], false);
}

#[tokio::test]
async fn test_login_returns_token_and_profile() {
    let app = TestApp::new();
    let id = app.create_user("alice", USER).await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = response.data();
    assert!(data["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(data["expires_at"].as_str().is_some());
    assert_eq!(data["role"], "user");
    assert_eq!(data["user_id"], id.into_inner());
    assert_eq!(data["username"], "alice");
    assert_eq!(data["email"], "alice@clinic.test");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.create_user("alice", USER).await;

    let wrong_password = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "alice", "password": "wrong-password" })),
            None,
        )
        .await;
    let unknown_user = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;

    wrong_password.assert_generic_unauthorized();
    unknown_user.assert_generic_unauthorized();
}

#[tokio::test]
async fn test_alice_logout_revokes_token() {
    let app = TestApp::new();
    let (id, token) = app.create_and_login("alice", USER).await;

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["user_id"], id.into_inner());
    assert_eq!(me.data()["username"], "alice");
    assert_eq!(me.data()["role"], "user");

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(logout.status, StatusCode::OK, "{:?}", logout.body);
    assert_eq!(app.revocations.len().await, 1);

    let after = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    after.assert_generic_unauthorized();
}

#[tokio::test]
async fn test_immediate_relogin_after_logout() {
    let app = TestApp::new();
    let (id, token) = app.create_and_login("alice", USER).await;

    app.request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    let fresh = app.login("alice", PASSWORD).await;
    assert_ne!(fresh, token);

    let me = app.request("GET", "/api/auth/me", None, Some(&fresh)).await;
    assert_eq!(me.status, StatusCode::OK, "{:?}", me.body);
    assert_eq!(me.data()["user_id"], id.into_inner());
}

#[tokio::test]
async fn test_gateway_rejects_missing_and_malformed_headers() {
    let app = TestApp::new();
    let (_, token) = app.create_and_login("alice", USER).await;

    app.request("GET", "/api/auth/me", None, None)
        .await
        .assert_generic_unauthorized();

    for header in [
        format!("bearer {token}"),
        format!("Token {token}"),
        format!("Bearer {token} extra"),
        "Bearer".to_string(),
        token.clone(),
    ] {
        app.request_with_authorization("GET", "/api/auth/me", None, Some(&header))
            .await
            .assert_generic_unauthorized();
    }
}

#[tokio::test]
async fn test_gateway_rejects_forged_and_garbage_tokens() {
    let app = TestApp::new();
    let id = app.create_user("alice", SUPER_ADMIN).await;

    let forged = TokenIssuer::with_secret("some-other-secret", Duration::from_secs(3600))
        .issue(id, "alice", "super_admin", Duration::from_secs(3600))
        .unwrap();

    app.request("GET", "/api/auth/me", None, Some(&forged.token))
        .await
        .assert_generic_unauthorized();
    app.request("GET", "/api/auth/me", None, Some("not.a.jwt"))
        .await
        .assert_generic_unauthorized();
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::new();
    let (id, token) = app.create_and_login("alice", USER).await;

    assert!(app.credentials.delete(id).await.unwrap());

    app.request("GET", "/api/auth/me", None, Some(&token))
        .await
        .assert_generic_unauthorized();
}

#[tokio::test]
async fn test_public_paths_skip_the_gateway() {
    let app = TestApp::new();

    for path in ["/api/health", "/health"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(response.data()["status"], "ok");
        assert_eq!(response.data()["database"], "in_memory");
    }

    // Unknown protected paths still require a token.
    app.request("GET", "/api/nowhere", None, None)
        .await
        .assert_generic_unauthorized();
}

#[tokio::test]
async fn test_identity_reflects_current_role() {
    let app = TestApp::new();
    let (_, root_token) = app.create_and_login("root", SUPER_ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    let promote = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "role_id": ADMIN })),
            Some(&root_token),
        )
        .await;
    assert_eq!(promote.status, StatusCode::OK, "{:?}", promote.body);

    let me = app
        .request("GET", "/api/auth/me", None, Some(&alice_token))
        .await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["role"], "admin");
}
