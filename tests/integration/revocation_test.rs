//! Integration tests for revocation auditing and purging.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use clinic_auth::RevocationCleanup;
use clinic_database::store::RevocationStore;
use clinic_entity::token::NewRevocation;

use helpers::{ADMIN, SUPER_ADMIN, TestApp, USER};

#[tokio::test]
async fn test_logout_is_visible_in_audit_list() {
    let app = TestApp::new();
    let (_, root_token) = app.create_and_login("root", SUPER_ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    let logout = app
        .request("POST", "/api/auth/logout", None, Some(&alice_token))
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let audit = app
        .request(
            "GET",
            &format!("/api/users/{alice_id}/revocations"),
            None,
            Some(&root_token),
        )
        .await;
    assert_eq!(audit.status, StatusCode::OK, "{:?}", audit.body);

    let entries = audit.data().as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["user_id"], alice_id.into_inner());
    assert_eq!(entries[0]["reason"], "logout");
    assert!(entries[0].get("token").is_none());
}

#[tokio::test]
async fn test_audit_list_requires_manage_permission() {
    let app = TestApp::new();
    let root_id = app.create_user("root", SUPER_ADMIN).await;
    let (_, admin_token) = app.create_and_login("manager", ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    let admin_on_root = app
        .request(
            "GET",
            &format!("/api/users/{root_id}/revocations"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(admin_on_root.status, StatusCode::FORBIDDEN);

    let own = app
        .request(
            "GET",
            &format!("/api/users/{alice_id}/revocations"),
            None,
            Some(&alice_token),
        )
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data().as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_purge_drops_only_dead_entries() {
    let app = TestApp::new();
    let (_, root_token) = app.create_and_login("root", SUPER_ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    app.request("POST", "/api/auth/logout", None, Some(&alice_token))
        .await;
    app.revocations
        .insert(&NewRevocation::logout(
            "long-expired-token",
            Utc::now() - Duration::hours(2),
            alice_id,
        ))
        .await
        .unwrap();
    assert_eq!(app.revocations.len().await, 2);

    let cleanup = RevocationCleanup::new(Arc::new(app.revocations.clone()));
    assert_eq!(cleanup.run_cleanup().await.unwrap(), 1);
    assert_eq!(cleanup.run_cleanup().await.unwrap(), 0);

    // The live entry still blocks the logged-out token.
    app.request("GET", "/api/auth/me", None, Some(&alice_token))
        .await
        .assert_generic_unauthorized();

    let audit = app
        .request(
            "GET",
            &format!("/api/users/{alice_id}/revocations"),
            None,
            Some(&root_token),
        )
        .await;
    assert_eq!(audit.data().as_array().unwrap().len(), 1);
}
