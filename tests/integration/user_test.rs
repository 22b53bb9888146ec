//! Integration tests for account management under the role hierarchy.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{ADMIN, SUPER_ADMIN, TestApp, USER};

#[tokio::test]
async fn test_super_admin_lists_everyone_with_paging_and_search() {
    let app = TestApp::new();
    let (_, token) = app.create_and_login("root", SUPER_ADMIN).await;
    app.create_user("manager", ADMIN).await;
    app.create_user("alice", USER).await;
    app.create_user("alina", USER).await;

    let all = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.data()["total_items"], 4);
    assert_eq!(all.data()["page"], 1);

    let paged = app
        .request("GET", "/api/users?page=2&limit=3", None, Some(&token))
        .await;
    assert_eq!(paged.status, StatusCode::OK);
    assert_eq!(paged.data()["items"].as_array().unwrap().len(), 1);
    assert_eq!(paged.data()["total_pages"], 2);

    let searched = app
        .request("GET", "/api/users?search=ali", None, Some(&token))
        .await;
    let names: Vec<&str> = searched.data()["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["alice", "alina"]);
}

#[tokio::test]
async fn test_admin_list_hides_super_admins() {
    let app = TestApp::new();
    app.create_user("root", SUPER_ADMIN).await;
    let (_, token) = app.create_and_login("manager", ADMIN).await;
    app.create_user("alice", USER).await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let roles: Vec<&str> = response.data()["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["role"].as_str().unwrap())
        .collect();
    assert_eq!(response.data()["total_items"], 2);
    assert!(!roles.contains(&"super_admin"));
}

#[tokio::test]
async fn test_user_cannot_list() {
    let app = TestApp::new();
    let (_, token) = app.create_and_login("alice", USER).await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_read_follows_rank() {
    let app = TestApp::new();
    let root_id = app.create_user("root", SUPER_ADMIN).await;
    let (admin_id, admin_token) = app.create_and_login("manager", ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    let own = app
        .request("GET", &format!("/api/users/{alice_id}"), None, Some(&alice_token))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.data()["username"], "alice");
    assert!(own.data().get("password_hash").is_none());

    let up = app
        .request("GET", &format!("/api/users/{admin_id}"), None, Some(&alice_token))
        .await;
    assert_eq!(up.status, StatusCode::FORBIDDEN);

    let down = app
        .request("GET", &format!("/api/users/{alice_id}"), None, Some(&admin_token))
        .await;
    assert_eq!(down.status, StatusCode::OK);

    let above = app
        .request("GET", &format!("/api/users/{root_id}"), None, Some(&admin_token))
        .await;
    assert_eq!(above.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_bad_and_missing_ids() {
    let app = TestApp::new();
    let (_, token) = app.create_and_login("root", SUPER_ADMIN).await;

    let missing = app
        .request("GET", "/api/users/9999", None, Some(&token))
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let garbage = app
        .request("GET", "/api/users/abc", None, Some(&token))
        .await;
    assert_eq!(garbage.status, StatusCode::BAD_REQUEST);
    assert_eq!(garbage.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_self_update_for_every_role() {
    let app = TestApp::new();

    for (name, role) in [("root", SUPER_ADMIN), ("manager", ADMIN), ("alice", USER)] {
        let (id, token) = app.create_and_login(name, role).await;
        let response = app
            .request(
                "PUT",
                &format!("/api/users/{id}"),
                Some(json!({ "email": format!("{name}@new.test") })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{name}: {:?}", response.body);
        assert_eq!(response.data()["email"], format!("{name}@new.test"));
    }
}

#[tokio::test]
async fn test_update_permissions() {
    let app = TestApp::new();
    let (_, admin_token) = app.create_and_login("manager", ADMIN).await;
    let other_admin = app.create_user("deputy", ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;
    let bob_id = app.create_user("bob", USER).await;

    let user_on_user = app
        .request(
            "PUT",
            &format!("/api/users/{bob_id}"),
            Some(json!({ "email": "hijack@clinic.test" })),
            Some(&alice_token),
        )
        .await;
    assert_eq!(user_on_user.status, StatusCode::FORBIDDEN);

    let admin_on_admin = app
        .request(
            "PUT",
            &format!("/api/users/{other_admin}"),
            Some(json!({ "email": "hijack@clinic.test" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(admin_on_admin.status, StatusCode::FORBIDDEN);

    let admin_on_user = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "username": "alice2" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(admin_on_user.status, StatusCode::OK);
    assert_eq!(admin_on_user.data()["username"], "alice2");
}

#[tokio::test]
async fn test_role_changes_are_checked() {
    let app = TestApp::new();
    let (_, admin_token) = app.create_and_login("manager", ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    let unknown_role = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "role_id": 42 })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(unknown_role.status, StatusCode::NOT_FOUND);

    let escalation = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "role_id": SUPER_ADMIN })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(escalation.status, StatusCode::FORBIDDEN);

    let self_promotion = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "role_id": ADMIN })),
            Some(&alice_token),
        )
        .await;
    assert_eq!(self_promotion.status, StatusCode::FORBIDDEN);

    let unchanged_role = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "role_id": USER })),
            Some(&alice_token),
        )
        .await;
    assert_eq!(unchanged_role.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_conflicts_and_password_change() {
    let app = TestApp::new();
    app.create_user("bob", USER).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;

    let taken = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "username": "bob" })),
            Some(&alice_token),
        )
        .await;
    assert_eq!(taken.status, StatusCode::CONFLICT);

    let too_short = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "password": "abc" })),
            Some(&alice_token),
        )
        .await;
    assert_eq!(too_short.status, StatusCode::BAD_REQUEST);

    let changed = app
        .request(
            "PUT",
            &format!("/api/users/{alice_id}"),
            Some(json!({ "password": "brand-new-secret" })),
            Some(&alice_token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);

    app.login("alice", "brand-new-secret").await;
}

#[tokio::test]
async fn test_delete_rules() {
    let app = TestApp::new();
    let (root_id, root_token) = app.create_and_login("root", SUPER_ADMIN).await;
    let (_, admin_token) = app.create_and_login("manager", ADMIN).await;
    let deputy = app.create_user("deputy", ADMIN).await;
    let (alice_id, alice_token) = app.create_and_login("alice", USER).await;
    let bob_id = app.create_user("bob", USER).await;

    let admin_on_admin = app
        .request("DELETE", &format!("/api/users/{deputy}"), None, Some(&admin_token))
        .await;
    assert_eq!(admin_on_admin.status, StatusCode::FORBIDDEN);

    let user_on_user = app
        .request("DELETE", &format!("/api/users/{bob_id}"), None, Some(&alice_token))
        .await;
    assert_eq!(user_on_user.status, StatusCode::FORBIDDEN);

    let self_delete = app
        .request("DELETE", &format!("/api/users/{root_id}"), None, Some(&root_token))
        .await;
    assert_eq!(self_delete.status, StatusCode::FORBIDDEN);
    assert_eq!(self_delete.body["message"], "You cannot delete your own account");

    let admin_on_user = app
        .request("DELETE", &format!("/api/users/{alice_id}"), None, Some(&admin_token))
        .await;
    assert_eq!(admin_on_user.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/users/{alice_id}"), None, Some(&root_token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let root_on_admin = app
        .request("DELETE", &format!("/api/users/{deputy}"), None, Some(&root_token))
        .await;
    assert_eq!(root_on_admin.status, StatusCode::OK);
}
