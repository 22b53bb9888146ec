//! PostgreSQL-backed repository tests.
//!
//! These run against the database named by `DATABASE_URL` and return early
//! when it is unset. Rows use random tokens and names so runs can share a
//! database.

use chrono::{Duration, Utc};
use uuid::Uuid;

use clinic_core::config::DatabaseConfig;
use clinic_core::error::ErrorKind;
use clinic_core::types::{RoleId, UserId};
use clinic_database::DatabasePool;
use clinic_database::DatabaseStatus;
use clinic_database::migration::run_migrations;
use clinic_database::repositories::{RevokedTokenRepository, RoleRepository, UserRepository};
use clinic_database::store::{CredentialStore, RevocationStore, RoleStore};
use clinic_entity::token::NewRevocation;
use clinic_entity::user::{CreateUser, UpdateUser};

async fn test_pool() -> Option<DatabasePool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let config = DatabaseConfig {
        url,
        max_connections: 4,
        min_connections: 0,
        ..DatabaseConfig::default()
    };
    let pool = DatabasePool::connect(&config).await.expect("connect");
    run_migrations(pool.pool()).await.expect("migrate");
    Some(pool)
}

fn random_user_id() -> UserId {
    UserId((Uuid::new_v4().as_u128() >> 65) as i64 + 1)
}

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()[..10].to_string()
}

#[tokio::test]
async fn test_revocation_insert_is_idempotent() {
    let Some(pool) = test_pool().await else { return };
    let repo = RevokedTokenRepository::new(pool.pool().clone());
    let user_id = random_user_id();
    let token = format!("live-{}", Uuid::new_v4());
    let entry = NewRevocation::logout(&token, Utc::now() + Duration::hours(1), user_id);

    assert!(repo.insert(&entry).await.expect("insert"));
    assert!(!repo.insert(&entry).await.expect("second insert"));
    assert!(repo.is_revoked(&token).await.expect("is_revoked"));

    let active = repo.list_active_by_user(user_id).await.expect("list");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].token, token);
    assert_eq!(active[0].reason, "logout");
}

#[tokio::test]
async fn test_expired_revocations_are_inert_and_purged() {
    let Some(pool) = test_pool().await else { return };
    let repo = RevokedTokenRepository::new(pool.pool().clone());
    let user_id = random_user_id();
    let live = format!("live-{}", Uuid::new_v4());
    let dead = format!("dead-{}", Uuid::new_v4());

    repo.insert(&NewRevocation::logout(&live, Utc::now() + Duration::hours(1), user_id))
        .await
        .expect("insert live");
    repo.insert(&NewRevocation::logout(&dead, Utc::now() - Duration::hours(1), user_id))
        .await
        .expect("insert dead");

    assert!(!repo.is_revoked(&dead).await.expect("is_revoked dead"));
    let active = repo.list_active_by_user(user_id).await.expect("list");
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].token, live);

    assert!(repo.purge_expired().await.expect("purge") >= 1);

    // The dead row is gone, so the same token inserts fresh.
    let reinsert = NewRevocation::logout(&dead, Utc::now() - Duration::hours(1), user_id);
    assert!(repo.insert(&reinsert).await.expect("reinsert"));
    assert!(repo.is_revoked(&live).await.expect("is_revoked live"));

    repo.purge_expired().await.expect("cleanup");
}

#[tokio::test]
async fn test_user_constraints_map_to_domain_errors() {
    let Some(pool) = test_pool().await else { return };
    let users = UserRepository::new(pool.pool().clone());
    let name = format!("pg{}", suffix());

    let created = users
        .create(&CreateUser {
            username: name.clone(),
            email: format!("{name}@clinic.test"),
            password_hash: "hash".to_string(),
            role_id: RoleId(3),
        })
        .await
        .expect("create");
    assert_eq!(created.role_name, "user");

    let duplicate = users
        .create(&CreateUser {
            username: name.clone(),
            email: format!("other-{name}@clinic.test"),
            password_hash: "hash".to_string(),
            role_id: RoleId(3),
        })
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind, ErrorKind::Conflict);

    let bad_role = users
        .update(&UpdateUser {
            id: created.id,
            username: name.clone(),
            email: created.email.clone(),
            password_hash: None,
            role_id: RoleId(999),
        })
        .await
        .unwrap_err();
    assert_eq!(bad_role.kind, ErrorKind::NotFound);

    let promoted = users
        .update(&UpdateUser {
            id: created.id,
            username: name.clone(),
            email: created.email.clone(),
            password_hash: None,
            role_id: RoleId(2),
        })
        .await
        .expect("promote");
    assert_eq!(promoted.role_name, "admin");
    assert_eq!(promoted.password_hash, "hash");

    assert!(users.delete(created.id).await.expect("delete"));
    assert!(users.find_by_id(created.id).await.expect("find").is_none());
    assert!(!users.delete(created.id).await.expect("delete twice"));
}

#[tokio::test]
async fn test_seeded_roles_and_status() {
    let Some(pool) = test_pool().await else { return };
    let roles = RoleRepository::new(pool.pool().clone());

    let names: Vec<String> = roles
        .find_all()
        .await
        .expect("roles")
        .into_iter()
        .map(|r| r.name)
        .collect();
    for seeded in ["super_admin", "admin", "user"] {
        assert!(names.iter().any(|n| n == seeded), "{seeded} missing");
    }
    assert!(roles.find_by_id(RoleId(999)).await.expect("find").is_none());

    assert_eq!(pool.status().await, DatabaseStatus::Connected);
}
