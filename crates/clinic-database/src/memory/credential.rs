//! In-memory credential store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::{PageRequest, PageResponse, UserId};
use clinic_entity::user::{CreateUser, UpdateUser, User};

use super::role::MemoryRoleStore;
use crate::store::CredentialStore;

#[derive(Debug, Default)]
struct InnerState {
    users: BTreeMap<UserId, User>,
    next_id: i64,
}

/// In-memory user table joined against a [`MemoryRoleStore`].
///
/// `role_name` is resolved on every read, mirroring the SQL join.
#[derive(Debug, Clone)]
pub struct MemoryCredentialStore {
    state: Arc<Mutex<InnerState>>,
    roles: MemoryRoleStore,
}

impl MemoryCredentialStore {
    /// Creates an empty credential store backed by `roles`.
    pub fn new(roles: MemoryRoleStore) -> Self {
        Self {
            state: Arc::new(Mutex::new(InnerState {
                users: BTreeMap::new(),
                next_id: 1,
            })),
            roles,
        }
    }

    async fn with_role_name(&self, mut user: User) -> User {
        // A dangling role key yields an empty name, which ranks as nothing.
        user.role_name = self.roles.name_of(user.role_id).await.unwrap_or_default();
        user
    }

    async fn page_of(
        &self,
        matching: Vec<User>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let total = matching.len() as u64;
        let mut items = Vec::new();
        for user in matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
        {
            items.push(self.with_role_name(user).await);
        }
        Ok(PageResponse::new(items, page, total))
    }
}

fn check_unique(
    state: &InnerState,
    username: &str,
    email: &str,
    except: Option<UserId>,
) -> AppResult<()> {
    for user in state.users.values() {
        if Some(user.id) == except {
            continue;
        }
        if user.username == username {
            return Err(AppError::conflict(format!(
                "Username '{username}' already exists"
            )));
        }
        if user.email == email {
            return Err(AppError::conflict(format!("Email '{email}' already exists")));
        }
    }
    Ok(())
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        let found = self.state.lock().await.users.get(&id).cloned();
        match found {
            Some(user) => Ok(Some(self.with_role_name(user).await)),
            None => Ok(None),
        }
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let found = self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned();
        match found {
            Some(user) => Ok(Some(self.with_role_name(user).await)),
            None => Ok(None),
        }
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let found = self
            .state
            .lock()
            .await
            .users
            .values()
            .find(|u| u.email == email)
            .cloned();
        match found {
            Some(user) => Ok(Some(self.with_role_name(user).await)),
            None => Ok(None),
        }
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let role_name = self
            .roles
            .name_of(data.role_id)
            .await
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        let mut state = self.state.lock().await;
        check_unique(&state, &data.username, &data.email, None)?;

        let id = UserId(state.next_id);
        state.next_id += 1;
        let now = Utc::now();
        let user = User {
            id,
            username: data.username.clone(),
            email: data.email.clone(),
            password_hash: data.password_hash.clone(),
            role_id: data.role_id,
            role_name,
            created_at: now,
            updated_at: now,
        };
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, data: &UpdateUser) -> AppResult<User> {
        let role_name = self
            .roles
            .name_of(data.role_id)
            .await
            .ok_or_else(|| AppError::not_found("Role not found"))?;

        let mut state = self.state.lock().await;
        check_unique(&state, &data.username, &data.email, Some(data.id))?;

        let user = state
            .users
            .get_mut(&data.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", data.id)))?;
        user.username = data.username.clone();
        user.email = data.email.clone();
        if let Some(hash) = &data.password_hash {
            user.password_hash = hash.clone();
        }
        user.role_id = data.role_id;
        user.role_name = role_name;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        Ok(self.state.lock().await.users.remove(&id).is_some())
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        search: Option<&str>,
    ) -> AppResult<PageResponse<User>> {
        let matching: Vec<User> = {
            let state = self.state.lock().await;
            state
                .users
                .values()
                .filter(|u| match search {
                    Some(s) if !s.is_empty() => u.username.contains(s),
                    _ => true,
                })
                .cloned()
                .collect()
        };
        self.page_of(matching, page).await
    }

    async fn find_by_roles(
        &self,
        role_names: &[&str],
        page: &PageRequest,
    ) -> AppResult<PageResponse<User>> {
        let all: Vec<User> = self.state.lock().await.users.values().cloned().collect();
        let mut matching = Vec::new();
        for user in all {
            let user = self.with_role_name(user).await;
            if role_names.contains(&user.role_name.as_str()) {
                matching.push(user);
            }
        }
        self.page_of(matching, page).await
    }
}
