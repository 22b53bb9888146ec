//! In-memory role store.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use clinic_core::result::AppResult;
use clinic_core::types::RoleId;
use clinic_entity::user::Role;

use crate::store::RoleStore;

/// Roles seeded by the initial migration, with their fixed keys.
pub const SEEDED_ROLES: [(i64, &str, &str); 3] = [
    (1, "super_admin", "Full access to every account"),
    (2, "admin", "Manages admin and user accounts"),
    (3, "user", "Manages own account only"),
];

/// In-memory role table.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoleStore {
    roles: Arc<Mutex<BTreeMap<RoleId, Role>>>,
}

impl MemoryRoleStore {
    /// Creates an empty role store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a role store holding the same rows as a freshly migrated database.
    pub fn with_default_roles() -> Self {
        let now = Utc::now();
        let roles = SEEDED_ROLES
            .iter()
            .map(|(id, name, description)| {
                let role = Role {
                    id: RoleId(*id),
                    name: name.to_string(),
                    description: description.to_string(),
                    created_at: now,
                    updated_at: now,
                };
                (role.id, role)
            })
            .collect();
        Self {
            roles: Arc::new(Mutex::new(roles)),
        }
    }

    /// Adds (or replaces) a role row.
    pub async fn insert(&self, id: RoleId, name: &str) -> Role {
        let now = Utc::now();
        let role = Role {
            id,
            name: name.to_string(),
            description: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.roles.lock().await.insert(id, role.clone());
        role
    }

    /// Name of a role, if it exists.
    pub(crate) async fn name_of(&self, id: RoleId) -> Option<String> {
        self.roles.lock().await.get(&id).map(|r| r.name.clone())
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn find_by_id(&self, id: RoleId) -> AppResult<Option<Role>> {
        Ok(self.roles.lock().await.get(&id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Role>> {
        Ok(self.roles.lock().await.values().cloned().collect())
    }
}
