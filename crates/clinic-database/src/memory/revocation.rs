//! In-memory revocation store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::debug;

use clinic_core::result::AppResult;
use clinic_core::types::{RevocationId, UserId};
use clinic_entity::token::{NewRevocation, RevocationEntry};

use crate::store::RevocationStore;

#[derive(Debug, Default)]
struct InnerState {
    /// Entries keyed by the exact token string.
    entries: HashMap<String, RevocationEntry>,
    next_id: i64,
}

/// In-memory revocation set.
#[derive(Debug, Clone, Default)]
pub struct MemoryRevocationStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryRevocationStore {
    /// Creates an empty revocation store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, live or dead.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    /// Whether the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn insert(&self, entry: &NewRevocation) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.entries.contains_key(&entry.token) {
            debug!(user_id = %entry.user_id, "Token already revoked");
            return Ok(false);
        }

        state.next_id += 1;
        let id = RevocationId(state.next_id);
        state.entries.insert(
            entry.token.clone(),
            RevocationEntry {
                id,
                token: entry.token.clone(),
                expires_at: entry.expires_at,
                user_id: entry.user_id,
                reason: entry.reason.clone(),
                created_at: Utc::now(),
            },
        );
        Ok(true)
    }

    async fn is_revoked(&self, token: &str) -> AppResult<bool> {
        let now = Utc::now();
        Ok(self
            .state
            .lock()
            .await
            .entries
            .get(token)
            .is_some_and(|e| e.is_live_at(now)))
    }

    async fn list_active_by_user(&self, user_id: UserId) -> AppResult<Vec<RevocationEntry>> {
        let now = Utc::now();
        let mut entries: Vec<RevocationEntry> = self
            .state
            .lock()
            .await
            .entries
            .values()
            .filter(|e| e.user_id == user_id && e.is_live_at(now))
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(entries)
    }

    async fn purge_expired(&self) -> AppResult<u64> {
        let now = Utc::now();
        let mut state = self.state.lock().await;
        let before = state.entries.len();
        state.entries.retain(|_, e| e.is_live_at(now));
        Ok((before - state.entries.len()) as u64)
    }
}
