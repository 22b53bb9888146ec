//! Permission decisions over the role hierarchy.
//!
//! Every decision takes the caller's and target's *current* role names.
//! An unranked role on either side denies.

use clinic_core::error::AppError;
use clinic_core::result::AppResult;
use clinic_core::types::UserId;

use super::hierarchy::{ROLE_ADMIN, ROLE_SUPER_ADMIN, ROLE_USER, rank};

/// Stateless evaluator for account-management permissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionEvaluator;

impl PermissionEvaluator {
    /// Creates a new evaluator.
    pub fn new() -> Self {
        Self
    }

    /// The caller may view a target whose rank does not exceed its own.
    pub fn can_read(&self, current_role: &str, target_role: &str) -> bool {
        match (rank(current_role), rank(target_role)) {
            (Some(current), Some(target)) => current >= target,
            _ => false,
        }
    }

    /// Super admins update anyone; admins update themselves and plain users;
    /// users update only themselves.
    pub fn can_update(
        &self,
        current_role: &str,
        current_id: UserId,
        target_role: &str,
        target_id: UserId,
    ) -> bool {
        let Some(target_rank) = rank(target_role) else {
            return false;
        };
        let is_self = current_id == target_id;
        match current_role {
            ROLE_SUPER_ADMIN => true,
            ROLE_ADMIN => is_self || Some(target_rank) <= rank(ROLE_USER),
            ROLE_USER => is_self,
            _ => false,
        }
    }

    /// Nobody deletes themselves. Super admins delete anyone else; admins
    /// delete plain users; users delete no one.
    pub fn can_delete(
        &self,
        current_role: &str,
        current_id: UserId,
        target_role: &str,
        target_id: UserId,
    ) -> bool {
        if current_id == target_id {
            return false;
        }
        let Some(target_rank) = rank(target_role) else {
            return false;
        };
        match current_role {
            ROLE_SUPER_ADMIN => true,
            ROLE_ADMIN => Some(target_rank) <= rank(ROLE_USER),
            _ => false,
        }
    }

    /// The caller may hand out a ranked role no higher than its own.
    ///
    /// Existence of the role row is checked separately against the role store.
    pub fn can_assign_role(&self, current_role: &str, new_role: &str) -> bool {
        match (rank(current_role), rank(new_role)) {
            (Some(current), Some(new)) => new <= current,
            _ => false,
        }
    }

    /// [`Self::can_read`] as a `Result`.
    pub fn require_read(&self, current_role: &str, target_role: &str) -> AppResult<()> {
        if self.can_read(current_role, target_role) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You don't have permission to view this user",
            ))
        }
    }

    /// [`Self::can_update`] as a `Result`.
    pub fn require_update(
        &self,
        current_role: &str,
        current_id: UserId,
        target_role: &str,
        target_id: UserId,
    ) -> AppResult<()> {
        if self.can_update(current_role, current_id, target_role, target_id) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You don't have permission to update this user",
            ))
        }
    }

    /// [`Self::can_delete`] as a `Result`.
    pub fn require_delete(
        &self,
        current_role: &str,
        current_id: UserId,
        target_role: &str,
        target_id: UserId,
    ) -> AppResult<()> {
        if current_id == target_id {
            return Err(AppError::authorization("You cannot delete your own account"));
        }
        if self.can_delete(current_role, current_id, target_role, target_id) {
            Ok(())
        } else {
            Err(AppError::authorization(
                "You don't have permission to delete this user",
            ))
        }
    }

    /// [`Self::can_assign_role`] as a `Result`.
    pub fn require_assign_role(&self, current_role: &str, new_role: &str) -> AppResult<()> {
        if self.can_assign_role(current_role, new_role) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "You don't have permission to assign role '{new_role}'"
            )))
        }
    }
}
