//! The fixed role ranking.

/// Highest-privilege role.
pub const ROLE_SUPER_ADMIN: &str = "super_admin";
/// Administrative role.
pub const ROLE_ADMIN: &str = "admin";
/// Regular account role.
pub const ROLE_USER: &str = "user";

/// Role names and their ranks, highest first. Higher rank means more privilege.
pub const ROLE_HIERARCHY: [(&str, u8); 3] = [(ROLE_SUPER_ADMIN, 3), (ROLE_ADMIN, 2), (ROLE_USER, 1)];

/// Rank of a role name. Unknown names have no rank.
pub fn rank(role: &str) -> Option<u8> {
    ROLE_HIERARCHY
        .iter()
        .find(|(name, _)| *name == role)
        .map(|(_, level)| *level)
}

/// Ranked role names whose rank is at most that of `role`, highest first.
pub fn roles_at_or_below(role: &str) -> Vec<&'static str> {
    match rank(role) {
        Some(max) => ROLE_HIERARCHY
            .iter()
            .filter(|(_, level)| *level <= max)
            .map(|(name, _)| *name)
            .collect(),
        None => Vec::new(),
    }
}
