//! Well-known role name constants.
//!
//! These must match the values stored in the `user_roles` table.

pub const ROLE_MEMBER: &str = "member";
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

/// Roles that receive moderation alerts and may resolve reports.
pub fn is_moderation_role(role: &str) -> bool {
    role == ROLE_MODERATOR || role == ROLE_ADMIN
}
