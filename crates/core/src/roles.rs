//! Well-known role name constants.
//!
//! These must match the values stored in `users.role`.

pub const ROLE_ADMIN: &str = "ADMIN";
pub const ROLE_INVESTOR: &str = "INVESTOR";

/// All roles a user record may carry.
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_INVESTOR];

/// Validate that a role string is one of the accepted values.
pub fn validate_role(role: &str) -> Result<(), String> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(format!(
            "Invalid role '{role}'. Must be one of: {}",
            VALID_ROLES.join(", ")
        ))
    }
}
