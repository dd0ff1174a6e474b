//! Startup provisioning of the first admin account.
//!
//! Admins can only be registered by other admins, so a fresh deployment gets
//! its first one from `ADMIN_EMAIL` / `ADMIN_PASSWORD`.

use foundernest_core::roles::ROLE_ADMIN;
use foundernest_db::Store;

use crate::config::AdminCredentials;
use crate::error::AppResult;
use crate::handlers::users::create_account;

/// Create the admin account unless a user with that email already exists.
///
/// Returns `true` if an account was created.
pub async fn ensure_admin(store: &dyn Store, admin: &AdminCredentials) -> AppResult<bool> {
    let email = admin.email.trim().to_lowercase();
    if let Some(existing) = store.find_user_by_email(&email).await? {
        if existing.role != ROLE_ADMIN {
            tracing::warn!(user_id = existing.id, "Bootstrap admin email belongs to a non-admin user");
        }
        return Ok(false);
    }

    let user = create_account(store, "Administrator", &email, &admin.password, ROLE_ADMIN).await?;
    tracing::info!(user_id = user.id, "Bootstrap admin created");
    Ok(true)
}
