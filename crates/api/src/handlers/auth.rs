//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::Json;
use foundernest_core::error::CoreError;
use foundernest_core::roles::ROLE_INVESTOR;
use foundernest_core::types::DbId;
use foundernest_db::Store;
use foundernest_pipeline::onboarding;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. Unknown email and wrong password are
/// indistinguishable to the caller. An investor's pipeline is topped up with
/// any registry company it is missing.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    input.validate()?;

    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid email or password".into()));

    let email = input.email.trim().to_lowercase();
    let user = state
        .store()
        .find_user_by_email(&email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Login rejected: wrong password");
        return Err(invalid());
    }

    // Picks up companies a failed registration seed or fan-out write missed.
    if user.role == ROLE_INVESTOR {
        match onboarding::seed_pipeline(state.store(), user.id).await {
            Ok(0) => {}
            Ok(added) => tracing::info!(user_id = user.id, added, "Pipeline topped up at login"),
            Err(e) => tracing::warn!(user_id = user.id, error = %e, "Pipeline top-up failed"),
        }
    }

    let access_token = generate_access_token(user.id, &user.email, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    }))
}
