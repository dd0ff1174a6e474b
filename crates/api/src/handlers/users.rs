//! Handlers for the `/users` resource: registration and the caller's profile.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use foundernest_core::error::CoreError;
use foundernest_core::roles::{validate_role, ROLE_ADMIN, ROLE_INVESTOR};
use foundernest_db::models::user::{CreateUser, User, UserProfile};
use foundernest_db::Store;
use foundernest_pipeline::onboarding;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::MaybeAuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Defaults to `INVESTOR`.
    pub role: Option<String>,
}

/// POST /api/v1/users
///
/// Public for investors. Creating an admin needs an admin bearer token.
pub async fn register(
    State(state): State<AppState>,
    MaybeAuthUser(caller): MaybeAuthUser,
    Json(input): Json<RegisterUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<UserProfile>>)> {
    input.validate()?;

    let role = input.role.as_deref().unwrap_or(ROLE_INVESTOR);
    validate_role(role).map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    if role == ROLE_ADMIN {
        match &caller {
            None => {
                return Err(AppError::Core(CoreError::Unauthorized(
                    "Creating an admin requires authentication".into(),
                )))
            }
            Some(user) if user.role != ROLE_ADMIN => {
                return Err(AppError::Core(CoreError::Forbidden(
                    "Admin role required to create an admin".into(),
                )))
            }
            Some(_) => {}
        }
    }

    let user = create_account(state.store(), &input.name, &input.email, &input.password, role).await?;
    let profile = load_profile(state.store(), user).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: profile })))
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(caller): RequireAuth,
) -> AppResult<Json<DataResponse<UserProfile>>> {
    let user = state
        .store()
        .find_user(caller.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: caller.user_id,
        })?;

    let profile = load_profile(state.store(), user).await?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate, hash and insert a user; investors get their pipeline seeded
/// with every company already in the registry.
///
/// Once the user row is written the call succeeds even if seeding fails.
///
/// Callers are responsible for deciding whether `role` may be created.
pub async fn create_account(
    store: &dyn Store,
    name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> AppResult<User> {
    validate_password_strength(password, MIN_PASSWORD_LENGTH)
        .map_err(|e| AppError::Core(CoreError::Validation(e)))?;

    let email = email.trim().to_lowercase();
    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A user with email '{email}' already exists"
        ))));
    }

    let password_hash = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = store
        .create_user(&CreateUser {
            name: name.trim().to_string(),
            email,
            password_hash,
            role: role.to_string(),
        })
        .await?;

    if user.role == ROLE_INVESTOR {
        // The account exists from here on; a failed seed is topped up at login.
        match onboarding::seed_pipeline(store, user.id).await {
            Ok(seeded) => tracing::info!(user_id = user.id, seeded, "Investor registered"),
            Err(e) => tracing::warn!(
                user_id = user.id,
                error = %e,
                "Investor registered but pipeline seeding failed"
            ),
        }
    } else {
        tracing::info!(user_id = user.id, role = %user.role, "User registered");
    }

    Ok(user)
}

async fn load_profile(store: &dyn Store, user: User) -> AppResult<UserProfile> {
    let doc = store.load_investor(user.id).await?.ok_or(CoreError::NotFound {
        entity: "User",
        id: user.id,
    })?;

    Ok(UserProfile {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        pipeline_size: doc.pipeline.len(),
        criteria: doc.criteria,
        created_at: user.created_at,
    })
}
