//! User entity model and DTOs.

use foundernest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::pipeline::SelectedCriterion;

/// User row from the `users` table, without the embedded documents.
///
/// Contains the password hash -- NEVER serialize this to API responses directly.
/// Use [`UserProfile`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(rename = "criterias")]
    pub criteria: Vec<SelectedCriterion>,
    pub pipeline_size: usize,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. Documents start empty.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
}
