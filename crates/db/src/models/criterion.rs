//! Criterion catalog entity model and DTOs.

use foundernest_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `criteria` table. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Criterion {
    pub id: DbId,
    pub text: String,
    pub key: String,
    pub icon: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new criterion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCriterion {
    pub text: String,
    pub key: String,
    pub icon: String,
}
