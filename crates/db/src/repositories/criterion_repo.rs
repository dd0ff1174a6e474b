//! Repository for the `criteria` table.

use foundernest_core::types::DbId;
use sqlx::PgPool;

use crate::models::criterion::{CreateCriterion, Criterion};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, text, key, icon, created_at";

/// Provides create and read operations for the criteria catalog.
pub struct CriterionRepo;

impl CriterionRepo {
    /// Insert a new criterion, returning the created row.
    ///
    /// Fails with a unique violation on `uq_criteria_key` if the key exists.
    pub async fn create(pool: &PgPool, input: &CreateCriterion) -> Result<Criterion, sqlx::Error> {
        let query = format!(
            "INSERT INTO criteria (text, key, icon)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Criterion>(&query)
            .bind(&input.text)
            .bind(&input.key)
            .bind(&input.icon)
            .fetch_one(pool)
            .await
    }

    /// Find a criterion by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Criterion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM criteria WHERE id = $1");
        sqlx::query_as::<_, Criterion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a criterion by its key (case-sensitive).
    pub async fn find_by_key(pool: &PgPool, key: &str) -> Result<Option<Criterion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM criteria WHERE key = $1");
        sqlx::query_as::<_, Criterion>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }

    /// List criteria in creation order.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Criterion>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM criteria ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Criterion>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
