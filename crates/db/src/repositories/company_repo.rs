//! Repository for the `companies` table.

use foundernest_core::types::DbId;
use sqlx::PgPool;

use crate::models::company::{Company, CreateCompany};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, url, ceo_name, email, telephone, created_at";

/// Provides CRUD operations for the company registry.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCompany) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies (name, url, ceo_name, email, telephone)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&input.name)
            .bind(&input.url)
            .bind(&input.ceo_name)
            .bind(&input.email)
            .bind(&input.telephone)
            .fetch_one(pool)
            .await
    }

    /// Find a company by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of companies in creation order.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies ORDER BY id ASC LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Company>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every company in creation order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies ORDER BY id ASC");
        sqlx::query_as::<_, Company>(&query).fetch_all(pool).await
    }

    /// Delete a company row. Returns `true` if a row was removed.
    ///
    /// Pipeline snapshots that reference the company are not touched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
