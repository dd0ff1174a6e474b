//! Repository for the scalar columns of the `users` table.
//!
//! The embedded documents live in the same table but are read and written
//! through [`InvestorRepo`](super::InvestorRepo).

use foundernest_core::roles::ROLE_INVESTOR;
use foundernest_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, created_at";

/// Provides create and read operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with empty documents, returning the created row.
    ///
    /// Fails with a unique violation on `uq_users_email` if the email exists.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// IDs of every user holding the `INVESTOR` role.
    pub async fn list_investor_ids(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE role = $1 ORDER BY id ASC")
            .bind(ROLE_INVESTOR)
            .fetch_all(pool)
            .await
    }
}
