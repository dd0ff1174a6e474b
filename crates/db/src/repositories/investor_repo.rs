//! Repository for the embedded investor documents on the `users` table.
//!
//! `selected_criteria` and `pipeline` are JSONB arrays. Every write bumps
//! `version` and is conditional on the version the caller loaded.

use foundernest_core::types::DbId;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use crate::models::pipeline::{InvestorDocument, PipelineEntry, SelectedCriterion};

#[derive(FromRow)]
struct InvestorRow {
    id: DbId,
    selected_criteria: Json<Vec<SelectedCriterion>>,
    pipeline: Json<Vec<PipelineEntry>>,
    version: i64,
}

impl From<InvestorRow> for InvestorDocument {
    fn from(row: InvestorRow) -> Self {
        Self {
            id: row.id,
            criteria: row.selected_criteria.0,
            pipeline: row.pipeline.0,
            version: row.version,
        }
    }
}

/// Provides versioned document access for investors.
pub struct InvestorRepo;

impl InvestorRepo {
    /// Load the document of a user together with its current version.
    pub async fn load(pool: &PgPool, id: DbId) -> Result<Option<InvestorDocument>, sqlx::Error> {
        let row = sqlx::query_as::<_, InvestorRow>(
            "SELECT id, selected_criteria, pipeline, version FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(InvestorDocument::from))
    }

    /// Replace both embedded lists if the stored version still equals
    /// `doc.version`.
    ///
    /// Returns `false` when another writer got there first (or the user is
    /// gone); the caller should reload and retry.
    pub async fn save(pool: &PgPool, doc: &InvestorDocument) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                selected_criteria = $2,
                pipeline = $3,
                version = version + 1
             WHERE id = $1 AND version = $4",
        )
        .bind(doc.id)
        .bind(Json(&doc.criteria))
        .bind(Json(&doc.pipeline))
        .bind(doc.version)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Page through one investor's pipeline, optionally within one phase.
    ///
    /// Filtering happens before slicing and insertion order is kept. A `None`
    /// limit means no limit. Returns `None` if the user does not exist.
    pub async fn list_pipeline(
        pool: &PgPool,
        id: DbId,
        phase_key: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> Result<Option<Vec<PipelineEntry>>, sqlx::Error> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        if !exists {
            return Ok(None);
        }

        let entries = sqlx::query_scalar::<_, Json<PipelineEntry>>(
            "SELECT e.entry
             FROM users u
             CROSS JOIN LATERAL jsonb_array_elements(u.pipeline) WITH ORDINALITY AS e(entry, idx)
             WHERE u.id = $1
               AND ($2::text IS NULL OR e.entry->>'key' = $2)
             ORDER BY e.idx
             LIMIT $3 OFFSET $4",
        )
        .bind(id)
        .bind(phase_key)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(Some(entries.into_iter().map(|Json(entry)| entry).collect()))
    }
}
