//! Criteria catalog: the global list of evaluable statements.

use foundernest_core::error::CoreError;
use foundernest_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use foundernest_db::models::criterion::{CreateCriterion, Criterion};
use foundernest_db::Store;

use crate::error::PipelineResult;

/// Add a criterion to the catalog.
///
/// `text` and `key` must be non-blank and `key` must not already exist.
/// The unique index behind the store catches a concurrent duplicate that
/// slips past the pre-check.
pub async fn create_criterion(store: &dyn Store, input: &CreateCriterion) -> PipelineResult<Criterion> {
    if input.text.trim().is_empty() {
        return Err(CoreError::Validation("Criterion text must not be empty".into()).into());
    }
    if input.key.trim().is_empty() {
        return Err(CoreError::Validation("Criterion key must not be empty".into()).into());
    }

    if store.find_criterion_by_key(&input.key).await?.is_some() {
        return Err(CoreError::Conflict(format!(
            "A criterion with key '{}' already exists",
            input.key
        ))
        .into());
    }

    let criterion = store.create_criterion(input).await?;
    tracing::info!(criterion_id = criterion.id, key = %criterion.key, "Criterion created");
    Ok(criterion)
}

/// One page of the catalog in creation order.
pub async fn list_criteria(
    store: &dyn Store,
    limit: Option<i64>,
    offset: Option<i64>,
) -> PipelineResult<Vec<Criterion>> {
    let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(offset);
    Ok(store.list_criteria(limit, offset).await?)
}
