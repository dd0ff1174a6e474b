//! Investors adopting catalog criteria.

use foundernest_core::error::CoreError;
use foundernest_core::types::DbId;
use foundernest_db::models::pipeline::SelectedCriterion;
use foundernest_db::Store;

use crate::document::{modify_loaded, reconcile_answers, Mutation};
use crate::error::PipelineResult;

/// Adopt criterion `criterion_id` with importance tag `criterion_type`.
///
/// The criterion and the investor are loaded concurrently and both must
/// exist. The selection is appended to the investor's criteria and every
/// existing pipeline entry receives an unanswered slot for it; any other
/// slot drift is repaired in the same write.
pub async fn select_criterion(
    store: &dyn Store,
    investor_id: DbId,
    criterion_id: DbId,
    criterion_type: &str,
) -> PipelineResult<SelectedCriterion> {
    if criterion_type.trim().is_empty() {
        return Err(CoreError::Validation("Criterion type must not be empty".into()).into());
    }

    let (criterion, doc) = tokio::try_join!(
        store.find_criterion(criterion_id),
        store.load_investor(investor_id)
    )?;
    let criterion = criterion.ok_or(CoreError::NotFound {
        entity: "Criterion",
        id: criterion_id,
    })?;
    let doc = doc.ok_or(CoreError::NotFound {
        entity: "Investor",
        id: investor_id,
    })?;

    let selected = SelectedCriterion::from_criterion(&criterion, criterion_type);

    let backfilled = modify_loaded(store, investor_id, Some(doc), |doc| {
        if doc.has_criterion(&selected.key) {
            return Err(CoreError::Conflict(format!(
                "Criterion '{}' is already selected",
                selected.key
            )));
        }
        doc.criteria.push(selected.clone());
        Ok(Mutation::Commit(reconcile_answers(doc)))
    })
    .await?;

    tracing::info!(
        investor_id,
        criterion_id,
        key = %selected.key,
        criterion_type = %selected.criterion_type,
        backfilled,
        "Criterion selected"
    );

    Ok(selected)
}
