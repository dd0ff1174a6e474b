//! Recording answers inside an investor's pipeline.

use foundernest_core::answer::validate_answer;
use foundernest_core::error::CoreError;
use foundernest_core::types::DbId;
use foundernest_db::models::pipeline::Answer;
use foundernest_db::Store;

use crate::document::{modify_investor, Mutation};
use crate::error::PipelineResult;

/// Overwrite the answer for (`company_id`, `criterion_key`).
///
/// Returns the updated answer, or `None` without writing if the investor
/// does not track the company or the entry has no slot for the key.
pub async fn record_answer(
    store: &dyn Store,
    investor_id: DbId,
    company_id: DbId,
    criterion_key: &str,
    value: &str,
) -> PipelineResult<Option<Answer>> {
    validate_answer(value).map_err(CoreError::Validation)?;

    let recorded = modify_investor(store, investor_id, |doc| {
        let slot = doc
            .entry_mut(company_id)
            .and_then(|entry| entry.answers.iter_mut().find(|a| a.key == criterion_key));
        let Some(slot) = slot else {
            return Ok(Mutation::Unchanged(None));
        };
        if slot.answer == value {
            return Ok(Mutation::Unchanged(Some(slot.clone())));
        }
        slot.answer = value.to_string();
        Ok(Mutation::Commit(Some(slot.clone())))
    })
    .await?;

    if recorded.is_some() {
        tracing::info!(investor_id, company_id, key = %criterion_key, answer = %value, "Answer recorded");
    }
    Ok(recorded)
}
