//! Moving one pipeline entry between screening phases.

use foundernest_core::error::CoreError;
use foundernest_core::phase::resolve_phase;
use foundernest_core::types::DbId;
use foundernest_db::Store;

use crate::document::{modify_investor, Mutation};
use crate::error::PipelineResult;

/// Set the phase of the investor's entry for `company_id`.
///
/// Any known phase may follow any other. Returns `false` if the investor
/// does not track the company. Setting the phase an entry already has is a
/// no-op and does not write.
pub async fn advance_phase(
    store: &dyn Store,
    investor_id: DbId,
    company_id: DbId,
    key: &str,
    status: Option<&str>,
) -> PipelineResult<bool> {
    let phase = resolve_phase(key, status).map_err(CoreError::Validation)?;

    let found = modify_investor(store, investor_id, |doc| {
        let Some(entry) = doc.entry_mut(company_id) else {
            return Ok(Mutation::Unchanged(false));
        };
        if entry.key == phase.key && entry.status == phase.status {
            return Ok(Mutation::Unchanged(true));
        }
        entry.set_phase(&phase);
        Ok(Mutation::Commit(true))
    })
    .await?;

    if found {
        tracing::info!(investor_id, company_id, phase = %phase.key, "Pipeline phase set");
    }
    Ok(found)
}
