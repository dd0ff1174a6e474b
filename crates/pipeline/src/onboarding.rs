//! Seeding a newly registered investor's pipeline.

use foundernest_core::types::DbId;
use foundernest_db::models::company::CompanySnapshot;
use foundernest_db::models::pipeline::PipelineEntry;
use foundernest_db::Store;

use crate::document::{modify_investor, Mutation};
use crate::error::PipelineResult;

/// Add a `WAITING` entry for every registry company the investor does not
/// track yet. Returns the number of entries added.
///
/// Called after the user row exists, so a company created concurrently is
/// either picked up here or reaches the investor through the fan-out. Both
/// paths skip companies that are already tracked.
pub async fn seed_pipeline(store: &dyn Store, investor_id: DbId) -> PipelineResult<usize> {
    let companies = store.list_all_companies().await?;

    let added = modify_investor(store, investor_id, |doc| {
        let mut added = 0;
        for company in &companies {
            if doc.entry(company.id).is_none() {
                let entry = PipelineEntry::waiting(CompanySnapshot::from(company), &doc.criteria);
                doc.pipeline.push(entry);
                added += 1;
            }
        }
        Ok(if added == 0 {
            Mutation::Unchanged(0)
        } else {
            Mutation::Commit(added)
        })
    })
    .await?;

    tracing::info!(investor_id, added, "Investor pipeline seeded");
    Ok(added)
}
