//! Read side of the pipeline: filtered pages and answer statistics.

use foundernest_core::answer::AnswerStats;
use foundernest_core::error::CoreError;
use foundernest_core::pagination::clamp_offset;
use foundernest_core::phase::status_label;
use foundernest_core::types::DbId;
use foundernest_db::models::pipeline::{Answer, PipelineEntry};
use foundernest_db::Store;

use crate::document::load_investor;
use crate::error::PipelineResult;

/// Optional filter and window for [`list_pipeline`].
#[derive(Debug, Clone, Default)]
pub struct PipelineQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub phase: Option<String>,
}

/// Entries of one investor's pipeline in insertion order.
///
/// The phase filter is applied before the window, so `offset` and `limit`
/// count matching entries only. With neither bound set the whole filtered
/// pipeline is returned.
pub async fn list_pipeline(
    store: &dyn Store,
    investor_id: DbId,
    query: &PipelineQuery,
) -> PipelineResult<Vec<PipelineEntry>> {
    if let Some(phase) = query.phase.as_deref() {
        if status_label(phase).is_none() {
            return Err(CoreError::Validation(format!("Unknown phase '{phase}'")).into());
        }
    }

    let limit = query.limit.map(|l| l.max(0));
    let offset = clamp_offset(query.offset);

    store
        .list_pipeline(investor_id, query.phase.as_deref(), limit, offset)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Investor",
                id: investor_id,
            }
            .into()
        })
}

/// Answers of type `criterion_type` on the investor's entry for `company_id`.
pub async fn answers_for_company(
    store: &dyn Store,
    investor_id: DbId,
    company_id: DbId,
    criterion_type: &str,
) -> PipelineResult<Vec<Answer>> {
    let doc = load_investor(store, investor_id).await?;
    let entry = doc.entry(company_id).ok_or(CoreError::NotFound {
        entity: "PipelineEntry",
        id: company_id,
    })?;

    Ok(entry
        .answers
        .iter()
        .filter(|a| a.criterion_type == criterion_type)
        .cloned()
        .collect())
}

/// Tally of [`answers_for_company`].
pub async fn answer_stats(
    store: &dyn Store,
    investor_id: DbId,
    company_id: DbId,
    criterion_type: &str,
) -> PipelineResult<AnswerStats> {
    let answers = answers_for_company(store, investor_id, company_id, criterion_type).await?;
    Ok(AnswerStats::tally(answers.iter().map(|a| a.answer.as_str())))
}
