//! Company registry and the fan-out of new companies into investor pipelines.
//!
//! Creating a company persists it first and then appends a `WAITING` entry
//! holding a snapshot of it to every investor's pipeline. The fan-out runs
//! as a bounded set of concurrent per-investor writes. A failed write is
//! logged and counted but never undoes the company or the other writes.

use foundernest_core::error::CoreError;
use foundernest_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use foundernest_core::types::DbId;
use foundernest_db::models::company::{Company, CompanySnapshot, CreateCompany};
use foundernest_db::models::pipeline::PipelineEntry;
use foundernest_db::Store;
use futures::stream::{self, StreamExt};
use serde::Serialize;

use crate::document::{modify_investor, Mutation};
use crate::error::PipelineResult;

/// Aggregate outcome of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FanOutReport {
    /// Investors found when the fan-out started.
    pub targeted: usize,
    /// Investors that received a new entry.
    pub delivered: usize,
    /// Investors that already tracked the company.
    pub already_tracked: usize,
    /// Investors whose write failed.
    pub failed: usize,
    /// The investor list itself could not be loaded; nothing was written.
    pub aborted: bool,
}

/// Result of [`create_company`].
#[derive(Debug, Clone, Serialize)]
pub struct CompanyCreated {
    pub company: Company,
    pub fan_out: FanOutReport,
}

/// Persist a company, then fan it out to every investor.
///
/// Only the registry insert can fail this call.
pub async fn create_company(
    store: &dyn Store,
    input: &CreateCompany,
    concurrency: usize,
) -> PipelineResult<CompanyCreated> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Company name must not be empty".into()).into());
    }

    let company = store.create_company(input).await?;
    tracing::info!(company_id = company.id, name = %company.name, "Company created");

    let fan_out = fan_out(store, &company, concurrency).await;

    Ok(CompanyCreated { company, fan_out })
}

/// Append a snapshot of `company` to every investor pipeline.
///
/// At most `concurrency` investor writes are in flight at once.
pub async fn fan_out(store: &dyn Store, company: &Company, concurrency: usize) -> FanOutReport {
    let investor_ids = match store.list_investor_ids().await {
        Ok(ids) => ids,
        Err(e) => {
            tracing::error!(company_id = company.id, error = %e, "Fan-out aborted: cannot list investors");
            return FanOutReport {
                aborted: true,
                ..FanOutReport::default()
            };
        }
    };

    let snapshot = CompanySnapshot::from(company);
    let outcomes: Vec<(DbId, PipelineResult<bool>)> = stream::iter(investor_ids.iter().copied())
        .map(|investor_id| {
            let snapshot = snapshot.clone();
            async move { (investor_id, track_company(store, investor_id, snapshot).await) }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut report = FanOutReport {
        targeted: investor_ids.len(),
        ..FanOutReport::default()
    };
    for (investor_id, outcome) in outcomes {
        match outcome {
            Ok(true) => report.delivered += 1,
            Ok(false) => report.already_tracked += 1,
            Err(e) => {
                report.failed += 1;
                tracing::warn!(
                    company_id = company.id,
                    investor_id,
                    error = %e,
                    "Fan-out write failed"
                );
            }
        }
    }

    tracing::info!(
        company_id = company.id,
        targeted = report.targeted,
        delivered = report.delivered,
        already_tracked = report.already_tracked,
        failed = report.failed,
        "Company fan-out finished"
    );

    report
}

/// Add `snapshot` to one investor's pipeline unless it is already there.
///
/// The new entry gets an unanswered slot for each criterion the investor
/// holds at write time. Returns `false` if the company was already tracked.
pub async fn track_company(
    store: &dyn Store,
    investor_id: DbId,
    snapshot: CompanySnapshot,
) -> PipelineResult<bool> {
    modify_investor(store, investor_id, |doc| {
        if doc.entry(snapshot.id).is_some() {
            return Ok(Mutation::Unchanged(false));
        }
        let entry = PipelineEntry::waiting(snapshot.clone(), &doc.criteria);
        doc.pipeline.push(entry);
        Ok(Mutation::Commit(true))
    })
    .await
}

/// One page of the registry in creation order.
pub async fn list_companies(
    store: &dyn Store,
    limit: Option<i64>,
    offset: Option<i64>,
) -> PipelineResult<Vec<Company>> {
    let limit = clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
    let offset = clamp_offset(offset);
    Ok(store.list_companies(limit, offset).await?)
}

pub async fn get_company(store: &dyn Store, id: DbId) -> PipelineResult<Company> {
    store
        .find_company(id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Company", id }.into())
}

/// Remove a company from the registry.
///
/// Snapshots already copied into investor pipelines are kept.
pub async fn delete_company(store: &dyn Store, id: DbId) -> PipelineResult<bool> {
    let deleted = store.delete_company(id).await?;
    if deleted {
        tracing::info!(company_id = id, "Company deleted; pipeline snapshots retained");
    }
    Ok(deleted)
}
