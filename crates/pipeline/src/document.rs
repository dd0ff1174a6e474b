//! Versioned read-modify-write of investor documents.
//!
//! A mutation closure runs against a freshly loaded document. If it asks for
//! a commit, the document is saved with a compare-and-swap on its version; a
//! lost race reloads the document and runs the closure again. Two writers
//! touching the same investor therefore never overwrite each other.
//!
//! Writers in one process also queue on a per-investor lock, so the
//! compare-and-swap only loses against other processes sharing the store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};
use std::time::Duration;

use foundernest_core::error::CoreError;
use foundernest_core::types::DbId;
use foundernest_db::models::pipeline::{Answer, InvestorDocument};
use foundernest_db::Store;
use tokio::sync::OwnedMutexGuard;

use crate::error::PipelineResult;

/// Attempts before a contended write gives up with `Conflict`.
pub const MAX_WRITE_ATTEMPTS: u32 = 10;

/// First retry delay; doubles per lost race up to [`MAX_RETRY_BACKOFF`].
const BASE_RETRY_BACKOFF: Duration = Duration::from_millis(5);
const MAX_RETRY_BACKOFF: Duration = Duration::from_millis(500);

type LockTable = Mutex<HashMap<DbId, Arc<tokio::sync::Mutex<()>>>>;

static WRITE_LOCKS: OnceLock<LockTable> = OnceLock::new();

fn write_locks() -> &'static LockTable {
    WRITE_LOCKS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Exclusive right to write one investor document in this process.
///
/// The table entry is removed when the last holder or waiter lets go.
struct WriteGuard {
    investor_id: DbId,
    lock: Arc<tokio::sync::Mutex<()>>,
    _held: OwnedMutexGuard<()>,
}

impl Drop for WriteGuard {
    fn drop(&mut self) {
        let mut table = write_locks().lock().unwrap_or_else(PoisonError::into_inner);
        // One reference in the table, one here, one inside `_held`.
        if Arc::strong_count(&self.lock) == 3 {
            table.remove(&self.investor_id);
        }
    }
}

async fn lock_investor(investor_id: DbId) -> WriteGuard {
    let lock = {
        let mut table = write_locks().lock().unwrap_or_else(PoisonError::into_inner);
        table.entry(investor_id).or_default().clone()
    };
    let held = lock.clone().lock_owned().await;
    WriteGuard {
        investor_id,
        lock,
        _held: held,
    }
}

fn retry_backoff(attempt: u32) -> Duration {
    BASE_RETRY_BACKOFF
        .saturating_mul(1 << attempt.saturating_sub(1).min(16))
        .min(MAX_RETRY_BACKOFF)
}

/// What a mutation closure decided.
#[derive(Debug)]
pub enum Mutation<T> {
    /// Persist the modified document, then return the value.
    Commit(T),
    /// Nothing changed; return the value without writing.
    Unchanged(T),
}

/// Load, mutate and conditionally save one investor document.
///
/// Waits for other writers of the same investor in this process. Fails with
/// `NotFound` if the investor does not exist and with `Conflict` after
/// [`MAX_WRITE_ATTEMPTS`] races lost to other processes. Errors returned by
/// `mutate` abort without writing.
pub async fn modify_investor<T, F>(store: &dyn Store, investor_id: DbId, mutate: F) -> PipelineResult<T>
where
    F: FnMut(&mut InvestorDocument) -> Result<Mutation<T>, CoreError> + Send,
    T: Send,
{
    modify_loaded(store, investor_id, None, mutate).await
}

/// Like [`modify_investor`], but the first attempt uses an already loaded
/// document instead of reading it again.
///
/// A preloaded document that went stale while waiting for the lock simply
/// loses its compare-and-swap and is reloaded.
pub async fn modify_loaded<T, F>(
    store: &dyn Store,
    investor_id: DbId,
    mut preloaded: Option<InvestorDocument>,
    mut mutate: F,
) -> PipelineResult<T>
where
    F: FnMut(&mut InvestorDocument) -> Result<Mutation<T>, CoreError> + Send,
    T: Send,
{
    let _guard = lock_investor(investor_id).await;

    for attempt in 1..=MAX_WRITE_ATTEMPTS {
        let reloaded = preloaded.is_none();
        let mut doc = match preloaded.take() {
            Some(doc) => doc,
            None => load_investor(store, investor_id).await?,
        };

        match mutate(&mut doc)? {
            Mutation::Unchanged(value) => return Ok(value),
            Mutation::Commit(value) => {
                if store.save_investor(&doc).await? {
                    return Ok(value);
                }
                tracing::debug!(
                    investor_id,
                    attempt,
                    "Investor document changed concurrently, retrying"
                );
                // A stale preloaded copy is not contention.
                if reloaded && attempt < MAX_WRITE_ATTEMPTS {
                    tokio::time::sleep(retry_backoff(attempt)).await;
                }
            }
        }
    }

    tracing::warn!(investor_id, "Investor document write gave up after repeated conflicts");
    Err(CoreError::Conflict(format!(
        "Investor {investor_id} was modified concurrently; gave up after {MAX_WRITE_ATTEMPTS} attempts"
    ))
    .into())
}

/// Load an investor document or fail with `NotFound`.
pub async fn load_investor(store: &dyn Store, investor_id: DbId) -> PipelineResult<InvestorDocument> {
    store
        .load_investor(investor_id)
        .await?
        .ok_or_else(|| {
            CoreError::NotFound {
                entity: "Investor",
                id: investor_id,
            }
            .into()
        })
}

/// Bring every entry's answers in line with the selected criteria.
///
/// Adds an unanswered slot for each selected criterion an entry lacks and
/// drops answers whose key is no longer selected. Returns how many slots
/// were added.
pub fn reconcile_answers(doc: &mut InvestorDocument) -> usize {
    let criteria = &doc.criteria;
    let mut added = 0;
    for entry in &mut doc.pipeline {
        entry
            .answers
            .retain(|a| criteria.iter().any(|c| c.key == a.key));
        for criterion in criteria {
            if !entry.answers.iter().any(|a| a.key == criterion.key) {
                entry.answers.push(Answer::unanswered(criterion));
                added += 1;
            }
        }
    }
    added
}
