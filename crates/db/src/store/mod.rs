//! Document store abstraction.
//!
//! The pipeline services only ever talk to a `dyn Store`. Two backends are
//! provided:
//!
//! - [`postgres::PgStore`] -- sqlx/PostgreSQL, embedded documents as JSONB.
//! - [`memory::MemoryStore`] -- process-local maps behind a `RwLock`, used
//!   when no database is configured and by the test suites.

use async_trait::async_trait;
use foundernest_core::types::DbId;

use crate::error::StoreResult;
use crate::models::company::{Company, CreateCompany};
use crate::models::criterion::{CreateCriterion, Criterion};
use crate::models::pipeline::{InvestorDocument, PipelineEntry};
use crate::models::user::{CreateUser, User};

pub mod memory;
pub mod postgres;

#[async_trait]
pub trait Store: Send + Sync {
    /// Verify that the backend can serve requests.
    async fn health_check(&self) -> StoreResult<()>;

    // --- Criteria catalog ---

    /// Persist a criterion. Duplicate keys fail with
    /// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation).
    async fn create_criterion(&self, input: &CreateCriterion) -> StoreResult<Criterion>;
    async fn find_criterion(&self, id: DbId) -> StoreResult<Option<Criterion>>;
    async fn find_criterion_by_key(&self, key: &str) -> StoreResult<Option<Criterion>>;
    async fn list_criteria(&self, limit: i64, offset: i64) -> StoreResult<Vec<Criterion>>;

    // --- Company registry ---

    async fn create_company(&self, input: &CreateCompany) -> StoreResult<Company>;
    async fn find_company(&self, id: DbId) -> StoreResult<Option<Company>>;
    async fn list_companies(&self, limit: i64, offset: i64) -> StoreResult<Vec<Company>>;
    async fn list_all_companies(&self) -> StoreResult<Vec<Company>>;
    /// Remove the registry row only. Returns `true` if it existed.
    async fn delete_company(&self, id: DbId) -> StoreResult<bool>;

    // --- Users ---

    /// Persist a user with empty documents. Duplicate emails fail with
    /// [`StoreError::UniqueViolation`](crate::StoreError::UniqueViolation).
    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    /// IDs of every user with the `INVESTOR` role, ascending.
    async fn list_investor_ids(&self) -> StoreResult<Vec<DbId>>;

    // --- Investor documents ---

    async fn load_investor(&self, id: DbId) -> StoreResult<Option<InvestorDocument>>;

    /// Compare-and-swap write of both embedded lists.
    ///
    /// Succeeds (returns `true`) only if the stored version equals
    /// `doc.version`; the stored version is then incremented.
    async fn save_investor(&self, doc: &InvestorDocument) -> StoreResult<bool>;

    /// Filtered, sliced read of one pipeline. `None` if the user is unknown.
    async fn list_pipeline(
        &self,
        id: DbId,
        phase_key: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Option<Vec<PipelineEntry>>>;
}
