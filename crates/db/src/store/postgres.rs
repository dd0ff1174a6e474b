//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use foundernest_core::types::DbId;

use crate::error::StoreResult;
use crate::models::company::{Company, CreateCompany};
use crate::models::criterion::{CreateCriterion, Criterion};
use crate::models::pipeline::{InvestorDocument, PipelineEntry};
use crate::models::user::{CreateUser, User};
use crate::repositories::{CompanyRepo, CriterionRepo, InvestorRepo, UserRepo};
use crate::store::Store;
use crate::DbPool;

/// Delegates every call to the sqlx repositories.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(crate::health_check(&self.pool).await?)
    }

    async fn create_criterion(&self, input: &CreateCriterion) -> StoreResult<Criterion> {
        Ok(CriterionRepo::create(&self.pool, input).await?)
    }

    async fn find_criterion(&self, id: DbId) -> StoreResult<Option<Criterion>> {
        Ok(CriterionRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_criterion_by_key(&self, key: &str) -> StoreResult<Option<Criterion>> {
        Ok(CriterionRepo::find_by_key(&self.pool, key).await?)
    }

    async fn list_criteria(&self, limit: i64, offset: i64) -> StoreResult<Vec<Criterion>> {
        Ok(CriterionRepo::list(&self.pool, limit, offset).await?)
    }

    async fn create_company(&self, input: &CreateCompany) -> StoreResult<Company> {
        Ok(CompanyRepo::create(&self.pool, input).await?)
    }

    async fn find_company(&self, id: DbId) -> StoreResult<Option<Company>> {
        Ok(CompanyRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_companies(&self, limit: i64, offset: i64) -> StoreResult<Vec<Company>> {
        Ok(CompanyRepo::list(&self.pool, limit, offset).await?)
    }

    async fn list_all_companies(&self) -> StoreResult<Vec<Company>> {
        Ok(CompanyRepo::list_all(&self.pool).await?)
    }

    async fn delete_company(&self, id: DbId) -> StoreResult<bool> {
        Ok(CompanyRepo::delete(&self.pool, id).await?)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn list_investor_ids(&self) -> StoreResult<Vec<DbId>> {
        Ok(UserRepo::list_investor_ids(&self.pool).await?)
    }

    async fn load_investor(&self, id: DbId) -> StoreResult<Option<InvestorDocument>> {
        Ok(InvestorRepo::load(&self.pool, id).await?)
    }

    async fn save_investor(&self, doc: &InvestorDocument) -> StoreResult<bool> {
        Ok(InvestorRepo::save(&self.pool, doc).await?)
    }

    async fn list_pipeline(
        &self,
        id: DbId,
        phase_key: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Option<Vec<PipelineEntry>>> {
        Ok(InvestorRepo::list_pipeline(&self.pool, id, phase_key, limit, offset).await?)
    }
}
