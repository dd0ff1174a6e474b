//! In-memory [`Store`].
//!
//! Mirrors the PostgreSQL semantics that the pipeline relies on: per-table
//! ascending ids, unique criterion keys and user emails, and versioned
//! compare-and-swap writes of investor documents.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use foundernest_core::pagination::slice_page;
use foundernest_core::roles::ROLE_INVESTOR;
use foundernest_core::types::DbId;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::company::{Company, CreateCompany};
use crate::models::criterion::{CreateCriterion, Criterion};
use crate::models::pipeline::{InvestorDocument, PipelineEntry};
use crate::models::user::{CreateUser, User};
use crate::store::Store;

struct UserRecord {
    user: User,
    doc: InvestorDocument,
}

#[derive(Default)]
struct Tables {
    criteria: BTreeMap<DbId, Criterion>,
    companies: BTreeMap<DbId, Company>,
    users: BTreeMap<DbId, UserRecord>,
    next_criterion_id: DbId,
    next_company_id: DbId,
    next_user_id: DbId,
}

fn next_id(counter: &mut DbId) -> DbId {
    *counter += 1;
    *counter
}

fn page<T: Clone>(rows: &BTreeMap<DbId, T>, limit: i64, offset: i64) -> Vec<T> {
    slice_page(rows.values().cloned().collect(), Some(limit), Some(offset))
}

/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn create_criterion(&self, input: &CreateCriterion) -> StoreResult<Criterion> {
        let mut tables = self.tables.write().await;
        if tables.criteria.values().any(|c| c.key == input.key) {
            return Err(StoreError::UniqueViolation("uq_criteria_key".into()));
        }
        let id = next_id(&mut tables.next_criterion_id);
        let criterion = Criterion {
            id,
            text: input.text.clone(),
            key: input.key.clone(),
            icon: input.icon.clone(),
            created_at: Utc::now(),
        };
        tables.criteria.insert(id, criterion.clone());
        Ok(criterion)
    }

    async fn find_criterion(&self, id: DbId) -> StoreResult<Option<Criterion>> {
        Ok(self.tables.read().await.criteria.get(&id).cloned())
    }

    async fn find_criterion_by_key(&self, key: &str) -> StoreResult<Option<Criterion>> {
        let tables = self.tables.read().await;
        Ok(tables.criteria.values().find(|c| c.key == key).cloned())
    }

    async fn list_criteria(&self, limit: i64, offset: i64) -> StoreResult<Vec<Criterion>> {
        Ok(page(&self.tables.read().await.criteria, limit, offset))
    }

    async fn create_company(&self, input: &CreateCompany) -> StoreResult<Company> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.next_company_id);
        let company = Company {
            id,
            name: input.name.clone(),
            url: input.url.clone(),
            ceo_name: input.ceo_name.clone(),
            email: input.email.clone(),
            telephone: input.telephone.clone(),
            created_at: Utc::now(),
        };
        tables.companies.insert(id, company.clone());
        Ok(company)
    }

    async fn find_company(&self, id: DbId) -> StoreResult<Option<Company>> {
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn list_companies(&self, limit: i64, offset: i64) -> StoreResult<Vec<Company>> {
        Ok(page(&self.tables.read().await.companies, limit, offset))
    }

    async fn list_all_companies(&self) -> StoreResult<Vec<Company>> {
        Ok(self.tables.read().await.companies.values().cloned().collect())
    }

    async fn delete_company(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.tables.write().await.companies.remove(&id).is_some())
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|r| r.user.email == input.email) {
            return Err(StoreError::UniqueViolation("uq_users_email".into()));
        }
        let id = next_id(&mut tables.next_user_id);
        let user = User {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            created_at: Utc::now(),
        };
        let doc = InvestorDocument {
            id,
            criteria: Vec::new(),
            pipeline: Vec::new(),
            version: 0,
        };
        tables.users.insert(
            id,
            UserRecord {
                user: user.clone(),
                doc,
            },
        );
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).map(|r| r.user.clone()))
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|r| r.user.email == email)
            .map(|r| r.user.clone()))
    }

    async fn list_investor_ids(&self) -> StoreResult<Vec<DbId>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .filter(|r| r.user.role == ROLE_INVESTOR)
            .map(|r| r.user.id)
            .collect())
    }

    async fn load_investor(&self, id: DbId) -> StoreResult<Option<InvestorDocument>> {
        Ok(self.tables.read().await.users.get(&id).map(|r| r.doc.clone()))
    }

    async fn save_investor(&self, doc: &InvestorDocument) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let Some(record) = tables.users.get_mut(&doc.id) else {
            return Ok(false);
        };
        if record.doc.version != doc.version {
            return Ok(false);
        }
        record.doc = InvestorDocument {
            version: doc.version + 1,
            ..doc.clone()
        };
        Ok(true)
    }

    async fn list_pipeline(
        &self,
        id: DbId,
        phase_key: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Option<Vec<PipelineEntry>>> {
        let tables = self.tables.read().await;
        let Some(record) = tables.users.get(&id) else {
            return Ok(None);
        };
        let filtered: Vec<PipelineEntry> = record
            .doc
            .pipeline
            .iter()
            .filter(|e| phase_key.map_or(true, |key| e.key == key))
            .cloned()
            .collect();
        Ok(Some(slice_page(filtered, limit, Some(offset))))
    }
}
