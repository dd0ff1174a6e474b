#![allow(dead_code)]

use std::collections::HashSet;

use async_trait::async_trait;
use foundernest_core::roles::{ROLE_ADMIN, ROLE_INVESTOR};
use foundernest_core::types::DbId;
use foundernest_db::models::company::{Company, CreateCompany};
use foundernest_db::models::criterion::{CreateCriterion, Criterion};
use foundernest_db::models::pipeline::{InvestorDocument, PipelineEntry};
use foundernest_db::models::user::{CreateUser, User};
use foundernest_db::{MemoryStore, Store, StoreError, StoreResult};
use foundernest_pipeline::{catalog, onboarding};

/// Register a user the way the HTTP layer does: insert, then seed.
pub async fn register(store: &dyn Store, email: &str, role: &str) -> User {
    let user = store
        .create_user(&CreateUser {
            name: email.split('@').next().unwrap_or("user").to_string(),
            email: email.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: role.to_string(),
        })
        .await
        .expect("user creation should succeed");
    if role == ROLE_INVESTOR {
        onboarding::seed_pipeline(store, user.id)
            .await
            .expect("seeding should succeed");
    }
    user
}

pub async fn investor(store: &dyn Store, email: &str) -> User {
    register(store, email, ROLE_INVESTOR).await
}

pub async fn admin(store: &dyn Store, email: &str) -> User {
    register(store, email, ROLE_ADMIN).await
}

pub fn company(name: &str) -> CreateCompany {
    CreateCompany {
        name: name.to_string(),
        url: Some(format!("https://{}.example", name.to_lowercase())),
        ceo_name: Some("Jane Doe".to_string()),
        email: None,
        telephone: None,
    }
}

pub async fn criterion(store: &dyn Store, key: &str) -> Criterion {
    catalog::create_criterion(
        store,
        &CreateCriterion {
            text: format!("{key} statement"),
            key: key.to_string(),
            icon: "car".to_string(),
        },
    )
    .await
    .expect("criterion creation should succeed")
}

pub async fn pipeline(store: &dyn Store, investor_id: DbId) -> Vec<PipelineEntry> {
    store
        .load_investor(investor_id)
        .await
        .unwrap()
        .expect("investor should exist")
        .pipeline
}

/// Every entry holds exactly one answer per selected criterion key.
pub async fn assert_answers_match_criteria(store: &dyn Store, investor_id: DbId) {
    let doc = store.load_investor(investor_id).await.unwrap().unwrap();
    let expected: HashSet<&str> = doc.criteria.iter().map(|c| c.key.as_str()).collect();
    for entry in &doc.pipeline {
        let keys: HashSet<&str> = entry.answers.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(entry.answers.len(), doc.criteria.len(), "entry {}", entry.company.id);
        assert_eq!(keys, expected, "entry {}", entry.company.id);
    }
}

/// A [`MemoryStore`] that can be told to fail selected calls.
#[derive(Default)]
pub struct FailingStore {
    pub inner: MemoryStore,
    pub fail_saves_for: HashSet<DbId>,
    pub fail_investor_listing: bool,
}

fn injected() -> StoreError {
    StoreError::Unavailable("injected failure".into())
}

#[async_trait]
impl Store for FailingStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }

    async fn create_criterion(&self, input: &CreateCriterion) -> StoreResult<Criterion> {
        self.inner.create_criterion(input).await
    }

    async fn find_criterion(&self, id: DbId) -> StoreResult<Option<Criterion>> {
        self.inner.find_criterion(id).await
    }

    async fn find_criterion_by_key(&self, key: &str) -> StoreResult<Option<Criterion>> {
        self.inner.find_criterion_by_key(key).await
    }

    async fn list_criteria(&self, limit: i64, offset: i64) -> StoreResult<Vec<Criterion>> {
        self.inner.list_criteria(limit, offset).await
    }

    async fn create_company(&self, input: &CreateCompany) -> StoreResult<Company> {
        self.inner.create_company(input).await
    }

    async fn find_company(&self, id: DbId) -> StoreResult<Option<Company>> {
        self.inner.find_company(id).await
    }

    async fn list_companies(&self, limit: i64, offset: i64) -> StoreResult<Vec<Company>> {
        self.inner.list_companies(limit, offset).await
    }

    async fn list_all_companies(&self) -> StoreResult<Vec<Company>> {
        self.inner.list_all_companies().await
    }

    async fn delete_company(&self, id: DbId) -> StoreResult<bool> {
        self.inner.delete_company(id).await
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        self.inner.create_user(input).await
    }

    async fn find_user(&self, id: DbId) -> StoreResult<Option<User>> {
        self.inner.find_user(id).await
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.inner.find_user_by_email(email).await
    }

    async fn list_investor_ids(&self) -> StoreResult<Vec<DbId>> {
        if self.fail_investor_listing {
            return Err(injected());
        }
        self.inner.list_investor_ids().await
    }

    async fn load_investor(&self, id: DbId) -> StoreResult<Option<InvestorDocument>> {
        self.inner.load_investor(id).await
    }

    async fn save_investor(&self, doc: &InvestorDocument) -> StoreResult<bool> {
        if self.fail_saves_for.contains(&doc.id) {
            return Err(injected());
        }
        self.inner.save_investor(doc).await
    }

    async fn list_pipeline(
        &self,
        id: DbId,
        phase_key: Option<&str>,
        limit: Option<i64>,
        offset: i64,
    ) -> StoreResult<Option<Vec<PipelineEntry>>> {
        self.inner.list_pipeline(id, phase_key, limit, offset).await
    }
}
