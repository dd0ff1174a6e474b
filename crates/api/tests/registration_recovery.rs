//! Registration when the pipeline seed cannot be written, and the repair at
//! the next login.

mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_test_app_with, get_auth, post_json, PASSWORD};
use foundernest_api::handlers::users::create_account;
use foundernest_core::roles::ROLE_INVESTOR;
use foundernest_core::types::DbId;
use foundernest_db::models::company::{Company, CreateCompany};
use foundernest_db::models::criterion::{CreateCriterion, Criterion};
use foundernest_db::models::pipeline::{InvestorDocument, PipelineEntry};
use foundernest_db::models::user::{CreateUser, User};
use foundernest_db::{MemoryStore, Store, StoreError, StoreResult};
use serde_json::json;

/// A [`MemoryStore`] whose investor saves fail while `fail_saves` is set.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_saves: AtomicBool,
}

#[async_trait]
impl Store for FlakyStore {
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
        self.inner.list_investor_ids().await
    }

    async fn load_investor(&self, id: DbId) -> StoreResult<Option<InvestorDocument>> {
        self.inner.load_investor(id).await
    }

    async fn save_investor(&self, doc: &InvestorDocument) -> StoreResult<bool> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected failure".into()));
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

async fn store_with_company() -> Arc<FlakyStore> {
    let store = Arc::new(FlakyStore::default());
    store
        .inner
        .create_company(&CreateCompany {
            name: "Acme".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    store
}

#[tokio::test]
async fn create_account_succeeds_when_seeding_fails() {
    let store = store_with_company().await;
    store.fail_saves.store(true, Ordering::SeqCst);

    let user = create_account(store.as_ref(), "Ada", "ada@fund.io", PASSWORD, ROLE_INVESTOR)
        .await
        .expect("the user row exists, so registration must succeed");

    let doc = store.load_investor(user.id).await.unwrap().unwrap();
    assert!(doc.pipeline.is_empty());
}

#[tokio::test]
async fn failed_seed_is_repaired_at_login() {
    let store = store_with_company().await;
    let app = || build_test_app_with(store.clone());
    let registration = json!({ "name": "Ada", "email": "ada@fund.io", "password": PASSWORD });

    store.fail_saves.store(true, Ordering::SeqCst);
    let response = post_json(app(), "/api/v1/users", registration.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["pipeline_size"], 0);

    // The account is already usable, so a second registration is a duplicate.
    let again = post_json(app(), "/api/v1/users", registration).await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    store.fail_saves.store(false, Ordering::SeqCst);
    let login = json!({ "email": "ada@fund.io", "password": PASSWORD });
    let response = post_json(app(), "/api/v1/auth/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
    let token = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let me = body_json(get_auth(app(), "/api/v1/users/me", &token).await).await;
    assert_eq!(me["data"]["pipeline_size"], 1);

    let entries = body_json(get_auth(app(), "/api/v1/pipeline", &token).await).await;
    assert_eq!(entries["data"][0]["company"]["name"], "Acme");
    assert_eq!(entries["data"][0]["key"], "WAITING");
}

#[tokio::test]
async fn login_still_succeeds_when_top_up_fails() {
    let store = store_with_company().await;
    store.fail_saves.store(true, Ordering::SeqCst);
    create_account(store.as_ref(), "Ada", "ada@fund.io", PASSWORD, ROLE_INVESTOR)
        .await
        .unwrap();

    let login = json!({ "email": "ada@fund.io", "password": PASSWORD });
    let response = post_json(build_test_app_with(store.clone()), "/api/v1/auth/login", login).await;

    assert_eq!(response.status(), StatusCode::OK);
}
