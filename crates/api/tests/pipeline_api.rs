//! HTTP-level tests for the screening pipeline: catalog, registry fan-out,
//! criteria selection, phases, answers and stats.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, get_auth, post_json_auth, put_json_auth,
    register_investor, seed_admin,
};
use foundernest_db::MemoryStore;
use serde_json::{json, Value};

struct World {
    store: Arc<MemoryStore>,
    admin: String,
    investor: String,
}

impl World {
    async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let (_, admin) = seed_admin(&store, "root@fund.io").await;
        let (_, investor) = register_investor(&store, "ada@fund.io").await;
        Self {
            store,
            admin,
            investor,
        }
    }

    fn app(&self) -> axum::Router {
        build_test_app(self.store.clone())
    }

    async fn criterion(&self, key: &str) -> i64 {
        let body = json!({ "text": format!("{key} statement"), "key": key, "icon": "car" });
        let response = post_json_auth(self.app(), "/api/v1/criteria", body, &self.admin).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"]["id"].as_i64().unwrap()
    }

    async fn company(&self, name: &str) -> Value {
        let response = post_json_auth(
            self.app(),
            "/api/v1/companies",
            json!({ "name": name, "url": "https://acme.example" }),
            &self.admin,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["data"].clone()
    }

    async fn select(&self, criterion_id: i64, criterion_type: &str) -> StatusCode {
        let body = json!({ "criterion_id": criterion_id, "type": criterion_type });
        post_json_auth(self.app(), "/api/v1/pipeline/criteria", body, &self.investor)
            .await
            .status()
    }

    async fn pipeline(&self, query: &str) -> Value {
        let response = get_auth(self.app(), &format!("/api/v1/pipeline{query}"), &self.investor).await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await["data"].clone()
    }

    async fn answer(&self, company_id: i64, key: &str, value: &str) -> StatusCode {
        put_json_auth(
            self.app(),
            &format!("/api/v1/pipeline/{company_id}/answers/{key}"),
            json!({ "answer": value }),
            &self.investor,
        )
        .await
        .status()
    }

    async fn phase(&self, company_id: i64, body: Value) -> StatusCode {
        put_json_auth(
            self.app(),
            &format!("/api/v1/pipeline/{company_id}/phase"),
            body,
            &self.investor,
        )
        .await
        .status()
    }
}

#[tokio::test]
async fn screening_flow_end_to_end() {
    let world = World::new().await;
    let ceo = world.criterion("CEO_FULL_TIME").await;

    assert_eq!(world.select(ceo, "MUST").await, StatusCode::CREATED);

    let created = world.company("Acme").await;
    assert_eq!(created["fan_out"]["targeted"], 1);
    assert_eq!(created["fan_out"]["delivered"], 1);
    let acme = created["company"]["id"].as_i64().unwrap();

    let entries = world.pipeline("").await;
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert_eq!(entries[0]["key"], "WAITING");
    assert_eq!(entries[0]["status"], "Waiting Decision");
    assert_eq!(entries[0]["company"]["name"], "Acme");
    assert_eq!(
        entries[0]["answers"],
        json!([{ "text": "CEO_FULL_TIME statement", "key": "CEO_FULL_TIME", "type": "MUST", "answer": "?" }])
    );

    assert_eq!(world.answer(acme, "CEO_FULL_TIME", "Y").await, StatusCode::OK);

    let stats = get_auth(
        world.app(),
        &format!("/api/v1/pipeline/{acme}/stats?type=MUST"),
        &world.investor,
    )
    .await;
    assert_eq!(stats.status(), StatusCode::OK);
    assert_eq!(
        body_json(stats).await["data"],
        json!({ "answered_y": 1, "answered_n": 0, "answered_dn": 0, "total": 1 })
    );

    let moved = put_json_auth(
        world.app(),
        &format!("/api/v1/pipeline/{acme}/phase"),
        json!({ "key": "FIRST_MEETING" }),
        &world.investor,
    )
    .await;
    assert_eq!(moved.status(), StatusCode::OK);
    assert_eq!(body_json(moved).await["data"]["status"], "First Meeting");

    assert!(world.pipeline("?phase=WAITING").await.as_array().unwrap().is_empty());
    assert_eq!(world.pipeline("?phase=FIRST_MEETING").await[0]["company"]["id"], acme);
}

#[tokio::test]
async fn answers_listing_filters_by_type() {
    let world = World::new().await;
    let a = world.criterion("A").await;
    let b = world.criterion("B").await;
    world.select(a, "MUST").await;
    world.select(b, "NICE").await;
    let acme = world.company("Acme").await["company"]["id"].as_i64().unwrap();

    let response = get_auth(
        world.app(),
        &format!("/api/v1/pipeline/{acme}/answers?type=NICE"),
        &world.investor,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let answers = body_json(response).await["data"].clone();
    assert_eq!(answers.as_array().unwrap().len(), 1);
    assert_eq!(answers[0]["key"], "B");
}

#[tokio::test]
async fn selecting_criterion_backfills_existing_entries() {
    let world = World::new().await;
    world.company("Acme").await;
    world.company("Globex").await;
    let key = world.criterion("KEY").await;

    assert_eq!(world.select(key, "MUST").await, StatusCode::CREATED);

    for entry in world.pipeline("").await.as_array().unwrap() {
        assert_eq!(entry["answers"].as_array().unwrap().len(), 1);
        assert_eq!(entry["answers"][0]["answer"], "?");
    }
}

#[tokio::test]
async fn selection_errors_map_to_http() {
    let world = World::new().await;
    let key = world.criterion("KEY").await;

    assert_eq!(world.select(key, "MUST").await, StatusCode::CREATED);
    assert_eq!(world.select(key, "NICE").await, StatusCode::CONFLICT);
    assert_eq!(world.select(9999, "MUST").await, StatusCode::NOT_FOUND);
    assert_eq!(world.select(key, "").await, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn untracked_company_is_not_found() {
    let world = World::new().await;
    let key = world.criterion("KEY").await;
    world.select(key, "MUST").await;

    assert_eq!(world.answer(404, "KEY", "Y").await, StatusCode::NOT_FOUND);
    assert_eq!(
        world.phase(404, json!({ "key": "DISCARDED" })).await,
        StatusCode::NOT_FOUND
    );

    let response = get_auth(world.app(), "/api/v1/pipeline/404/answers?type=MUST", &world.investor).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_values_are_rejected() {
    let world = World::new().await;
    let key = world.criterion("KEY").await;
    world.select(key, "MUST").await;
    let acme = world.company("Acme").await["company"]["id"].as_i64().unwrap();

    assert_eq!(world.answer(acme, "KEY", "MAYBE").await, StatusCode::BAD_REQUEST);
    assert_eq!(world.answer(acme, "UNSELECTED", "Y").await, StatusCode::NOT_FOUND);
    assert_eq!(
        world.phase(acme, json!({ "key": "SIGNED" })).await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        world
            .phase(acme, json!({ "key": "DISCARDED", "status": "First Meeting" }))
            .await,
        StatusCode::BAD_REQUEST
    );

    let response = get_auth(world.app(), "/api/v1/pipeline?phase=SIGNED", &world.investor).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn pipeline_listing_pages_in_insertion_order() {
    let world = World::new().await;
    for name in ["A", "B", "C", "D"] {
        world.company(name).await;
    }

    let page = world.pipeline("?limit=2&offset=1").await;

    let names: Vec<&str> = page
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["company"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["B", "C"]);
    assert_eq!(world.pipeline("").await.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn catalog_is_public_and_keys_are_unique() {
    let world = World::new().await;
    world.criterion("KEY").await;

    let duplicate = post_json_auth(
        world.app(),
        "/api/v1/criteria",
        json!({ "text": "Again", "key": "KEY" }),
        &world.admin,
    )
    .await;
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listing = get(world.app(), "/api/v1/criteria").await;
    assert_eq!(listing.status(), StatusCode::OK);
    assert_eq!(body_json(listing).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn deleted_company_stays_in_pipelines() {
    let world = World::new().await;
    let acme = world.company("Acme").await["company"]["id"].as_i64().unwrap();

    let response = delete_auth(world.app(), &format!("/api/v1/companies/{acme}"), &world.admin).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["deleted"], true);

    let gone = get_auth(world.app(), &format!("/api/v1/companies/{acme}"), &world.admin).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);

    let entries = world.pipeline("").await;
    assert_eq!(entries[0]["company"]["id"], acme);
}

#[tokio::test]
async fn company_fields_use_camel_case_names() {
    let world = World::new().await;
    let response = post_json_auth(
        world.app(),
        "/api/v1/companies",
        json!({ "name": "Acme", "ceoName": "Grace Hopper" }),
        &world.admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await["data"].clone();
    assert_eq!(created["company"]["ceoName"], "Grace Hopper");
    assert!(created["company"].get("ceo_name").is_none());

    let entries = world.pipeline("").await;
    assert_eq!(entries[0]["company"]["ceoName"], "Grace Hopper");

    let profile = get_auth(world.app(), "/api/v1/users/me", &world.investor).await;
    let profile = body_json(profile).await["data"].clone();
    assert!(profile["criterias"].is_array());
}
