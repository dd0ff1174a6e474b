#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use foundernest_api::auth::jwt::{generate_access_token, JwtConfig};
use foundernest_api::config::ServerConfig;
use foundernest_api::handlers::users::create_account;
use foundernest_api::router::build_app_router;
use foundernest_api::state::AppState;
use foundernest_core::roles::ROLE_ADMIN;
use foundernest_core::types::DbId;
use foundernest_db::{MemoryStore, Store};

/// Password used for every account created by these helpers.
pub const PASSWORD: &str = "s3cret-pass";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        fanout_concurrency: 4,
        database_url: None,
        bootstrap_admin: None,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over `store`, with the production
/// middleware stack.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with(store)
}

/// Same as [`build_test_app`], over any [`Store`].
pub fn build_test_app_with(store: Arc<dyn Store>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

/// Insert an admin directly and mint a token for it.
pub async fn seed_admin(store: &MemoryStore, email: &str) -> (DbId, String) {
    let user = create_account(store, "Root", email, PASSWORD, ROLE_ADMIN)
        .await
        .expect("admin creation should succeed");
    let token = generate_access_token(user.id, &user.email, &user.role, &test_config().jwt)
        .expect("token generation should succeed");
    (user.id, token)
}

/// Register an investor over HTTP, then log in over HTTP.
pub async fn register_investor(store: &Arc<MemoryStore>, email: &str) -> (DbId, String) {
    let body = json!({ "name": "Investor", "email": email, "password": PASSWORD });
    let response = post_json(build_test_app(store.clone()), "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let token = login(store, email).await;
    (id, token)
}

pub async fn login(store: &Arc<MemoryStore>, email: &str) -> String {
    let body = json!({ "email": email, "password": PASSWORD });
    let response = post_json(build_test_app(store.clone()), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}
