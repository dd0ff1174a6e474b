//! Route definitions for the company registry.

use axum::routing::get;
use axum::Router;

use crate::handlers::companies;
use crate::state::AppState;

/// Routes mounted at `/companies`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(companies::list).post(companies::create))
        .route("/{id}", get(companies::get_by_id).delete(companies::delete))
}
