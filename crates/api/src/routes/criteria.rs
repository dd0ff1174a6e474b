use axum::routing::get;
use axum::Router;

use crate::handlers::criteria;
use crate::state::AppState;

/// Routes mounted at `/criteria`.
///
/// ```text
/// GET  /    -> list
/// POST /    -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(criteria::list).post(criteria::create))
}
