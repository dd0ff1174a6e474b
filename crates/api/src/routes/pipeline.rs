//! Route definitions for the caller's screening pipeline.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::pipeline;
use crate::state::AppState;

/// Routes mounted at `/pipeline`.
///
/// ```text
/// GET  /                                 -> list
/// POST /criteria                         -> select_criterion
/// PUT  /{company_id}/phase               -> advance_phase
/// GET  /{company_id}/answers             -> answers_for_company
/// PUT  /{company_id}/answers/{key}       -> record_answer
/// GET  /{company_id}/stats               -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pipeline::list))
        .route("/criteria", post(pipeline::select_criterion))
        .route("/{company_id}/phase", put(pipeline::advance_phase))
        .route("/{company_id}/answers", get(pipeline::answers_for_company))
        .route("/{company_id}/answers/{key}", put(pipeline::record_answer))
        .route("/{company_id}/stats", get(pipeline::stats))
}
