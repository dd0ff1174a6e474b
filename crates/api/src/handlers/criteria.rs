//! Handlers for the global criteria catalog.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use foundernest_db::models::criterion::{CreateCriterion, Criterion};
use foundernest_pipeline::catalog;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /criteria`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCriterionRequest {
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(length(min = 1, max = 100))]
    pub key: String,
    #[serde(default)]
    pub icon: String,
}

/// GET /api/v1/criteria
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Criterion>>>> {
    let criteria = catalog::list_criteria(state.store(), params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: criteria }))
}

/// POST /api/v1/criteria
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateCriterionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Criterion>>)> {
    input.validate()?;

    let criterion = catalog::create_criterion(
        state.store(),
        &CreateCriterion {
            text: input.text,
            key: input.key,
            icon: input.icon,
        },
    )
    .await?;

    tracing::debug!(user_id = user.user_id, criterion_id = criterion.id, "Criterion created via API");
    Ok((StatusCode::CREATED, Json(DataResponse { data: criterion })))
}
