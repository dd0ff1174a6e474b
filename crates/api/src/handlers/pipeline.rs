//! Handlers for the caller's own screening pipeline.
//!
//! Every route here requires the `INVESTOR` role and acts on the caller's
//! document only; the investor id always comes from the token.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use foundernest_core::answer::AnswerStats;
use foundernest_core::error::CoreError;
use foundernest_core::phase::status_label;
use foundernest_core::types::DbId;
use foundernest_db::models::pipeline::{Answer, PipelineEntry, SelectedCriterion};
use foundernest_pipeline::query::PipelineQuery;
use foundernest_pipeline::{answers, phase, query, selection};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireInvestor;
use crate::query::{CriterionTypeParams, PipelineListParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /pipeline/criteria`.
#[derive(Debug, Deserialize, Validate)]
pub struct SelectCriterionRequest {
    pub criterion_id: DbId,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    pub criterion_type: String,
}

/// Request body for `PUT /pipeline/{company_id}/phase`.
#[derive(Debug, Deserialize)]
pub struct AdvancePhaseRequest {
    pub key: String,
    /// Optional; must match the canonical label of `key` when given.
    pub status: Option<String>,
}

/// Request body for `PUT /pipeline/{company_id}/answers/{key}`.
#[derive(Debug, Deserialize)]
pub struct RecordAnswerRequest {
    pub answer: String,
}

/// Phase of one entry after a transition.
#[derive(Debug, Serialize)]
pub struct PhaseView {
    pub company_id: DbId,
    pub key: String,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/pipeline/criteria
///
/// Adopt a catalog criterion; every pipeline entry gains an unanswered slot.
pub async fn select_criterion(
    State(state): State<AppState>,
    RequireInvestor(investor): RequireInvestor,
    Json(input): Json<SelectCriterionRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<SelectedCriterion>>)> {
    input.validate()?;

    let selected = selection::select_criterion(
        state.store(),
        investor.user_id,
        input.criterion_id,
        &input.criterion_type,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: selected })))
}

/// GET /api/v1/pipeline?limit=&offset=&phase=
pub async fn list(
    State(state): State<AppState>,
    RequireInvestor(investor): RequireInvestor,
    Query(params): Query<PipelineListParams>,
) -> AppResult<Json<DataResponse<Vec<PipelineEntry>>>> {
    let filter = PipelineQuery {
        limit: params.limit,
        offset: params.offset,
        phase: params.phase,
    };
    let entries = query::list_pipeline(state.store(), investor.user_id, &filter).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// PUT /api/v1/pipeline/{company_id}/phase
///
/// 404 when the company is not in the caller's pipeline.
pub async fn advance_phase(
    State(state): State<AppState>,
    RequireInvestor(investor): RequireInvestor,
    Path(company_id): Path<DbId>,
    Json(input): Json<AdvancePhaseRequest>,
) -> AppResult<Json<DataResponse<PhaseView>>> {
    let moved = phase::advance_phase(
        state.store(),
        investor.user_id,
        company_id,
        &input.key,
        input.status.as_deref(),
    )
    .await?;

    if !moved {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "PipelineEntry",
            id: company_id,
        }));
    }

    let status = status_label(&input.key).unwrap_or_default().to_string();
    Ok(Json(DataResponse {
        data: PhaseView {
            company_id,
            key: input.key,
            status,
        },
    }))
}

/// PUT /api/v1/pipeline/{company_id}/answers/{key}
///
/// 404 when the company is untracked or the criterion is not selected.
pub async fn record_answer(
    State(state): State<AppState>,
    RequireInvestor(investor): RequireInvestor,
    Path((company_id, key)): Path<(DbId, String)>,
    Json(input): Json<RecordAnswerRequest>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let answer = answers::record_answer(
        state.store(),
        investor.user_id,
        company_id,
        &key,
        &input.answer,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Answer slot for company",
        id: company_id,
    }))?;

    Ok(Json(DataResponse { data: answer }))
}

/// GET /api/v1/pipeline/{company_id}/answers?type=
pub async fn answers_for_company(
    State(state): State<AppState>,
    RequireInvestor(investor): RequireInvestor,
    Path(company_id): Path<DbId>,
    Query(params): Query<CriterionTypeParams>,
) -> AppResult<Json<DataResponse<Vec<Answer>>>> {
    let answers = query::answers_for_company(
        state.store(),
        investor.user_id,
        company_id,
        &params.criterion_type,
    )
    .await?;
    Ok(Json(DataResponse { data: answers }))
}

/// GET /api/v1/pipeline/{company_id}/stats?type=
pub async fn stats(
    State(state): State<AppState>,
    RequireInvestor(investor): RequireInvestor,
    Path(company_id): Path<DbId>,
    Query(params): Query<CriterionTypeParams>,
) -> AppResult<Json<DataResponse<AnswerStats>>> {
    let stats = query::answer_stats(
        state.store(),
        investor.user_id,
        company_id,
        &params.criterion_type,
    )
    .await?;
    Ok(Json(DataResponse { data: stats }))
}
