//! Handlers for the company registry.
//!
//! Creating a company also fans it out to every investor pipeline; the
//! response carries the fan-out report next to the company.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use foundernest_core::types::DbId;
use foundernest_db::models::company::{Company, CreateCompany};
use foundernest_pipeline::{registry, CompanyCreated};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /companies`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(url)]
    pub url: Option<String>,
    #[serde(rename = "ceoName", alias = "ceo_name")]
    pub ceo_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub telephone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
}

/// GET /api/v1/companies
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Company>>>> {
    let companies = registry::list_companies(state.store(), params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: companies }))
}

/// POST /api/v1/companies
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateCompanyRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<CompanyCreated>>)> {
    input.validate()?;

    let input = CreateCompany {
        name: input.name,
        url: input.url,
        ceo_name: input.ceo_name,
        email: input.email,
        telephone: input.telephone,
    };
    let created =
        registry::create_company(state.store(), &input, state.config.fanout_concurrency).await?;

    tracing::info!(
        admin_id = admin.user_id,
        company_id = created.company.id,
        failed = created.fan_out.failed,
        "Company registered via API"
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Company>>> {
    let company = registry::get_company(state.store(), id).await?;
    Ok(Json(DataResponse { data: company }))
}

/// DELETE /api/v1/companies/{id}
///
/// Investor pipelines keep their snapshot of the company.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DeleteResponse>>> {
    let deleted = registry::delete_company(state.store(), id).await?;
    Ok(Json(DataResponse {
        data: DeleteResponse { deleted },
    }))
}
