//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped in the pipeline layer via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `?limit=&offset=&phase=` for the investor pipeline listing.
///
/// Unlike [`PaginationParams`], an omitted `limit` means "to the end".
#[derive(Debug, Deserialize)]
pub struct PipelineListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub phase: Option<String>,
}

/// `?type=` selecting which criterion type answers and stats cover.
#[derive(Debug, Deserialize)]
pub struct CriterionTypeParams {
    #[serde(rename = "type")]
    pub criterion_type: String,
}
