use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorResponse};

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct HealthzResponse {
    pub(crate) status: &'static str,
    /// Number of stored posts; doubles as a storage round-trip check.
    pub(crate) posts: i64,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Service and storage are reachable", body = HealthzResponse),
        (status = 500, description = "Storage unavailable", body = ErrorResponse)
    )
)]
pub(crate) async fn healthz(State(state): State<AppState>) -> AppResult<Json<HealthzResponse>> {
    let posts = state.post_service.count().await?;
    Ok(Json(HealthzResponse {
        status: "ok",
        posts,
    }))
}
