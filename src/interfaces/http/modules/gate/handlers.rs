//! Unattended gate HTTP handlers
//!
//! These endpoints are driven by barrier hardware with no user token;
//! sessions run under the fixed system principal.

use axum::extract::{Path, State};
use axum::Json;

use crate::interfaces::http::common::{ApiError, ApiResponse};
use crate::interfaces::http::modules::sessions::dto::SessionDto;
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/gate/{lot_id}/entry",
    tag = "Gate",
    params(("lot_id" = i64, Path, description = "Parking lot ID")),
    request_body = GateEventRequest,
    responses(
        (status = 200, description = "Session started for the observed plate", body = ApiResponse<SessionDto>),
        (status = 404, description = "Parking lot not found"),
        (status = 409, description = "Plate already has an active session")
    )
)]
pub async fn gate_entry(
    State(state): State<AppState>,
    Path(lot_id): Path<i64>,
    Json(request): Json<GateEventRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = state
        .sessions
        .auto_start(lot_id, &request.licenseplate)
        .await?;
    Ok(Json(ApiResponse::success(session.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/gate/{lot_id}/exit",
    tag = "Gate",
    params(("lot_id" = i64, Path, description = "Parking lot ID")),
    request_body = GateEventRequest,
    responses(
        (status = 200, description = "Session stopped for the observed plate", body = ApiResponse<SessionDto>),
        (status = 404, description = "No active session for this plate")
    )
)]
pub async fn gate_exit(
    State(state): State<AppState>,
    Path(lot_id): Path<i64>,
    Json(request): Json<GateEventRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = state
        .sessions
        .auto_stop(lot_id, &request.licenseplate)
        .await?;
    Ok(Json(ApiResponse::success(session.into())))
}
