//! Reservation HTTP handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::application::ReservationRequest;
use crate::domain::principal::Principal;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Lot is full or the time window is invalid"),
        (status = 404, description = "Parking lot not found")
    )
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .reservations
        .reserve(
            &principal,
            ReservationRequest {
                user_id: request.user_id.unwrap_or_else(|| principal.id.clone()),
                lot_id: request.lot_id,
                vehicle_id: request.vehicle_id,
                start_time: request.start_time,
                end_time: request.end_time,
            },
        )
        .await?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's reservations", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError> {
    let reservations = state
        .reservations
        .list_for_user(&principal, &principal.id)
        .await?;
    let dtos: Vec<ReservationDto> = reservations.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state.reservations.get(&principal, id).await?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation released", body = ApiResponse<EmptyData>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state.reservations.release(&principal, id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
