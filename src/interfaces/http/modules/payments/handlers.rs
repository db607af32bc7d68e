//! Payment HTTP handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use crate::domain::principal::Principal;
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams,
};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/payments/sessions/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Parking session ID")),
    request_body = PaySessionRequest,
    responses(
        (status = 200, description = "Session paid", body = ApiResponse<PaymentDto>),
        (status = 400, description = "Session has no computed cost"),
        (status = 404, description = "Session not found"),
        (status = 409, description = "Session is active or already paid")
    )
)]
pub async fn pay_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(request): Json<PaySessionRequest>,
) -> Result<Json<ApiResponse<PaymentDto>>, ApiError> {
    let payment = state
        .payments
        .pay_session(&principal, id, request.instrument())
        .await?;
    Ok(Json(ApiResponse::success(payment.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    request_body = ManualPaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<PaymentDto>),
        (status = 400, description = "Negative amount"),
        (status = 403, description = "Staff privileges required")
    )
)]
pub async fn record_manual_payment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<ManualPaymentRequest>,
) -> Result<Json<ApiResponse<PaymentDto>>, ApiError> {
    let payment = state
        .payments
        .record_manual(
            &principal,
            &request.initiator,
            request.amount,
            request.instrument(),
        )
        .await?;
    Ok(Json(ApiResponse::success(payment.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(
        ("user" = Option<String>, Query, description = "Another user's payments (staff only)"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "One page of payments", body = ApiResponse<PaginatedResponse<PaymentDto>>),
        (status = 403, description = "Not allowed to view these payments")
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<PaymentListQuery>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<PaymentDto>>>, ApiError> {
    let payments = match query.user {
        Some(username) => state.payments.list_for_user(&principal, &username).await?,
        None => state.payments.list_own(&principal).await?,
    };
    let total = payments.len() as u64;
    let items: Vec<PaymentDto> = payments
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit as usize)
        .map(Into::into)
        .collect();
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        pagination.page,
        pagination.limit,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<PaymentDto>>, ApiError> {
    let payment = state.payments.get(&principal, id).await?;
    Ok(Json(ApiResponse::success(payment.into())))
}
