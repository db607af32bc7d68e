//! Discount HTTP handlers (admin only)

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::application::DiscountSpec;
use crate::domain::principal::Principal;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/discounts",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All discount codes", body = ApiResponse<Vec<DiscountDto>>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn list_discounts(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<Vec<DiscountDto>>>, ApiError> {
    let discounts = state.discounts.list(&principal).await?;
    let dtos: Vec<DiscountDto> = discounts.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    request_body = CreateDiscountRequest,
    responses(
        (status = 200, description = "Discount created", body = ApiResponse<DiscountDto>),
        (status = 400, description = "Invalid discount code"),
        (status = 403, description = "Admin privileges required"),
        (status = 409, description = "Code already exists")
    )
)]
pub async fn create_discount(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateDiscountRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    let created = state
        .discounts
        .create(&principal, &request.code, request.spec())
        .await?;
    Ok(Json(ApiResponse::success(created.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/discounts/generate",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    request_body = GenerateDiscountRequest,
    responses(
        (status = 200, description = "Discount generated with a random code", body = ApiResponse<DiscountDto>),
        (status = 403, description = "Admin privileges required"),
        (status = 409, description = "Could not find an unused code")
    )
)]
pub async fn generate_discount(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<GenerateDiscountRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    let created = state.discounts.generate(&principal, request.spec()).await?;
    Ok(Json(ApiResponse::success(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Discount ID")),
    request_body = UpdateDiscountRequest,
    responses(
        (status = 200, description = "Discount updated", body = ApiResponse<DiscountDto>),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_discount(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDiscountRequest>,
) -> Result<Json<ApiResponse<DiscountDto>>, ApiError> {
    let spec = DiscountSpec {
        amount: request.amount,
        percentage: request.percentage,
        lot_id: request.lot_id,
        user_id: request.user_id.clone(),
        expiration_date: request.expiration_date,
    };
    let updated = state
        .discounts
        .edit(&principal, id, spec, request.code)
        .await?;
    Ok(Json(ApiResponse::success(updated.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/discounts/{id}",
    tag = "Discounts",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Discount ID")),
    responses(
        (status = 200, description = "Discount deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn delete_discount(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state.discounts.delete(&principal, id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
