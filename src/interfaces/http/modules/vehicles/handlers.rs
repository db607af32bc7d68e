//! Vehicle HTTP handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};

use crate::domain::parking_session::normalize_plate;
use crate::domain::principal::{require_self_or_privileged, Principal};
use crate::domain::vehicle::Vehicle;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    request_body = CreateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle registered", body = ApiResponse<VehicleDto>),
        (status = 400, description = "Invalid license plate")
    )
)]
pub async fn create_vehicle(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError> {
    if normalize_plate(&request.licenseplate).is_empty() {
        return Err(DomainError::Validation("License plate is required".to_string()).into());
    }

    let mut vehicle = Vehicle::new(principal.id.clone(), &request.licenseplate);
    vehicle.make = request.make;
    vehicle.model = request.model;

    let created = state.repos.vehicles().save(vehicle).await?;
    Ok(Json(ApiResponse::success(created.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's vehicles", body = ApiResponse<Vec<VehicleDto>>)
    )
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<ApiResponse<Vec<VehicleDto>>>, ApiError> {
    let vehicles = state.repos.vehicles().find_by_user(&principal.id).await?;
    let dtos: Vec<VehicleDto> = vehicles.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle details", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_vehicle(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError> {
    let vehicle = state
        .repos
        .vehicles()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))?;
    require_self_or_privileged(&principal, &vehicle.user_id)?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    request_body = UpdateVehicleRequest,
    responses(
        (status = 200, description = "Vehicle updated", body = ApiResponse<VehicleDto>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_vehicle(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<VehicleDto>>, ApiError> {
    let mut vehicle = state
        .repos
        .vehicles()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))?;
    require_self_or_privileged(&principal, &vehicle.user_id)?;

    if let Some(plate) = request.licenseplate {
        let plate = normalize_plate(&plate);
        if plate.is_empty() {
            return Err(DomainError::Validation("License plate is required".to_string()).into());
        }
        vehicle.licenseplate = plate;
    }
    if request.make.is_some() {
        vehicle.make = request.make;
    }
    if request.model.is_some() {
        vehicle.model = request.model;
    }

    state.repos.vehicles().update(vehicle.clone()).await?;
    Ok(Json(ApiResponse::success(vehicle.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/vehicles/{id}",
    tag = "Vehicles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle removed", body = ApiResponse<EmptyData>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    let vehicle = state
        .repos
        .vehicles()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("Vehicle", "id", id))?;
    require_self_or_privileged(&principal, &vehicle.user_id)?;

    state.repos.vehicles().delete(id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
