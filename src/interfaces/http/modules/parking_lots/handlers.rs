//! Parking lot HTTP handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use chrono::Utc;
use rust_decimal::Decimal;
use validator::Validate;

use crate::domain::parking_lot::ParkingLot;
use crate::domain::principal::{require_admin, Principal};
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, EmptyData};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    get,
    path = "/api/v1/parking-lots",
    tag = "Parking Lots",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All parking lots", body = ApiResponse<Vec<ParkingLotDto>>)
    )
)]
pub async fn list_parking_lots(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<ParkingLotDto>>>, ApiError> {
    let lots = state.repos.parking_lots().find_all().await?;
    let dtos: Vec<ParkingLotDto> = lots.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/parking-lots/{id}",
    tag = "Parking Lots",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Parking lot ID")),
    responses(
        (status = 200, description = "Parking lot details", body = ApiResponse<ParkingLotDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_parking_lot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ParkingLotDto>>, ApiError> {
    let lot = state
        .repos
        .parking_lots()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("ParkingLot", "id", id))?;
    Ok(Json(ApiResponse::success(lot.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/parking-lots",
    tag = "Parking Lots",
    security(("bearer_auth" = [])),
    request_body = CreateParkingLotRequest,
    responses(
        (status = 200, description = "Parking lot created", body = ApiResponse<ParkingLotDto>),
        (status = 400, description = "Invalid lot data"),
        (status = 403, description = "Admin privileges required")
    )
)]
pub async fn create_parking_lot(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<CreateParkingLotRequest>,
) -> Result<Json<ApiResponse<ParkingLotDto>>, ApiError> {
    require_admin(&principal)?;
    request
        .validate()
        .map_err(|e| DomainError::Validation(e.to_string()))?;
    if request.tariff < Decimal::ZERO || request.day_tariff < Decimal::ZERO {
        return Err(DomainError::Validation("Tariffs cannot be negative".to_string()).into());
    }

    let lot = ParkingLot {
        id: 0,
        name: request.name,
        location: request.location,
        address: request.address,
        capacity: request.capacity,
        reserved: 0,
        tariff: request.tariff,
        day_tariff: request.day_tariff,
        lat: request.lat,
        lng: request.lng,
        created_at: Utc::now(),
    };
    let created = state.repos.parking_lots().save(lot).await?;
    Ok(Json(ApiResponse::success(created.into())))
}

#[utoipa::path(
    put,
    path = "/api/v1/parking-lots/{id}",
    tag = "Parking Lots",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Parking lot ID")),
    request_body = UpdateParkingLotRequest,
    responses(
        (status = 200, description = "Parking lot updated", body = ApiResponse<ParkingLotDto>),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_parking_lot(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateParkingLotRequest>,
) -> Result<Json<ApiResponse<ParkingLotDto>>, ApiError> {
    require_admin(&principal)?;

    let mut lot = state
        .repos
        .parking_lots()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("ParkingLot", "id", id))?;

    if let Some(name) = request.name {
        lot.name = name;
    }
    if let Some(location) = request.location {
        lot.location = location;
    }
    if request.address.is_some() {
        lot.address = request.address;
    }
    if let Some(capacity) = request.capacity {
        if capacity < 0 {
            return Err(DomainError::Validation("Capacity cannot be negative".to_string()).into());
        }
        // Shrinking below the committed reservations would leave
        // reserved > capacity, which the reservation ledger relies on
        // never happening.
        if capacity < lot.reserved {
            return Err(DomainError::Validation(format!(
                "Capacity cannot drop below the {} reserved spots",
                lot.reserved
            ))
            .into());
        }
        lot.capacity = capacity;
    }
    if let Some(tariff) = request.tariff {
        lot.tariff = tariff;
    }
    if let Some(day_tariff) = request.day_tariff {
        lot.day_tariff = day_tariff;
    }
    if request.lat.is_some() {
        lot.lat = request.lat;
    }
    if request.lng.is_some() {
        lot.lng = request.lng;
    }

    state.repos.parking_lots().update(lot.clone()).await?;
    Ok(Json(ApiResponse::success(lot.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/parking-lots/{id}",
    tag = "Parking Lots",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Parking lot ID")),
    responses(
        (status = 200, description = "Parking lot deleted", body = ApiResponse<EmptyData>),
        (status = 403, description = "Admin privileges required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_parking_lot(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    require_admin(&principal)?;

    if state.repos.parking_lots().find_by_id(id).await?.is_none() {
        return Err(DomainError::not_found("ParkingLot", "id", id).into());
    }
    state.repos.parking_lots().delete(id).await?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use metrics_exporter_prometheus::PrometheusBuilder;

    use crate::application::{DiscountService, PaymentService, ReservationService, SessionService};
    use crate::auth::JwtConfig;
    use crate::domain::principal::Role;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::storage::memory::MemoryRepositoryProvider;

    fn admin() -> Principal {
        Principal {
            id: "1".to_string(),
            username: "admin".to_string(),
            role: Role::Admin,
            free_parking: false,
        }
    }

    async fn state_with_lot(capacity: i32, reserved: i32) -> AppState {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
        repos
            .parking_lots()
            .save(ParkingLot {
                id: 0,
                name: "Central".into(),
                location: "Utrecht".into(),
                address: None,
                capacity,
                reserved,
                tariff: Decimal::from(2),
                day_tariff: Decimal::from(20),
                lat: None,
                lng: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let discounts = Arc::new(DiscountService::new(repos.clone()));
        AppState {
            sessions: Arc::new(SessionService::new(repos.clone(), discounts.clone())),
            discounts,
            reservations: Arc::new(ReservationService::new(repos.clone())),
            payments: Arc::new(PaymentService::new(repos.clone())),
            repos,
            jwt_config: JwtConfig::default(),
            prometheus: PrometheusBuilder::new().build_recorder().handle(),
        }
    }

    fn capacity_update(capacity: i32) -> UpdateParkingLotRequest {
        UpdateParkingLotRequest {
            name: None,
            location: None,
            address: None,
            capacity: Some(capacity),
            tariff: None,
            day_tariff: None,
            lat: None,
            lng: None,
        }
    }

    #[tokio::test]
    async fn capacity_cannot_drop_below_reserved() {
        let state = state_with_lot(10, 8).await;

        let err = update_parking_lot(
            State(state.clone()),
            Extension(admin()),
            Path(1),
            Json(capacity_update(5)),
        )
        .await
        .unwrap_err();
        assert!(matches!(err.0, DomainError::Validation(_)));

        // The rejected edit must not have been persisted
        let lot = state
            .repos
            .parking_lots()
            .find_by_id(1)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(lot.capacity, 10);
        assert_eq!(lot.reserved, 8);

        // Shrinking down to exactly the reserved count is allowed
        let ok = update_parking_lot(
            State(state),
            Extension(admin()),
            Path(1),
            Json(capacity_update(8)),
        )
        .await
        .unwrap();
        assert_eq!(ok.0.data.unwrap().capacity, 8);
    }
}
