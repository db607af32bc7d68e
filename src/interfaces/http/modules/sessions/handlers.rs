//! Parking session HTTP handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};

use crate::domain::principal::Principal;
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    ApiError, ApiResponse, PaginatedResponse, PaginationParams,
};
use crate::interfaces::http::AppState;

use super::dto::*;

#[utoipa::path(
    post,
    path = "/api/v1/parking-lots/{id}/sessions/start",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Parking lot ID")),
    request_body = StartSessionRequest,
    responses(
        (status = 200, description = "Session started", body = ApiResponse<SessionDto>),
        (status = 404, description = "Parking lot not found"),
        (status = 409, description = "Plate already has an active session")
    )
)]
pub async fn start_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(lot_id): Path<i64>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = state
        .sessions
        .start(lot_id, &request.licenseplate, &principal)
        .await?;
    Ok(Json(ApiResponse::success(session.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/parking-lots/{id}/sessions/stop",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(
        ("id" = i64, Path, description = "Parking lot ID"),
        StopSessionQuery
    ),
    request_body = StopSessionRequest,
    responses(
        (status = 200, description = "Session stopped with computed cost", body = ApiResponse<SessionDto>),
        (status = 403, description = "Discount code not valid for this session"),
        (status = 404, description = "No active session for this plate")
    )
)]
pub async fn stop_session(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(lot_id): Path<i64>,
    Query(query): Query<StopSessionQuery>,
    Json(request): Json<StopSessionRequest>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = state
        .sessions
        .stop(
            lot_id,
            &request.licenseplate,
            query.discount_code.as_deref(),
            &principal,
        )
        .await?;
    Ok(Json(ApiResponse::success(session.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/parking-lots/{id}/sessions",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Parking lot ID")),
    responses(
        (status = 200, description = "Sessions in the lot", body = ApiResponse<Vec<SessionDto>>),
        (status = 403, description = "Staff only")
    )
)]
pub async fn list_lot_sessions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(lot_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<SessionDto>>>, ApiError> {
    if !principal.is_privileged() {
        return Err(DomainError::Forbidden(
            "Only staff may list sessions for a parking lot".to_string(),
        )
        .into());
    }
    let sessions = state.sessions.list_for_lot(lot_id).await?;
    let dtos: Vec<SessionDto> = sessions.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions",
    tag = "Sessions",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "One page of the caller's own sessions", body = ApiResponse<PaginatedResponse<SessionDto>>)
    )
)]
pub async fn list_my_sessions(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<SessionDto>>>, ApiError> {
    let sessions = state.sessions.list_for_user(&principal.username).await?;
    let total = sessions.len() as u64;
    let items: Vec<SessionDto> = sessions
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use rust_decimal::Decimal;

    use crate::application::{DiscountService, PaymentService, ReservationService, SessionService};
    use crate::auth::JwtConfig;
    use crate::domain::parking_lot::ParkingLot;
    use crate::domain::principal::Role;
    use crate::domain::RepositoryProvider;
    use crate::infrastructure::storage::memory::MemoryRepositoryProvider;

    fn driver() -> Principal {
        Principal {
            id: "7".to_string(),
            username: "driver".to_string(),
            role: Role::User,
            free_parking: false,
        }
    }

    async fn state_with_lot() -> AppState {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
        repos
            .parking_lots()
            .save(ParkingLot {
                id: 0,
                name: "Central".into(),
                location: "Utrecht".into(),
                address: None,
                capacity: 10,
                reserved: 0,
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

    #[tokio::test]
    async fn own_sessions_are_paged() {
        let state = state_with_lot().await;
        let me = driver();
        for plate in ["AA-11-BB", "CC-22-DD", "EE-33-FF"] {
            state.sessions.start(1, plate, &me).await.unwrap();
        }

        let page = list_my_sessions(
            State(state),
            Extension(me),
            Query(PaginationParams { page: 2, limit: 2 }),
        )
        .await
        .unwrap();

        let body = page.0.data.unwrap();
        assert_eq!(body.total, 3);
        assert_eq!(body.total_pages, 2);
        assert_eq!(body.items.len(), 1);
    }
}
