//! API Router with Swagger UI

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::{ApiResponse, AppState, PaginationParams};

use super::modules::{
    auth, discounts, gate, health, metrics, parking_lots, payments, reservations, sessions,
    vehicles,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_current_user,
        // Parking lots
        parking_lots::handlers::list_parking_lots,
        parking_lots::handlers::get_parking_lot,
        parking_lots::handlers::create_parking_lot,
        parking_lots::handlers::update_parking_lot,
        parking_lots::handlers::delete_parking_lot,
        // Sessions
        sessions::handlers::start_session,
        sessions::handlers::stop_session,
        sessions::handlers::list_lot_sessions,
        sessions::handlers::list_my_sessions,
        // Gate
        gate::handlers::gate_entry,
        gate::handlers::gate_exit,
        // Vehicles
        vehicles::handlers::create_vehicle,
        vehicles::handlers::list_vehicles,
        vehicles::handlers::get_vehicle,
        vehicles::handlers::update_vehicle,
        vehicles::handlers::delete_vehicle,
        // Reservations
        reservations::handlers::create_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::cancel_reservation,
        // Discounts
        discounts::handlers::list_discounts,
        discounts::handlers::create_discount,
        discounts::handlers::generate_discount,
        discounts::handlers::update_discount,
        discounts::handlers::delete_discount,
        // Payments
        payments::handlers::pay_session,
        payments::handlers::record_manual_payment,
        payments::handlers::list_payments,
        payments::handlers::get_payment,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginationParams,
            // Health
            health::handlers::HealthStatus,
            // Auth
            auth::dto::RegisterRequest,
            auth::dto::LoginRequest,
            auth::dto::LoginResponse,
            auth::dto::UserInfo,
            // Parking lots
            parking_lots::dto::ParkingLotDto,
            parking_lots::dto::CreateParkingLotRequest,
            parking_lots::dto::UpdateParkingLotRequest,
            // Sessions
            sessions::dto::StartSessionRequest,
            sessions::dto::StopSessionRequest,
            sessions::dto::SessionDto,
            // Gate
            gate::dto::GateEventRequest,
            // Vehicles
            vehicles::dto::CreateVehicleRequest,
            vehicles::dto::UpdateVehicleRequest,
            vehicles::dto::VehicleDto,
            // Reservations
            reservations::dto::CreateReservationRequest,
            reservations::dto::ReservationDto,
            // Discounts
            discounts::dto::CreateDiscountRequest,
            discounts::dto::GenerateDiscountRequest,
            discounts::dto::UpdateDiscountRequest,
            discounts::dto::DiscountDto,
            // Payments
            payments::dto::PaySessionRequest,
            payments::dto::ManualPaymentRequest,
            payments::dto::PaymentDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "User registration and JWT login"),
        (name = "Parking Lots", description = "Parking lot CRUD operations"),
        (name = "Sessions", description = "Timed parking sessions: start, stop, billing"),
        (name = "Gate", description = "License-plate triggered gate events"),
        (name = "Vehicles", description = "Vehicle registration per account"),
        (name = "Reservations", description = "Parking spot reservations against lot capacity"),
        (name = "Discounts", description = "Discount code management"),
        (name = "Payments", description = "Session settlement and payment history"),
    ),
    info(
        title = "MobyPark Parking API",
        version = "1.0.0",
        description = "REST API for parking lot, session, reservation and payment management",
        license(name = "MIT"),
        contact(name = "MobyPark", email = "support@mobypark.example")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let middleware_state = AuthState {
        jwt_config: state.jwt_config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Public routes: registration, login, gate hardware and liveness.
    let public_routes = Router::new()
        .route("/health", get(health::handlers::health_check))
        .route("/metrics", get(metrics::handlers::render_metrics))
        .route("/api/v1/auth/register", post(auth::handlers::register))
        .route("/api/v1/auth/login", post(auth::handlers::login))
        .route("/api/v1/gate/{lot_id}/entry", post(gate::handlers::gate_entry))
        .route("/api/v1/gate/{lot_id}/exit", post(gate::handlers::gate_exit));

    // Everything else requires a Bearer token.
    let protected_routes = Router::new()
        .route("/api/v1/auth/me", get(auth::handlers::get_current_user))
        // Parking lots
        .route(
            "/api/v1/parking-lots",
            get(parking_lots::handlers::list_parking_lots)
                .post(parking_lots::handlers::create_parking_lot),
        )
        .route(
            "/api/v1/parking-lots/{id}",
            get(parking_lots::handlers::get_parking_lot)
                .put(parking_lots::handlers::update_parking_lot)
                .delete(parking_lots::handlers::delete_parking_lot),
        )
        // Sessions
        .route(
            "/api/v1/parking-lots/{id}/sessions/start",
            post(sessions::handlers::start_session),
        )
        .route(
            "/api/v1/parking-lots/{id}/sessions/stop",
            post(sessions::handlers::stop_session),
        )
        .route(
            "/api/v1/parking-lots/{id}/sessions",
            get(sessions::handlers::list_lot_sessions),
        )
        .route("/api/v1/sessions", get(sessions::handlers::list_my_sessions))
        // Vehicles
        .route(
            "/api/v1/vehicles",
            get(vehicles::handlers::list_vehicles).post(vehicles::handlers::create_vehicle),
        )
        .route(
            "/api/v1/vehicles/{id}",
            get(vehicles::handlers::get_vehicle)
                .put(vehicles::handlers::update_vehicle)
                .delete(vehicles::handlers::delete_vehicle),
        )
        // Reservations
        .route(
            "/api/v1/reservations",
            get(reservations::handlers::list_reservations)
                .post(reservations::handlers::create_reservation),
        )
        .route(
            "/api/v1/reservations/{id}",
            get(reservations::handlers::get_reservation)
                .delete(reservations::handlers::cancel_reservation),
        )
        // Discounts
        .route(
            "/api/v1/discounts",
            get(discounts::handlers::list_discounts).post(discounts::handlers::create_discount),
        )
        .route(
            "/api/v1/discounts/generate",
            post(discounts::handlers::generate_discount),
        )
        .route(
            "/api/v1/discounts/{id}",
            put(discounts::handlers::update_discount).delete(discounts::handlers::delete_discount),
        )
        // Payments
        .route(
            "/api/v1/payments",
            get(payments::handlers::list_payments).post(payments::handlers::record_manual_payment),
        )
        .route(
            "/api/v1/payments/sessions/{id}",
            post(payments::handlers::pay_session),
        )
        .route("/api/v1/payments/{id}", get(payments::handlers::get_payment))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            auth_middleware,
        ));

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // ServiceBuilder applies top-down: metrics wraps tracing wraps CORS.
    Router::new()
        .merge(swagger_routes)
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(
                    metrics::middleware::http_metrics_middleware,
                ))
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
