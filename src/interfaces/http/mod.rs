//! HTTP interface: routing, shared state and per-entity modules.

pub mod common;
pub mod modules;
pub mod router;

pub use common::{ApiError, ApiResponse, EmptyData, PaginatedResponse, PaginationParams};
pub use router::create_api_router;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::{DiscountService, PaymentService, ReservationService, SessionService};
use crate::auth::JwtConfig;
use crate::domain::RepositoryProvider;

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub sessions: Arc<SessionService>,
    pub discounts: Arc<DiscountService>,
    pub reservations: Arc<ReservationService>,
    pub payments: Arc<PaymentService>,
    pub jwt_config: JwtConfig,
    pub prometheus: PrometheusHandle,
}
