//! Parking session DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::parking_session::ParkingSession;

/// Request to start a session: the plate observed at the barrier
#[derive(Debug, Deserialize, ToSchema)]
pub struct StartSessionRequest {
    pub licenseplate: String,
}

/// Request to stop a session
#[derive(Debug, Deserialize, ToSchema)]
pub struct StopSessionRequest {
    pub licenseplate: String,
}

/// Query parameters for stopping a session
#[derive(Debug, Deserialize, Default, ToSchema, utoipa::IntoParams)]
pub struct StopSessionQuery {
    /// Optional discount code applied to the computed cost
    pub discount_code: Option<String>,
}

/// Session details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionDto {
    pub id: i64,
    pub parking_lot_id: i64,
    pub licenseplate: String,
    pub started: String,
    pub stopped: Option<String>,
    pub username: String,
    #[schema(value_type = String)]
    pub duration_minutes: Decimal,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
    pub payment_status: Option<String>,
}

impl From<ParkingSession> for SessionDto {
    fn from(s: ParkingSession) -> Self {
        Self {
            id: s.id,
            parking_lot_id: s.parking_lot_id,
            licenseplate: s.licenseplate,
            started: s.started.to_rfc3339(),
            stopped: s.stopped.map(|t| t.to_rfc3339()),
            username: s.username,
            duration_minutes: s.duration_minutes,
            cost: s.cost,
            payment_status: s.payment_status.map(|p| p.as_str().to_string()),
        }
    }
}
