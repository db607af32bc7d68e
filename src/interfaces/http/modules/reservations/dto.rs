//! Reservation DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::reservation::Reservation;

/// Request to reserve a spot
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    /// Reservation owner; ignored for non-privileged callers, who always
    /// reserve for themselves
    pub user_id: Option<String>,
    pub lot_id: i64,
    pub vehicle_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: i64,
    pub user_id: String,
    pub lot_id: i64,
    pub vehicle_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub created_at: String,
    #[schema(value_type = Option<String>)]
    pub cost: Option<Decimal>,
    pub status: String,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            lot_id: r.lot_id,
            vehicle_id: r.vehicle_id,
            start_time: r.start_time.to_rfc3339(),
            end_time: r.end_time.to_rfc3339(),
            created_at: r.created_at.to_rfc3339(),
            cost: r.cost,
            status: r.status.as_str().to_string(),
        }
    }
}
