//! Parking lot DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::parking_lot::ParkingLot;

/// Parking lot details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ParkingLotDto {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub address: Option<String>,
    pub capacity: i32,
    pub reserved: i32,
    /// Hourly tariff
    #[schema(value_type = String)]
    pub tariff: Decimal,
    /// Flat rate per completed 24h block
    #[schema(value_type = String)]
    pub day_tariff: Decimal,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: String,
}

impl From<ParkingLot> for ParkingLotDto {
    fn from(l: ParkingLot) -> Self {
        Self {
            id: l.id,
            name: l.name,
            location: l.location,
            address: l.address,
            capacity: l.capacity,
            reserved: l.reserved,
            tariff: l.tariff,
            day_tariff: l.day_tariff,
            lat: l.lat,
            lng: l.lng,
            created_at: l.created_at.to_rfc3339(),
        }
    }
}

/// Request to create a parking lot
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateParkingLotRequest {
    #[validate(length(min = 1, max = 128))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub location: String,
    pub address: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: i32,
    /// Hourly tariff
    #[schema(value_type = String)]
    pub tariff: Decimal,
    /// Flat rate per completed 24h block
    #[schema(value_type = String)]
    pub day_tariff: Decimal,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Request to update a parking lot; unset fields keep their value
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateParkingLotRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub capacity: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub tariff: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub day_tariff: Option<Decimal>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
