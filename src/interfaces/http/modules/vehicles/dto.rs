//! Vehicle DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::vehicle::Vehicle;

/// Request to register a vehicle
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVehicleRequest {
    pub licenseplate: String,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// Request to update a vehicle; unset fields keep their value
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVehicleRequest {
    pub licenseplate: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
}

/// Vehicle details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct VehicleDto {
    pub id: i64,
    pub user_id: String,
    pub licenseplate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub created_at: String,
}

impl From<Vehicle> for VehicleDto {
    fn from(v: Vehicle) -> Self {
        Self {
            id: v.id,
            user_id: v.user_id,
            licenseplate: v.licenseplate,
            make: v.make,
            model: v.model,
            created_at: v.created_at.to_rfc3339(),
        }
    }
}
