//! Gate DTOs

use serde::Deserialize;
use utoipa::ToSchema;

/// Plate observation reported by the gate camera
#[derive(Debug, Deserialize, ToSchema)]
pub struct GateEventRequest {
    pub licenseplate: String,
}
