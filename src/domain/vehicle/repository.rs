//! Vehicle repository interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::shared::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Persist a new vehicle and return it with the assigned id.
    async fn save(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>>;
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>>;
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
