//! Reservation repository interface

use async_trait::async_trait;

use super::model::Reservation;
use crate::shared::DomainResult;

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Persist a new reservation and return it with the assigned id.
    async fn save(&self, reservation: Reservation) -> DomainResult<Reservation>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>>;
    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>>;
    async fn find_by_lot(&self, lot_id: i64) -> DomainResult<Vec<Reservation>>;
    async fn find_all(&self) -> DomainResult<Vec<Reservation>>;
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
