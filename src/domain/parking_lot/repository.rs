//! Parking lot repository interface

use async_trait::async_trait;

use super::model::ParkingLot;
use crate::shared::DomainResult;

#[async_trait]
pub trait ParkingLotRepository: Send + Sync {
    /// Persist a new lot and return it with the assigned id.
    async fn save(&self, lot: ParkingLot) -> DomainResult<ParkingLot>;
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ParkingLot>>;
    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>>;
    async fn update(&self, lot: ParkingLot) -> DomainResult<()>;
    async fn delete(&self, id: i64) -> DomainResult<()>;

    /// Atomically claim one reservation slot:
    /// `reserved = reserved + 1 WHERE id = ? AND reserved < capacity`.
    ///
    /// Returns `false` when no row was updated (lot missing or full);
    /// the caller distinguishes the two.
    async fn try_claim_slot(&self, id: i64) -> DomainResult<bool>;

    /// Atomically release one reservation slot, clamped at zero:
    /// `reserved = reserved - 1 WHERE id = ? AND reserved > 0`.
    ///
    /// A missing lot or an already-zero counter is not an error.
    async fn release_slot(&self, id: i64) -> DomainResult<()>;
}
