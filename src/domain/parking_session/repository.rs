//! Parking session repository interface

use async_trait::async_trait;

use super::model::ParkingSession;
use crate::shared::DomainResult;

#[async_trait]
pub trait ParkingSessionRepository: Send + Sync {
    /// Insert a new *active* session and return it with the assigned id.
    ///
    /// The store enforces active-session uniqueness per plate as the last
    /// line of defense; a unique-constraint violation surfaces as
    /// `DomainError::Conflict`.
    async fn insert_active(&self, session: ParkingSession) -> DomainResult<ParkingSession>;

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ParkingSession>>;

    /// The active session (stopped IS NULL) for a plate, if any.
    async fn find_active_by_plate(&self, licenseplate: &str)
        -> DomainResult<Option<ParkingSession>>;

    async fn find_by_lot(&self, parking_lot_id: i64) -> DomainResult<Vec<ParkingSession>>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Vec<ParkingSession>>;

    /// Persist the full session row (stop fields set together).
    async fn update(&self, session: ParkingSession) -> DomainResult<()>;

    /// Administrative purge.
    async fn delete(&self, id: i64) -> DomainResult<()>;
}
