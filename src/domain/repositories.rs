//! Repository provider for the domain layer

use super::discount::DiscountRepository;
use super::parking_lot::ParkingLotRepository;
use super::parking_session::ParkingSessionRepository;
use super::payment::PaymentRepository;
use super::reservation::ReservationRepository;
use super::user::UserRepository;
use super::vehicle::VehicleRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let lot = repos.parking_lots().find_by_id(1).await?;
///     let session = repos.sessions().find_active_by_plate("AB-123-C").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn users(&self) -> &dyn UserRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn parking_lots(&self) -> &dyn ParkingLotRepository;
    fn sessions(&self) -> &dyn ParkingSessionRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn discounts(&self) -> &dyn DiscountRepository;
    fn payments(&self) -> &dyn PaymentRepository;
}
