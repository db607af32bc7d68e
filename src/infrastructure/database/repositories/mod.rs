//! SeaORM repository implementations

mod discount_repository;
mod parking_lot_repository;
mod parking_session_repository;
mod payment_repository;
mod repository_provider;
mod reservation_repository;
mod user_repository;
mod vehicle_repository;

pub use discount_repository::SeaOrmDiscountRepository;
pub use parking_lot_repository::SeaOrmParkingLotRepository;
pub use parking_session_repository::SeaOrmParkingSessionRepository;
pub use payment_repository::SeaOrmPaymentRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use user_repository::SeaOrmUserRepository;
pub use vehicle_repository::SeaOrmVehicleRepository;

use crate::shared::DomainError;

/// Database errors surface as validation errors with a recognizable
/// prefix; [`DomainError::is_transient`] keys off it.
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}
