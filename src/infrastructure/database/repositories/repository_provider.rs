//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::discount::DiscountRepository;
use crate::domain::parking_lot::ParkingLotRepository;
use crate::domain::parking_session::ParkingSessionRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::user::UserRepository;
use crate::domain::vehicle::VehicleRepository;

use super::discount_repository::SeaOrmDiscountRepository;
use super::parking_lot_repository::SeaOrmParkingLotRepository;
use super::parking_session_repository::SeaOrmParkingSessionRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::user_repository::SeaOrmUserRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let lot = repos.parking_lots().find_by_id(1).await?;
/// let session = repos.sessions().find_active_by_plate("AB-123-C").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    users: SeaOrmUserRepository,
    vehicles: SeaOrmVehicleRepository,
    parking_lots: SeaOrmParkingLotRepository,
    sessions: SeaOrmParkingSessionRepository,
    reservations: SeaOrmReservationRepository,
    discounts: SeaOrmDiscountRepository,
    payments: SeaOrmPaymentRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: SeaOrmUserRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            parking_lots: SeaOrmParkingLotRepository::new(db.clone()),
            sessions: SeaOrmParkingSessionRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            discounts: SeaOrmDiscountRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn parking_lots(&self) -> &dyn ParkingLotRepository {
        &self.parking_lots
    }

    fn sessions(&self) -> &dyn ParkingSessionRepository {
        &self.sessions
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn discounts(&self) -> &dyn DiscountRepository {
        &self.discounts
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }
}
