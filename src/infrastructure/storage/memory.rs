//! In-memory repository implementations.
//!
//! Backs the service-layer tests and local development runs. The two
//! store-level invariants the SQL backend enforces are reproduced here
//! with DashMap shard locks: at most one active session per plate, and
//! compare-and-increment slot claims that never exceed capacity.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::discount::{DiscountCode, DiscountRepository};
use crate::domain::parking_lot::{ParkingLot, ParkingLotRepository};
use crate::domain::parking_session::{ParkingSession, ParkingSessionRepository};
use crate::domain::payment::{Payment, PaymentRepository};
use crate::domain::reservation::{Reservation, ReservationRepository};
use crate::domain::user::{User, UserRepository};
use crate::domain::vehicle::{Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

struct MemoryStore {
    users: DashMap<String, User>,
    vehicles: DashMap<i64, Vehicle>,
    lots: DashMap<i64, ParkingLot>,
    sessions: DashMap<i64, ParkingSession>,
    /// Plate -> active session id; the uniqueness guard.
    active_plates: DashMap<String, i64>,
    reservations: DashMap<i64, Reservation>,
    discounts: DashMap<i64, DiscountCode>,
    payments: DashMap<i64, Payment>,
    vehicle_counter: AtomicI64,
    lot_counter: AtomicI64,
    session_counter: AtomicI64,
    reservation_counter: AtomicI64,
    discount_counter: AtomicI64,
    payment_counter: AtomicI64,
}

impl MemoryStore {
    fn new() -> Self {
        Self {
            users: DashMap::new(),
            vehicles: DashMap::new(),
            lots: DashMap::new(),
            sessions: DashMap::new(),
            active_plates: DashMap::new(),
            reservations: DashMap::new(),
            discounts: DashMap::new(),
            payments: DashMap::new(),
            vehicle_counter: AtomicI64::new(1),
            lot_counter: AtomicI64::new(1),
            session_counter: AtomicI64::new(1),
            reservation_counter: AtomicI64::new(1),
            discount_counter: AtomicI64::new(1),
            payment_counter: AtomicI64::new(1),
        }
    }

    fn next(counter: &AtomicI64) -> i64 {
        counter.fetch_add(1, Ordering::SeqCst)
    }
}

/// In-memory [`RepositoryProvider`] for tests and development.
pub struct MemoryRepositoryProvider {
    users: MemoryUserRepository,
    vehicles: MemoryVehicleRepository,
    lots: MemoryParkingLotRepository,
    sessions: MemorySessionRepository,
    reservations: MemoryReservationRepository,
    discounts: MemoryDiscountRepository,
    payments: MemoryPaymentRepository,
}

impl MemoryRepositoryProvider {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            users: MemoryUserRepository { store: store.clone() },
            vehicles: MemoryVehicleRepository { store: store.clone() },
            lots: MemoryParkingLotRepository { store: store.clone() },
            sessions: MemorySessionRepository { store: store.clone() },
            reservations: MemoryReservationRepository { store: store.clone() },
            discounts: MemoryDiscountRepository { store: store.clone() },
            payments: MemoryPaymentRepository { store },
        }
    }
}

impl Default for MemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for MemoryRepositoryProvider {
    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }
    fn parking_lots(&self) -> &dyn ParkingLotRepository {
        &self.lots
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

struct MemoryUserRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: User) -> DomainResult<()> {
        if self
            .store
            .users
            .iter()
            .any(|u| u.username == user.username && u.id != user.id)
        {
            return Err(DomainError::Conflict(format!(
                "Username '{}' is already taken",
                user.username
            )));
        }
        self.store.users.insert(user.id.clone(), user);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.store.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .store
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.clone()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.store.users.len() as u64)
    }

    async fn update(&self, user: User) -> DomainResult<()> {
        if !self.store.users.contains_key(&user.id) {
            return Err(DomainError::not_found("User", "id", &user.id));
        }
        self.store.users.insert(user.id.clone(), user);
        Ok(())
    }
}

struct MemoryVehicleRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl VehicleRepository for MemoryVehicleRepository {
    async fn save(&self, mut vehicle: Vehicle) -> DomainResult<Vehicle> {
        vehicle.id = MemoryStore::next(&self.store.vehicle_counter);
        self.store.vehicles.insert(vehicle.id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Vehicle>> {
        Ok(self.store.vehicles.get(&id).map(|v| v.clone()))
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Vehicle>> {
        Ok(self
            .store
            .vehicles
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.clone())
            .collect())
    }

    async fn update(&self, vehicle: Vehicle) -> DomainResult<()> {
        if !self.store.vehicles.contains_key(&vehicle.id) {
            return Err(DomainError::not_found("Vehicle", "id", vehicle.id));
        }
        self.store.vehicles.insert(vehicle.id, vehicle);
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.store.vehicles.remove(&id);
        Ok(())
    }
}

struct MemoryParkingLotRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ParkingLotRepository for MemoryParkingLotRepository {
    async fn save(&self, mut lot: ParkingLot) -> DomainResult<ParkingLot> {
        if lot.id == 0 {
            lot.id = MemoryStore::next(&self.store.lot_counter);
        }
        self.store.lots.insert(lot.id, lot.clone());
        Ok(lot)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ParkingLot>> {
        Ok(self.store.lots.get(&id).map(|l| l.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ParkingLot>> {
        let mut lots: Vec<_> = self.store.lots.iter().map(|l| l.clone()).collect();
        lots.sort_by_key(|l| l.id);
        Ok(lots)
    }

    async fn update(&self, lot: ParkingLot) -> DomainResult<()> {
        if !self.store.lots.contains_key(&lot.id) {
            return Err(DomainError::not_found("ParkingLot", "id", lot.id));
        }
        self.store.lots.insert(lot.id, lot);
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.store.lots.remove(&id);
        Ok(())
    }

    async fn try_claim_slot(&self, id: i64) -> DomainResult<bool> {
        // get_mut holds the shard write lock for the whole compare-and-inc
        match self.store.lots.get_mut(&id) {
            Some(mut lot) if lot.reserved < lot.capacity => {
                lot.reserved += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_slot(&self, id: i64) -> DomainResult<()> {
        if let Some(mut lot) = self.store.lots.get_mut(&id) {
            if lot.reserved > 0 {
                lot.reserved -= 1;
            }
        }
        Ok(())
    }
}

struct MemorySessionRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ParkingSessionRepository for MemorySessionRepository {
    async fn insert_active(&self, mut session: ParkingSession) -> DomainResult<ParkingSession> {
        // The entry guard holds the shard lock across check and insert,
        // mirroring the SQL partial unique index.
        match self.store.active_plates.entry(session.licenseplate.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "An active session for plate '{}' already exists",
                session.licenseplate
            ))),
            Entry::Vacant(slot) => {
                session.id = MemoryStore::next(&self.store.session_counter);
                slot.insert(session.id);
                self.store.sessions.insert(session.id, session.clone());
                Ok(session)
            }
        }
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<ParkingSession>> {
        Ok(self.store.sessions.get(&id).map(|s| s.clone()))
    }

    async fn find_active_by_plate(
        &self,
        licenseplate: &str,
    ) -> DomainResult<Option<ParkingSession>> {
        let Some(id) = self.store.active_plates.get(licenseplate).map(|e| *e) else {
            return Ok(None);
        };
        Ok(self.store.sessions.get(&id).map(|s| s.clone()))
    }

    async fn find_by_lot(&self, parking_lot_id: i64) -> DomainResult<Vec<ParkingSession>> {
        let mut out: Vec<_> = self
            .store
            .sessions
            .iter()
            .filter(|s| s.parking_lot_id == parking_lot_id)
            .map(|s| s.clone())
            .collect();
        out.sort_by_key(|s| s.id);
        Ok(out)
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Vec<ParkingSession>> {
        let mut out: Vec<_> = self
            .store
            .sessions
            .iter()
            .filter(|s| s.username == username)
            .map(|s| s.clone())
            .collect();
        out.sort_by_key(|s| s.id);
        Ok(out)
    }

    async fn update(&self, session: ParkingSession) -> DomainResult<()> {
        if !self.store.sessions.contains_key(&session.id) {
            return Err(DomainError::not_found("ParkingSession", "id", session.id));
        }
        if session.stopped.is_some() {
            // Free the plate only if this session still owns it
            self.store
                .active_plates
                .remove_if(&session.licenseplate, |_, active_id| *active_id == session.id);
        }
        self.store.sessions.insert(session.id, session);
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        if let Some((_, session)) = self.store.sessions.remove(&id) {
            self.store
                .active_plates
                .remove_if(&session.licenseplate, |_, active_id| *active_id == id);
        }
        Ok(())
    }
}

struct MemoryReservationRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl ReservationRepository for MemoryReservationRepository {
    async fn save(&self, mut reservation: Reservation) -> DomainResult<Reservation> {
        reservation.id = MemoryStore::next(&self.store.reservation_counter);
        self.store
            .reservations
            .insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        Ok(self.store.reservations.get(&id).map(|r| r.clone()))
    }

    async fn find_by_user(&self, user_id: &str) -> DomainResult<Vec<Reservation>> {
        let mut out: Vec<_> = self
            .store
            .reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.clone())
            .collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }

    async fn find_by_lot(&self, lot_id: i64) -> DomainResult<Vec<Reservation>> {
        let mut out: Vec<_> = self
            .store
            .reservations
            .iter()
            .filter(|r| r.lot_id == lot_id)
            .map(|r| r.clone())
            .collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }

    async fn find_all(&self) -> DomainResult<Vec<Reservation>> {
        let mut out: Vec<_> = self.store.reservations.iter().map(|r| r.clone()).collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.store.reservations.remove(&id);
        Ok(())
    }
}

struct MemoryDiscountRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl DiscountRepository for MemoryDiscountRepository {
    async fn save(&self, mut discount: DiscountCode) -> DomainResult<DiscountCode> {
        if self
            .store
            .discounts
            .iter()
            .any(|d| d.code == discount.code)
        {
            return Err(DomainError::Conflict(format!(
                "Discount code '{}' already exists",
                discount.code
            )));
        }
        discount.id = MemoryStore::next(&self.store.discount_counter);
        self.store.discounts.insert(discount.id, discount.clone());
        Ok(discount)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<DiscountCode>> {
        Ok(self.store.discounts.get(&id).map(|d| d.clone()))
    }

    async fn find_by_code(&self, code: &str) -> DomainResult<Option<DiscountCode>> {
        Ok(self
            .store
            .discounts
            .iter()
            .find(|d| d.code == code)
            .map(|d| d.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<DiscountCode>> {
        let mut out: Vec<_> = self.store.discounts.iter().map(|d| d.clone()).collect();
        out.sort_by_key(|d| d.id);
        Ok(out)
    }

    async fn update(&self, discount: DiscountCode) -> DomainResult<()> {
        if !self.store.discounts.contains_key(&discount.id) {
            return Err(DomainError::not_found("DiscountCode", "id", discount.id));
        }
        self.store.discounts.insert(discount.id, discount);
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.store.discounts.remove(&id);
        Ok(())
    }
}

struct MemoryPaymentRepository {
    store: Arc<MemoryStore>,
}

#[async_trait]
impl PaymentRepository for MemoryPaymentRepository {
    async fn save(&self, mut payment: Payment) -> DomainResult<Payment> {
        payment.id = MemoryStore::next(&self.store.payment_counter);
        self.store.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Payment>> {
        Ok(self.store.payments.get(&id).map(|p| p.clone()))
    }

    async fn find_by_initiator(&self, username: &str) -> DomainResult<Vec<Payment>> {
        let mut out: Vec<_> = self
            .store
            .payments
            .iter()
            .filter(|p| p.initiator == username)
            .map(|p| p.clone())
            .collect();
        out.sort_by_key(|p| p.id);
        Ok(out)
    }

    async fn update(&self, payment: Payment) -> DomainResult<()> {
        if !self.store.payments.contains_key(&payment.id) {
            return Err(DomainError::not_found("Payment", "id", payment.id));
        }
        self.store.payments.insert(payment.id, payment);
        Ok(())
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        self.store.payments.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn lot(capacity: i32) -> ParkingLot {
        ParkingLot {
            id: 0,
            name: "Central".into(),
            location: "Amsterdam".into(),
            address: None,
            capacity,
            reserved: 0,
            tariff: Decimal::from(2),
            day_tariff: Decimal::from(20),
            lat: None,
            lng: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_active_plate_is_rejected() {
        let repos = MemoryRepositoryProvider::new();
        let s1 = ParkingSession::start(1, "AA-11-BB", "alice", false);
        let s2 = ParkingSession::start(1, "AA-11-BB", "bob", false);

        repos.sessions().insert_active(s1).await.unwrap();
        let err = repos.sessions().insert_active(s2).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn stopping_frees_the_plate() {
        let repos = MemoryRepositoryProvider::new();
        let s = ParkingSession::start(1, "AA-11-BB", "alice", false);
        let mut s = repos.sessions().insert_active(s).await.unwrap();

        s.close(Utc::now(), Some(Decimal::from(2)));
        repos.sessions().update(s).await.unwrap();

        assert!(repos
            .sessions()
            .find_active_by_plate("AA-11-BB")
            .await
            .unwrap()
            .is_none());
        repos
            .sessions()
            .insert_active(ParkingSession::start(1, "AA-11-BB", "alice", false))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn claim_stops_at_capacity_and_release_floors_at_zero() {
        let repos = MemoryRepositoryProvider::new();
        let lot = repos.parking_lots().save(lot(2)).await.unwrap();

        assert!(repos.parking_lots().try_claim_slot(lot.id).await.unwrap());
        assert!(repos.parking_lots().try_claim_slot(lot.id).await.unwrap());
        assert!(!repos.parking_lots().try_claim_slot(lot.id).await.unwrap());

        repos.parking_lots().release_slot(lot.id).await.unwrap();
        repos.parking_lots().release_slot(lot.id).await.unwrap();
        repos.parking_lots().release_slot(lot.id).await.unwrap();
        let stored = repos
            .parking_lots()
            .find_by_id(lot.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.reserved, 0);
    }

    #[tokio::test]
    async fn claim_on_missing_lot_is_false_not_error() {
        let repos = MemoryRepositoryProvider::new();
        assert!(!repos.parking_lots().try_claim_slot(999).await.unwrap());
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let repos = MemoryRepositoryProvider::new();
        let u1 = User::new("alice", "hash");
        let u2 = User::new("alice", "hash2");

        repos.users().save(u1).await.unwrap();
        let err = repos.users().save(u2).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }
}
