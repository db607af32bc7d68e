//! Capacity-reservation ledger: the only writer of a lot's `reserved`
//! counter.
//!
//! Admission is an atomic conditional increment in the store, never a
//! separate read/compare/write, so two concurrent reservations against a
//! nearly-full lot cannot both be admitted.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::domain::principal::{require_self_or_privileged, Principal};
use crate::domain::reservation::Reservation;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

/// Request payload for a new reservation.
#[derive(Debug, Clone)]
pub struct ReservationRequest {
    /// Requested owner; silently replaced with the caller's own id for
    /// non-privileged callers.
    pub user_id: String,
    pub lot_id: i64,
    pub vehicle_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

pub struct ReservationService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReservationService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Admit a reservation against the lot's capacity.
    ///
    /// Fails with `NotFound` for a missing lot and `CapacityExceeded`
    /// when `reserved` has reached `capacity`; there is no partial
    /// admission and no waitlist.
    pub async fn reserve(
        &self,
        principal: &Principal,
        request: ReservationRequest,
    ) -> DomainResult<Reservation> {
        let owner_id = if principal.is_privileged() {
            request.user_id.clone()
        } else {
            principal.id.clone()
        };

        if request.end_time <= request.start_time {
            return Err(DomainError::Validation(
                "Reservation end_time must be after start_time".to_string(),
            ));
        }

        let claimed = self.repos.parking_lots().try_claim_slot(request.lot_id).await?;
        if !claimed {
            // No row updated: either the lot is missing or it is full.
            return match self.repos.parking_lots().find_by_id(request.lot_id).await? {
                None => Err(DomainError::not_found("ParkingLot", "id", request.lot_id)),
                Some(_) => Err(DomainError::CapacityExceeded(
                    "No available spots in the selected parking lot".to_string(),
                )),
            };
        }

        let reservation = Reservation::new(
            owner_id,
            request.lot_id,
            request.vehicle_id,
            request.start_time,
            request.end_time,
        );

        match self.repos.reservations().save(reservation).await {
            Ok(created) => {
                info!(
                    reservation_id = created.id,
                    lot_id = created.lot_id,
                    user_id = %created.user_id,
                    "Reservation created"
                );
                Ok(created)
            }
            Err(e) => {
                // Give the claimed slot back so the counter and the
                // reservation set stay in agreement.
                if let Err(release_err) =
                    self.repos.parking_lots().release_slot(request.lot_id).await
                {
                    warn!(
                        lot_id = request.lot_id,
                        error = %release_err,
                        "Failed to roll back claimed slot after reservation save failure"
                    );
                }
                Err(e)
            }
        }
    }

    /// Release a reservation: decrement the lot counter (floor zero) and
    /// delete the row. A missing lot row is tolerated.
    pub async fn release(&self, principal: &Principal, reservation_id: i64) -> DomainResult<()> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", reservation_id))?;

        require_self_or_privileged(principal, &reservation.user_id)?;

        self.repos
            .parking_lots()
            .release_slot(reservation.lot_id)
            .await?;
        self.repos.reservations().delete(reservation_id).await?;

        info!(
            reservation_id,
            lot_id = reservation.lot_id,
            "Reservation released"
        );
        Ok(())
    }

    pub async fn get(&self, principal: &Principal, reservation_id: i64) -> DomainResult<Reservation> {
        let reservation = self
            .repos
            .reservations()
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", "id", reservation_id))?;

        require_self_or_privileged(principal, &reservation.user_id)?;
        Ok(reservation)
    }

    pub async fn list_for_user(
        &self,
        principal: &Principal,
        user_id: &str,
    ) -> DomainResult<Vec<Reservation>> {
        require_self_or_privileged(principal, user_id)?;
        self.repos.reservations().find_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parking_lot::ParkingLot;
    use crate::domain::principal::Role;
    use crate::infrastructure::storage::memory::MemoryRepositoryProvider;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn principal(id: &str, role: Role) -> Principal {
        Principal {
            id: id.to_string(),
            username: format!("user-{id}"),
            role,
            free_parking: false,
        }
    }

    fn lot(id: i64, capacity: i32) -> ParkingLot {
        ParkingLot {
            id,
            name: format!("Lot {id}"),
            location: "Utrecht".into(),
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

    fn request(user_id: &str, lot_id: i64) -> ReservationRequest {
        let start = Utc::now() + Duration::hours(1);
        ReservationRequest {
            user_id: user_id.to_string(),
            lot_id,
            vehicle_id: 1,
            start_time: start,
            end_time: start + Duration::hours(2),
        }
    }

    async fn setup(capacity: i32) -> (ReservationService, Arc<dyn RepositoryProvider>) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
        repos.parking_lots().save(lot(1, capacity)).await.unwrap();
        (ReservationService::new(repos.clone()), repos)
    }

    async fn reserved_count(repos: &Arc<dyn RepositoryProvider>, lot_id: i64) -> i32 {
        repos
            .parking_lots()
            .find_by_id(lot_id)
            .await
            .unwrap()
            .unwrap()
            .reserved
    }

    #[tokio::test]
    async fn exhaustion_round_trip() {
        let (svc, repos) = setup(1).await;
        let alice = principal("alice", Role::User);

        let first = svc.reserve(&alice, request("alice", 1)).await.unwrap();
        assert_eq!(reserved_count(&repos, 1).await, 1);

        let err = svc.reserve(&alice, request("alice", 1)).await.unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded(_)));
        assert_eq!(reserved_count(&repos, 1).await, 1);

        svc.release(&alice, first.id).await.unwrap();
        assert_eq!(reserved_count(&repos, 1).await, 0);

        svc.reserve(&alice, request("alice", 1)).await.unwrap();
        assert_eq!(reserved_count(&repos, 1).await, 1);
    }

    #[tokio::test]
    async fn missing_lot_is_not_found() {
        let (svc, _) = setup(1).await;
        let err = svc
            .reserve(&principal("alice", Role::User), request("alice", 42))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn non_privileged_owner_is_overwritten() {
        let (svc, _) = setup(5).await;
        let alice = principal("alice", Role::User);

        let r = svc.reserve(&alice, request("somebody-else", 1)).await.unwrap();
        assert_eq!(r.user_id, "alice");
    }

    #[tokio::test]
    async fn privileged_supplied_owner_is_honored() {
        let (svc, _) = setup(5).await;
        let employee = principal("emp", Role::Employee);

        let r = svc.reserve(&employee, request("customer-7", 1)).await.unwrap();
        assert_eq!(r.user_id, "customer-7");
    }

    #[tokio::test]
    async fn release_is_owner_or_privileged() {
        let (svc, _) = setup(5).await;
        let alice = principal("alice", Role::User);
        let r = svc.reserve(&alice, request("alice", 1)).await.unwrap();

        let err = svc
            .release(&principal("bob", Role::User), r.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        svc.release(&principal("admin", Role::Admin), r.id)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn release_never_drives_counter_negative() {
        let (svc, repos) = setup(5).await;
        let alice = principal("alice", Role::User);
        let r = svc.reserve(&alice, request("alice", 1)).await.unwrap();

        // Zero the counter behind the ledger's back
        let mut l = repos.parking_lots().find_by_id(1).await.unwrap().unwrap();
        l.reserved = 0;
        repos.parking_lots().update(l).await.unwrap();

        svc.release(&alice, r.id).await.unwrap();
        assert_eq!(reserved_count(&repos, 1).await, 0);
    }

    #[tokio::test]
    async fn release_tolerates_missing_lot() {
        let (svc, repos) = setup(5).await;
        let alice = principal("alice", Role::User);
        let r = svc.reserve(&alice, request("alice", 1)).await.unwrap();

        repos.parking_lots().delete(1).await.unwrap();
        svc.release(&alice, r.id).await.unwrap();
        assert!(repos.reservations().find_by_id(r.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_time_window_is_rejected() {
        let (svc, repos) = setup(5).await;
        let mut req = request("alice", 1);
        req.end_time = req.start_time - Duration::minutes(1);

        let err = svc
            .reserve(&principal("alice", Role::User), req)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(reserved_count(&repos, 1).await, 0);
    }

    #[tokio::test]
    async fn concurrent_admission_never_exceeds_capacity() {
        let (svc, repos) = setup(1).await;
        let svc = Arc::new(svc);
        let alice = principal("alice", Role::User);
        let bob = principal("bob", Role::User);

        let (a, b) = tokio::join!(
            svc.reserve(&alice, request("alice", 1)),
            svc.reserve(&bob, request("bob", 1))
        );
        assert!(a.is_ok() != b.is_ok(), "exactly one admission must win");
        assert_eq!(reserved_count(&repos, 1).await, 1);
    }

    #[tokio::test]
    async fn get_enforces_ownership() {
        let (svc, _) = setup(5).await;
        let alice = principal("alice", Role::User);
        let r = svc.reserve(&alice, request("alice", 1)).await.unwrap();

        assert!(svc.get(&alice, r.id).await.is_ok());
        let err = svc.get(&principal("bob", Role::User), r.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }
}
