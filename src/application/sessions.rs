//! Session lifecycle manager: start/stop state machine per license plate.
//!
//! Starts are serialized per plate with an in-process async mutex so the
//! "no active session" check and the insert cannot interleave between
//! concurrent requests; the store's partial unique index backs this up
//! and surfaces as the same `Conflict`.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::discounts::DiscountService;
use super::tariff::{compute_cost, round_money};
use crate::domain::parking_session::{normalize_plate, ParkingSession};
use crate::domain::principal::Principal;
use crate::domain::{DomainError, DomainResult, RepositoryProvider};

pub struct SessionService {
    repos: Arc<dyn RepositoryProvider>,
    discounts: Arc<DiscountService>,
    /// Per-plate serialization of start/stop critical sections.
    plate_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SessionService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, discounts: Arc<DiscountService>) -> Self {
        Self {
            repos,
            discounts,
            plate_locks: DashMap::new(),
        }
    }

    /// Start a parking session for a plate in a lot.
    ///
    /// Fails with `Conflict` when another session for this plate is
    /// already active, and with `NotFound` when the lot does not exist.
    pub async fn start(
        &self,
        lot_id: i64,
        licenseplate: &str,
        principal: &Principal,
    ) -> DomainResult<ParkingSession> {
        let plate = normalize_plate(licenseplate);
        if plate.is_empty() {
            return Err(DomainError::Validation("License plate is required".to_string()));
        }

        let lock = self.plate_lock(&plate);
        let _guard = lock.lock().await;

        if self.repos.parking_lots().find_by_id(lot_id).await?.is_none() {
            return Err(DomainError::not_found("ParkingLot", "id", lot_id));
        }

        if self
            .repos
            .sessions()
            .find_active_by_plate(&plate)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(
                "Cannot start a session when another session for this license plate is already active"
                    .to_string(),
            ));
        }

        let session = ParkingSession::start(
            lot_id,
            plate.clone(),
            &principal.username,
            principal.free_parking,
        );
        let created = self.repos.sessions().insert_active(session).await?;

        metrics::counter!("parking_sessions_started_total").increment(1);
        info!(
            lot_id,
            licenseplate = %plate,
            session_id = created.id,
            user = %principal.username,
            "Parking session started"
        );
        Ok(created)
    }

    /// Stop the active session for a plate, computing duration and cost.
    ///
    /// A non-privileged principal can only stop their own session; for
    /// them a foreign active session looks like no session at all.
    pub async fn stop(
        &self,
        lot_id: i64,
        licenseplate: &str,
        discount_code: Option<&str>,
        principal: &Principal,
    ) -> DomainResult<ParkingSession> {
        let plate = normalize_plate(licenseplate);

        let lock = self.plate_lock(&plate);
        let _guard = lock.lock().await;

        let session = self
            .repos
            .sessions()
            .find_active_by_plate(&plate)
            .await?
            .filter(|s| principal.is_privileged() || s.username == principal.username)
            .ok_or_else(|| {
                DomainError::not_found("ParkingSession", "licenseplate", &plate)
            })?;

        let now = Utc::now();
        let elapsed_minutes =
            Decimal::from((now - session.started).num_seconds().max(0)) / Decimal::from(60);

        let cost = if session.cost == Some(Decimal::ZERO) {
            // Free-parking entitlement recorded at start
            Some(Decimal::ZERO)
        } else {
            self.settle_cost(lot_id, &session, elapsed_minutes, discount_code)
                .await?
        };

        let mut session = session;
        session.close(now, cost);
        self.repos.sessions().update(session.clone()).await?;

        metrics::counter!("parking_sessions_stopped_total").increment(1);
        info!(
            lot_id,
            licenseplate = %plate,
            session_id = session.id,
            cost = ?session.cost,
            "Parking session stopped"
        );
        Ok(session)
    }

    /// Unattended gate entry: same flow as [`start`] under the fixed
    /// system principal.
    pub async fn auto_start(&self, lot_id: i64, licenseplate: &str) -> DomainResult<ParkingSession> {
        self.start(lot_id, licenseplate, &Principal::system()).await
    }

    /// Unattended gate exit: same flow as [`stop`] under the fixed
    /// system principal.
    pub async fn auto_stop(&self, lot_id: i64, licenseplate: &str) -> DomainResult<ParkingSession> {
        self.stop(lot_id, licenseplate, None, &Principal::system())
            .await
    }

    pub async fn list_for_lot(&self, lot_id: i64) -> DomainResult<Vec<ParkingSession>> {
        self.repos.sessions().find_by_lot(lot_id).await
    }

    pub async fn list_for_user(&self, username: &str) -> DomainResult<Vec<ParkingSession>> {
        self.repos.sessions().find_by_username(username).await
    }

    /// Base cost from the lot's tariffs, with an optional discount.
    ///
    /// A lot whose metadata cannot be loaded leaves the cost unset rather
    /// than failing the stop (legacy behavior, kept deliberately). An
    /// unknown or expired discount code falls back to the undiscounted
    /// base; a scope violation propagates.
    async fn settle_cost(
        &self,
        lot_id: i64,
        session: &ParkingSession,
        elapsed_minutes: Decimal,
        discount_code: Option<&str>,
    ) -> DomainResult<Option<Decimal>> {
        let Some(lot) = self.repos.parking_lots().find_by_id(lot_id).await? else {
            warn!(
                lot_id,
                session_id = session.id,
                "Lot tariff data missing at stop; session closes without a cost"
            );
            return Ok(None);
        };

        let base = round_money(compute_cost(elapsed_minutes, lot.tariff, lot.day_tariff));

        let Some(code) = discount_code.filter(|c| !c.is_empty()) else {
            return Ok(Some(base));
        };

        let user_id = self
            .repos
            .users()
            .find_by_username(&session.username)
            .await?
            .map(|u| u.id)
            .unwrap_or_default();

        match self
            .discounts
            .apply(base, code, lot_id, &user_id, Utc::now())
            .await
        {
            Ok(discounted) => Ok(Some(round_money(discounted))),
            Err(DomainError::NotFound { .. }) => Ok(Some(base)),
            Err(e) => Err(e),
        }
    }

    fn plate_lock(&self, plate: &str) -> Arc<Mutex<()>> {
        self.plate_locks
            .entry(plate.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parking_lot::ParkingLot;
    use crate::domain::principal::Role;
    use crate::infrastructure::storage::memory::MemoryRepositoryProvider;
    use chrono::Duration;

    fn principal(username: &str) -> Principal {
        Principal {
            id: format!("id-{username}"),
            username: username.to_string(),
            role: Role::User,
            free_parking: false,
        }
    }

    fn lot(id: i64) -> ParkingLot {
        ParkingLot {
            id,
            name: format!("Lot {id}"),
            location: "Rotterdam".into(),
            address: None,
            capacity: 50,
            reserved: 0,
            tariff: Decimal::from(2),
            day_tariff: Decimal::from(20),
            lat: None,
            lng: None,
            created_at: Utc::now(),
        }
    }

    async fn setup() -> (Arc<SessionService>, Arc<dyn RepositoryProvider>) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
        repos.parking_lots().save(lot(1)).await.unwrap();
        let discounts = Arc::new(DiscountService::new(repos.clone()));
        (
            Arc::new(SessionService::new(repos.clone(), discounts)),
            repos,
        )
    }

    /// Rewind a stored session's start time to simulate elapsed parking.
    async fn rewind_start(repos: &Arc<dyn RepositoryProvider>, id: i64, minutes: i64) {
        let mut s = repos.sessions().find_by_id(id).await.unwrap().unwrap();
        s.started -= Duration::minutes(minutes);
        repos.sessions().update(s).await.unwrap();
    }

    #[tokio::test]
    async fn start_stop_round_trip() {
        let (svc, repos) = setup().await;
        let alice = principal("alice");

        let started = svc.start(1, "AB-123-C", &alice).await.unwrap();
        assert!(started.is_active());

        // A second start for the same plate conflicts
        let err = svc.start(1, "ab-123-c", &alice).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        rewind_start(&repos, started.id, 90).await;
        let stopped = svc.stop(1, "AB-123-C", None, &alice).await.unwrap();
        assert!(!stopped.is_active());
        // 90 min at 2.0/h = 3.00
        assert_eq!(stopped.cost, Some(Decimal::from(3)));
        assert_eq!(
            stopped.payment_status,
            Some(crate::domain::PaymentStatus::Pending)
        );

        // The plate is free again
        svc.start(1, "AB-123-C", &alice).await.unwrap();
    }

    #[tokio::test]
    async fn stop_without_active_session_is_not_found() {
        let (svc, _) = setup().await;
        let err = svc
            .stop(1, "ZZ-000-Z", None, &principal("alice"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn start_in_unknown_lot_is_not_found() {
        let (svc, _) = setup().await;
        let err = svc.start(99, "AB-123-C", &principal("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn foreign_session_looks_absent_to_regular_user() {
        let (svc, _) = setup().await;
        svc.start(1, "AB-123-C", &principal("alice")).await.unwrap();

        let err = svc
            .stop(1, "AB-123-C", None, &principal("bob"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn privileged_principal_can_stop_any_session() {
        let (svc, _) = setup().await;
        svc.start(1, "AB-123-C", &principal("alice")).await.unwrap();

        let employee = Principal {
            id: "e1".into(),
            username: "employee".into(),
            role: Role::Employee,
            free_parking: false,
        };
        let stopped = svc.stop(1, "AB-123-C", None, &employee).await.unwrap();
        assert_eq!(stopped.username, "alice");
    }

    #[tokio::test]
    async fn free_parking_session_closes_at_zero_cost() {
        let (svc, repos) = setup().await;
        let mayor = Principal {
            id: "m1".into(),
            username: "mayor".into(),
            role: Role::User,
            free_parking: true,
        };

        let started = svc.start(1, "VIP-1", &mayor).await.unwrap();
        rewind_start(&repos, started.id, 600).await;
        let stopped = svc.stop(1, "VIP-1", None, &mayor).await.unwrap();
        assert_eq!(stopped.cost, Some(Decimal::ZERO));
    }

    #[tokio::test]
    async fn missing_lot_at_stop_leaves_cost_unset() {
        let (svc, repos) = setup().await;
        let alice = principal("alice");
        let started = svc.start(1, "AB-123-C", &alice).await.unwrap();
        rewind_start(&repos, started.id, 60).await;

        repos.parking_lots().delete(1).await.unwrap();
        let stopped = svc.stop(1, "AB-123-C", None, &alice).await.unwrap();
        assert!(stopped.stopped.is_some());
        assert!(stopped.cost.is_none());
    }

    #[tokio::test]
    async fn unknown_discount_code_falls_back_to_base_cost() {
        let (svc, repos) = setup().await;
        let alice = principal("alice");
        let started = svc.start(1, "AB-123-C", &alice).await.unwrap();
        rewind_start(&repos, started.id, 120).await;

        let stopped = svc
            .stop(1, "AB-123-C", Some("NOSUCHCODE"), &alice)
            .await
            .unwrap();
        // 2h at 2.0/h, undiscounted
        assert_eq!(stopped.cost, Some(Decimal::from(4)));
    }

    #[tokio::test]
    async fn scoped_discount_violation_propagates() {
        let (svc, repos) = setup().await;
        repos.parking_lots().save(lot(2)).await.unwrap();

        let admin = Principal {
            id: "a1".into(),
            username: "admin".into(),
            role: Role::Admin,
            free_parking: false,
        };
        let discounts = Arc::new(DiscountService::new(repos.clone()));
        discounts
            .create(
                &admin,
                "ONLYLOTTWO",
                crate::application::discounts::DiscountSpec {
                    percentage: Some(Decimal::from(50)),
                    lot_id: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let alice = principal("alice");
        let started = svc.start(1, "AB-123-C", &alice).await.unwrap();
        rewind_start(&repos, started.id, 60).await;

        let err = svc
            .stop(1, "AB-123-C", Some("ONLYLOTTWO"), &alice)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        // The session is still active after the failed stop
        let active = repos
            .sessions()
            .find_active_by_plate("AB-123-C")
            .await
            .unwrap();
        assert!(active.is_some());
    }

    #[tokio::test]
    async fn matching_discount_is_applied_at_stop() {
        let (svc, repos) = setup().await;
        let admin = Principal {
            id: "a1".into(),
            username: "admin".into(),
            role: Role::Admin,
            free_parking: false,
        };
        let discounts = Arc::new(DiscountService::new(repos.clone()));
        discounts
            .create(
                &admin,
                "HALF",
                crate::application::discounts::DiscountSpec {
                    percentage: Some(Decimal::from(50)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let alice = principal("alice");
        let started = svc.start(1, "AB-123-C", &alice).await.unwrap();
        rewind_start(&repos, started.id, 120).await;

        let stopped = svc.stop(1, "AB-123-C", Some("HALF"), &alice).await.unwrap();
        assert_eq!(stopped.cost, Some(Decimal::from(2)));
    }

    #[tokio::test]
    async fn gate_auto_start_and_stop_use_system_principal() {
        let (svc, _) = setup().await;
        let started = svc.auto_start(1, "CAM-42").await.unwrap();
        assert_eq!(started.username, "system");

        let stopped = svc.auto_stop(1, "CAM-42").await.unwrap();
        assert!(stopped.stopped.is_some());
    }

    #[tokio::test]
    async fn concurrent_starts_admit_exactly_one_session() {
        let (svc, repos) = setup().await;
        let alice = principal("alice");
        let bob = principal("bob");

        let (a, b) = tokio::join!(
            svc.start(1, "RACE-1", &alice),
            svc.start(1, "RACE-1", &bob)
        );
        assert!(a.is_ok() != b.is_ok(), "exactly one start must win");

        let active = repos
            .sessions()
            .find_active_by_plate("RACE-1")
            .await
            .unwrap();
        assert!(active.is_some());
    }
}
