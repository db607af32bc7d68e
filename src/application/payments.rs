//! Payment settlement for stopped parking sessions.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::domain::payment::Payment;
use crate::domain::principal::Principal;
use crate::domain::{DomainError, DomainResult, PaymentStatus, RepositoryProvider};

/// Instrument details supplied by the paying client.
#[derive(Debug, Clone, Default)]
pub struct PaymentInstrument {
    pub method: Option<String>,
    pub issuer: Option<String>,
    pub bank: Option<String>,
}

pub struct PaymentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl PaymentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Settle a stopped session: record a completed payment for the
    /// session's cost and flip the session to paid.
    ///
    /// Only stopped sessions with a computed cost can be paid; a session
    /// that is still active or already paid is a `Conflict`. A session
    /// stopped without tariff data (`cost = None`) cannot be settled
    /// automatically and must be corrected by staff first.
    pub async fn pay_session(
        &self,
        principal: &Principal,
        session_id: i64,
        instrument: PaymentInstrument,
    ) -> DomainResult<Payment> {
        let mut session = self
            .repos
            .sessions()
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::not_found("ParkingSession", "id", session_id))?;

        if !principal.is_privileged() && session.username != principal.username {
            return Err(DomainError::not_found("ParkingSession", "id", session_id));
        }

        if session.is_active() {
            return Err(DomainError::Conflict(
                "Session is still active and cannot be paid yet".to_string(),
            ));
        }
        if session.payment_status == Some(PaymentStatus::Paid) {
            return Err(DomainError::Conflict(
                "Session has already been paid".to_string(),
            ));
        }
        let amount = session.cost.ok_or_else(|| {
            DomainError::Validation(
                "Session has no computed cost; contact parking staff".to_string(),
            )
        })?;

        let mut payment = Payment::new(principal.username.clone(), amount);
        payment.session_id = Some(session.id);
        payment.parking_lot_id = Some(session.parking_lot_id);
        payment.method = instrument.method;
        payment.issuer = instrument.issuer;
        payment.bank = instrument.bank;
        payment.completed = true;

        let created = self.repos.payments().save(payment).await?;

        session.mark_paid();
        self.repos.sessions().update(session).await?;

        info!(
            payment_id = created.id,
            session_id,
            amount = %created.amount,
            "Session paid"
        );
        Ok(created)
    }

    /// Record a standalone payment not tied to a session, e.g. a top-up
    /// taken at the desk. Privileged callers only.
    pub async fn record_manual(
        &self,
        principal: &Principal,
        initiator: &str,
        amount: Decimal,
        instrument: PaymentInstrument,
    ) -> DomainResult<Payment> {
        if !principal.is_privileged() {
            return Err(DomainError::Forbidden(
                "Only staff may record manual payments".to_string(),
            ));
        }
        if amount < Decimal::ZERO {
            return Err(DomainError::Validation(
                "Payment amount cannot be negative".to_string(),
            ));
        }

        let mut payment = Payment::new(initiator, amount);
        payment.method = instrument.method;
        payment.issuer = instrument.issuer;
        payment.bank = instrument.bank;
        payment.completed = true;

        let created = self.repos.payments().save(payment).await?;
        info!(payment_id = created.id, initiator, "Manual payment recorded");
        Ok(created)
    }

    /// Payments initiated by the caller themselves.
    pub async fn list_own(&self, principal: &Principal) -> DomainResult<Vec<Payment>> {
        self.repos
            .payments()
            .find_by_initiator(&principal.username)
            .await
    }

    /// Payments of another user; self-or-privileged.
    pub async fn list_for_user(
        &self,
        principal: &Principal,
        username: &str,
    ) -> DomainResult<Vec<Payment>> {
        if principal.username != username && !principal.is_privileged() {
            return Err(DomainError::Forbidden(
                "You may only view your own payments".to_string(),
            ));
        }
        self.repos.payments().find_by_initiator(username).await
    }

    pub async fn get(&self, principal: &Principal, payment_id: i64) -> DomainResult<Payment> {
        let payment = self
            .repos
            .payments()
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Payment", "id", payment_id))?;

        if !principal.is_privileged() && payment.initiator != principal.username {
            return Err(DomainError::not_found("Payment", "id", payment_id));
        }
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::parking_session::ParkingSession;
    use crate::domain::principal::Role;
    use crate::infrastructure::storage::memory::MemoryRepositoryProvider;
    use chrono::{Duration, Utc};

    fn principal(username: &str, role: Role) -> Principal {
        Principal {
            id: format!("id-{username}"),
            username: username.to_string(),
            role,
            free_parking: false,
        }
    }

    fn service() -> (PaymentService, Arc<dyn RepositoryProvider>) {
        let repos: Arc<dyn RepositoryProvider> = Arc::new(MemoryRepositoryProvider::new());
        (PaymentService::new(repos.clone()), repos)
    }

    async fn stopped_session(
        repos: &Arc<dyn RepositoryProvider>,
        username: &str,
        cost: Option<Decimal>,
    ) -> ParkingSession {
        let mut s = ParkingSession::start(1, "AB-123-C", username, false);
        let stop = s.started + Duration::minutes(90);
        s.close(stop, cost);
        // insert_active requires an active session; persist directly
        s.stopped = None;
        let mut created = repos.sessions().insert_active(s).await.unwrap();
        created.close(Utc::now(), cost);
        repos.sessions().update(created.clone()).await.unwrap();
        created
    }

    #[tokio::test]
    async fn paying_a_stopped_session_marks_it_paid() {
        let (svc, repos) = service();
        let alice = principal("alice", Role::User);
        let session = stopped_session(&repos, "alice", Some(Decimal::new(450, 2))).await;

        let payment = svc
            .pay_session(&alice, session.id, PaymentInstrument::default())
            .await
            .unwrap();
        assert_eq!(payment.amount, Decimal::new(450, 2));
        assert!(payment.completed);
        assert_eq!(payment.session_id, Some(session.id));

        let stored = repos
            .sessions()
            .find_by_id(session.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.payment_status, Some(PaymentStatus::Paid));
    }

    #[tokio::test]
    async fn double_payment_is_conflict() {
        let (svc, repos) = service();
        let alice = principal("alice", Role::User);
        let session = stopped_session(&repos, "alice", Some(Decimal::from(5))).await;

        svc.pay_session(&alice, session.id, PaymentInstrument::default())
            .await
            .unwrap();
        let err = svc
            .pay_session(&alice, session.id, PaymentInstrument::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn active_session_cannot_be_paid() {
        let (svc, repos) = service();
        let alice = principal("alice", Role::User);
        let active = ParkingSession::start(1, "XX-1", "alice", false);
        let active = repos.sessions().insert_active(active).await.unwrap();

        let err = svc
            .pay_session(&alice, active.id, PaymentInstrument::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn session_without_cost_is_rejected() {
        let (svc, repos) = service();
        let alice = principal("alice", Role::User);
        let session = stopped_session(&repos, "alice", None).await;

        let err = svc
            .pay_session(&alice, session.id, PaymentInstrument::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn foreign_session_looks_absent() {
        let (svc, repos) = service();
        let session = stopped_session(&repos, "alice", Some(Decimal::from(5))).await;

        let err = svc
            .pay_session(
                &principal("bob", Role::User),
                session.id,
                PaymentInstrument::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn employee_can_settle_on_behalf() {
        let (svc, repos) = service();
        let session = stopped_session(&repos, "alice", Some(Decimal::from(5))).await;

        let payment = svc
            .pay_session(
                &principal("desk", Role::Employee),
                session.id,
                PaymentInstrument::default(),
            )
            .await
            .unwrap();
        assert_eq!(payment.initiator, "desk");
    }

    #[tokio::test]
    async fn manual_payment_requires_privilege() {
        let (svc, _) = service();
        let err = svc
            .record_manual(
                &principal("bob", Role::User),
                "bob",
                Decimal::from(5),
                PaymentInstrument::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        svc.record_manual(
            &principal("desk", Role::Employee),
            "alice",
            Decimal::from(5),
            PaymentInstrument::default(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn list_own_returns_only_callers_payments() {
        let (svc, repos) = service();
        let alice = principal("alice", Role::User);
        let s1 = stopped_session(&repos, "alice", Some(Decimal::from(5))).await;
        svc.pay_session(&alice, s1.id, PaymentInstrument::default())
            .await
            .unwrap();
        svc.record_manual(
            &principal("desk", Role::Employee),
            "desk",
            Decimal::from(9),
            PaymentInstrument::default(),
        )
        .await
        .unwrap();

        let own = svc.list_own(&alice).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].initiator, "alice");
    }
}
