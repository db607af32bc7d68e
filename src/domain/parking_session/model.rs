//! Parking session domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Payment status of a stopped session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    /// Session stopped, cost computed, not yet paid
    Pending,
    /// Paid through the payments module
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "paid" => Self::Paid,
            _ => Self::Pending,
        }
    }
}

/// A timed occupancy of a parking lot by one license plate.
///
/// A session with `stopped = None` is *active*; per plate at most one
/// active session may exist at any time. Stopping fills `stopped`,
/// `duration_minutes`, `cost` and `payment_status` together.
#[derive(Debug, Clone)]
pub struct ParkingSession {
    pub id: i64,
    pub parking_lot_id: i64,
    /// Normalized (uppercased) license plate
    pub licenseplate: String,
    pub started: DateTime<Utc>,
    pub stopped: Option<DateTime<Utc>>,
    /// Username of the owning principal
    pub username: String,
    pub duration_minutes: Decimal,
    /// None until stopped; may stay None when lot tariff data is missing,
    /// and is 0 for free-parking principals.
    pub cost: Option<Decimal>,
    pub payment_status: Option<PaymentStatus>,
}

impl ParkingSession {
    pub fn start(
        parking_lot_id: i64,
        licenseplate: impl Into<String>,
        username: impl Into<String>,
        free_parking: bool,
    ) -> Self {
        Self {
            id: 0,
            parking_lot_id,
            licenseplate: normalize_plate(licenseplate.into()),
            started: Utc::now(),
            stopped: None,
            username: username.into(),
            duration_minutes: Decimal::ZERO,
            cost: free_parking.then(|| Decimal::ZERO),
            payment_status: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.stopped.is_none()
    }

    /// Close the session at `now`, recording elapsed minutes and cost.
    pub fn close(&mut self, now: DateTime<Utc>, cost: Option<Decimal>) {
        let elapsed_secs = (now - self.started).num_seconds().max(0);
        self.stopped = Some(now);
        self.duration_minutes = Decimal::from(elapsed_secs) / Decimal::from(60);
        self.cost = cost;
        self.payment_status = Some(PaymentStatus::Pending);
    }

    pub fn mark_paid(&mut self) {
        self.payment_status = Some(PaymentStatus::Paid);
    }
}

/// License plates are matched case-insensitively; store them uppercased.
pub fn normalize_plate(plate: impl AsRef<str>) -> String {
    plate.as_ref().trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn start_is_active() {
        let s = ParkingSession::start(1, "ab-123-c", "alice", false);
        assert!(s.is_active());
        assert_eq!(s.licenseplate, "AB-123-C");
        assert!(s.cost.is_none());
        assert!(s.payment_status.is_none());
    }

    #[test]
    fn free_parking_starts_at_zero_cost() {
        let s = ParkingSession::start(1, "AB-123-C", "mayor", true);
        assert_eq!(s.cost, Some(Decimal::ZERO));
    }

    #[test]
    fn close_records_duration_and_pending_status() {
        let mut s = ParkingSession::start(1, "AB-123-C", "alice", false);
        let stop = s.started + Duration::minutes(90);
        s.close(stop, Some(Decimal::new(300, 2)));
        assert!(!s.is_active());
        assert_eq!(s.duration_minutes, Decimal::from(90));
        assert_eq!(s.cost, Some(Decimal::new(300, 2)));
        assert_eq!(s.payment_status, Some(PaymentStatus::Pending));
    }

    #[test]
    fn close_tolerates_missing_cost() {
        let mut s = ParkingSession::start(1, "AB-123-C", "alice", false);
        let stop = s.started + Duration::minutes(10);
        s.close(stop, None);
        assert!(s.stopped.is_some());
        assert!(s.cost.is_none());
    }

    #[test]
    fn plate_normalization_trims_and_uppercases() {
        assert_eq!(normalize_plate("  ab-123-c "), "AB-123-C");
    }

    #[test]
    fn payment_status_roundtrip() {
        assert_eq!(PaymentStatus::from_str("paid"), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::from_str("pending"), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::from_str("junk"), PaymentStatus::Pending);
    }
}
