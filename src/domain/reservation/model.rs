//! Reservation domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Reservation status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationStatus {
    /// Slot committed against the lot's reserved counter
    Confirmed,
    /// Released; the slot went back to the lot
    Cancelled,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Unrecognized values map to `Confirmed`; a stored reservation
    /// still holds its slot until it is explicitly cancelled.
    pub fn from_str(s: &str) -> Self {
        match s {
            "Cancelled" => Self::Cancelled,
            _ => Self::Confirmed,
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A committed claim on one parking spot for a time window.
///
/// Creation is coupled 1:1 with an increment of the owning lot's
/// `reserved` counter; deletion with a floor-zero decrement.
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: i64,
    pub user_id: String,
    pub lot_id: i64,
    pub vehicle_id: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub cost: Option<Decimal>,
    pub status: ReservationStatus,
}

impl Reservation {
    pub fn new(
        user_id: impl Into<String>,
        lot_id: i64,
        vehicle_id: i64,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            user_id: user_id.into(),
            lot_id,
            vehicle_id,
            start_time,
            end_time,
            created_at: Utc::now(),
            cost: None,
            status: ReservationStatus::Confirmed,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == ReservationStatus::Confirmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_reservation_is_confirmed() {
        let now = Utc::now();
        let r = Reservation::new("user-1", 1, 2, now, now + Duration::hours(2));
        assert!(r.is_confirmed());
        assert!(r.cost.is_none());
    }

    #[test]
    fn status_roundtrip() {
        for status in &[ReservationStatus::Confirmed, ReservationStatus::Cancelled] {
            assert_eq!(&ReservationStatus::from_str(status.as_str()), status);
        }
    }

    #[test]
    fn unknown_status_keeps_the_slot() {
        assert_eq!(
            ReservationStatus::from_str("garbage"),
            ReservationStatus::Confirmed
        );
        assert_eq!(ReservationStatus::from_str(""), ReservationStatus::Confirmed);
    }
}
