//! Parking lot domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A physical parking lot with its tariff configuration and the
/// capacity-reservation counter.
#[derive(Debug, Clone)]
pub struct ParkingLot {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub address: Option<String>,
    /// Physical capacity in parking spots
    pub capacity: i32,
    /// Committed reservations; invariant 0 <= reserved <= capacity.
    /// Mutated only through the reservation ledger.
    pub reserved: i32,
    /// Hourly parking rate
    pub tariff: Decimal,
    /// Flat rate for each completed 24-hour block
    pub day_tariff: Decimal,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl ParkingLot {
    pub fn has_free_reservation_slot(&self) -> bool {
        self.reserved < self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot(capacity: i32, reserved: i32) -> ParkingLot {
        ParkingLot {
            id: 1,
            name: "Central".into(),
            location: "Amsterdam".into(),
            address: None,
            capacity,
            reserved,
            tariff: Decimal::new(20, 1),
            day_tariff: Decimal::from(20),
            lat: None,
            lng: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn slot_available_below_capacity() {
        assert!(lot(2, 1).has_free_reservation_slot());
    }

    #[test]
    fn no_slot_at_capacity() {
        assert!(!lot(2, 2).has_free_reservation_slot());
        assert!(!lot(0, 0).has_free_reservation_slot());
    }
}
