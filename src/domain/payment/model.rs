//! Payment domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// A payment transaction, normally consuming a stopped session's cost.
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i64,
    /// Human-facing transaction reference (PAY-...)
    pub transaction: String,
    pub amount: Decimal,
    /// Username of the paying principal
    pub initiator: String,
    pub session_id: Option<i64>,
    pub parking_lot_id: Option<i64>,
    pub method: Option<String>,
    pub issuer: Option<String>,
    pub bank: Option<String>,
    pub completed: bool,
    /// Validation hash handed to the payment provider callback
    pub hash: String,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(initiator: impl Into<String>, amount: Decimal) -> Self {
        let initiator = initiator.into();
        let created_at = Utc::now();
        Self {
            id: 0,
            transaction: generate_transaction_ref(&initiator, created_at),
            amount,
            initiator,
            session_id: None,
            parking_lot_id: None,
            method: None,
            issuer: None,
            bank: None,
            completed: false,
            hash: generate_validation_hash(),
            created_at,
        }
    }
}

/// Transaction references are derived from initiator + timestamp.
pub fn generate_transaction_ref(username: &str, at: DateTime<Utc>) -> String {
    format!("PAY-{}-{}", username, at.timestamp_millis())
}

fn generate_validation_hash() -> String {
    format!("HASH-{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_payment_has_reference_and_hash() {
        let p = Payment::new("alice", Decimal::from(5));
        assert!(p.transaction.starts_with("PAY-alice-"));
        assert!(p.hash.starts_with("HASH-"));
        assert!(!p.completed);
    }
}
