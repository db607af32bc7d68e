//! Discount code domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

pub const MAX_CODE_LEN: usize = 30;

/// A discount code, optionally scoped to one lot and/or one user.
///
/// Codes are not single-use: the billing path only reads them.
#[derive(Debug, Clone)]
pub struct DiscountCode {
    pub id: i64,
    /// Unique, letters only, at most [`MAX_CODE_LEN`] characters
    pub code: String,
    /// Flat deduction; takes precedence over `percentage`
    pub amount: Option<Decimal>,
    /// Percentage deduction (0-100)
    pub percentage: Option<Decimal>,
    /// Restrict to one parking lot
    pub lot_id: Option<i64>,
    /// Restrict to one user
    pub user_id: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl DiscountCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date.is_some_and(|exp| exp < now)
    }
}

/// Codes must be letters only and at most 30 characters.
pub fn validate_code(code: &str) -> bool {
    !code.is_empty() && code.len() <= MAX_CODE_LEN && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn code(expiration: Option<DateTime<Utc>>) -> DiscountCode {
        DiscountCode {
            id: 1,
            code: "SUMMER".into(),
            amount: None,
            percentage: Some(Decimal::from(10)),
            lot_id: None,
            user_id: None,
            expiration_date: expiration,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn no_expiry_never_expires() {
        assert!(!code(None).is_expired(Utc::now()));
    }

    #[test]
    fn past_expiry_is_expired() {
        let c = code(Some(Utc::now() - Duration::days(1)));
        assert!(c.is_expired(Utc::now()));
    }

    #[test]
    fn future_expiry_is_valid() {
        let c = code(Some(Utc::now() + Duration::days(1)));
        assert!(!c.is_expired(Utc::now()));
    }

    #[test]
    fn code_validation() {
        assert!(validate_code("SUMMER"));
        assert!(validate_code("aBcDeF"));
        assert!(!validate_code(""));
        assert!(!validate_code("HAS-DASH"));
        assert!(!validate_code("NUM3RIC"));
        assert!(!validate_code(&"A".repeat(31)));
    }
}
