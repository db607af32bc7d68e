//! Vehicle domain entity

use chrono::{DateTime, Utc};

use crate::domain::parking_session::normalize_plate;

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: i64,
    pub user_id: String,
    /// Normalized (uppercased) license plate
    pub licenseplate: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    pub fn new(user_id: impl Into<String>, licenseplate: impl AsRef<str>) -> Self {
        Self {
            id: 0,
            user_id: user_id.into(),
            licenseplate: normalize_plate(licenseplate),
            make: None,
            model: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_is_normalized_on_creation() {
        let v = Vehicle::new("user-1", " xy-99-z ");
        assert_eq!(v.licenseplate, "XY-99-Z");
    }
}
