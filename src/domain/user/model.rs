//! User domain entity

use chrono::{DateTime, Utc};

use crate::domain::principal::{Principal, Role};

#[derive(Debug, Clone)]
pub struct User {
    /// Uuid string
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    /// Privileged-guest entitlement (free parking)
    pub free_parking: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.into(),
            password_hash: password_hash.into(),
            name: None,
            email: None,
            role: Role::User,
            free_parking: false,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id.clone(),
            username: self.username.clone(),
            role: self.role,
            free_parking: self.free_parking,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_defaults() {
        let u = User::new("alice", "hash");
        assert_eq!(u.role, Role::User);
        assert!(u.is_active);
        assert!(!u.free_parking);
        assert!(!u.id.is_empty());
    }

    #[test]
    fn principal_carries_entitlement() {
        let mut u = User::new("mayor", "hash");
        u.free_parking = true;
        let p = u.principal();
        assert!(p.free_parking);
        assert_eq!(p.username, "mayor");
    }
}
