//! Authenticated principal and the authorization rules applied to it.
//!
//! Every protected endpoint resolves a [`Principal`] (from JWT claims or
//! the fixed system principal used by unattended gate hardware) before any
//! state is touched. The guard functions here are the single place the
//! "owner or admin/employee" rule lives.

use serde::{Deserialize, Serialize};

use crate::shared::{DomainError, DomainResult};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Admin,
    Employee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Admin => "ADMIN",
            Self::Employee => "EMPLOYEE",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "ADMIN" => Self::Admin,
            "EMPLOYEE" => Self::Employee,
            _ => Self::User,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The authenticated identity performing an action.
#[derive(Debug, Clone)]
pub struct Principal {
    /// User id (uuid string; "0" for the system principal)
    pub id: String,
    pub username: String,
    pub role: Role,
    /// Privileged-guest entitlement: sessions for this principal close at cost 0
    pub free_parking: bool,
}

impl Principal {
    /// Fixed principal used by automated gate entry/exit (no human token).
    pub fn system() -> Self {
        Self {
            id: "0".to_string(),
            username: "system".to_string(),
            role: Role::Admin,
            free_parking: false,
        }
    }

    /// Admin and employee roles bypass ownership checks.
    pub fn is_privileged(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Employee)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Admin-only actions (lot and discount management, purges).
pub fn require_admin(principal: &Principal) -> DomainResult<()> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(DomainError::Forbidden(
            "Admin privileges required".to_string(),
        ))
    }
}

/// A regular user may act only on resources they own; admin/employee
/// bypass the ownership check entirely.
pub fn require_self_or_privileged(principal: &Principal, owner_id: &str) -> DomainResult<()> {
    if principal.is_privileged() || principal.id == owner_id {
        Ok(())
    } else {
        Err(DomainError::Forbidden("Access denied".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> Principal {
        Principal {
            id: id.to_string(),
            username: format!("user-{id}"),
            role,
            free_parking: false,
        }
    }

    #[test]
    fn admin_bypasses_ownership() {
        let p = user("1", Role::Admin);
        assert!(require_self_or_privileged(&p, "999").is_ok());
    }

    #[test]
    fn employee_bypasses_ownership() {
        let p = user("1", Role::Employee);
        assert!(require_self_or_privileged(&p, "999").is_ok());
    }

    #[test]
    fn user_may_act_on_own_resource_only() {
        let p = user("42", Role::User);
        assert!(require_self_or_privileged(&p, "42").is_ok());
        assert!(matches!(
            require_self_or_privileged(&p, "43"),
            Err(DomainError::Forbidden(_))
        ));
    }

    #[test]
    fn require_admin_rejects_employee() {
        assert!(require_admin(&user("1", Role::Admin)).is_ok());
        assert!(require_admin(&user("1", Role::Employee)).is_err());
        assert!(require_admin(&user("1", Role::User)).is_err());
    }

    #[test]
    fn system_principal_is_admin() {
        let p = Principal::system();
        assert_eq!(p.id, "0");
        assert!(p.is_admin());
    }

    #[test]
    fn role_roundtrip() {
        for role in &[Role::User, Role::Admin, Role::Employee] {
            assert_eq!(Role::from_str(role.as_str()), *role);
        }
        assert_eq!(Role::from_str("unknown"), Role::User);
    }
}
