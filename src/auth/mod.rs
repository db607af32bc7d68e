//! Authentication and Authorization module
//!
//! Provides JWT token-based authentication for the HTTP surface.

pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{create_token, verify_token, Claims, JwtConfig};
pub use middleware::{auth_middleware, AuthState};
pub use password::{hash_password, verify_password};
