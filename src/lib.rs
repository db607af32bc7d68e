//! # MobyPark Parking Service
//!
//! Backend for parking lot management: accounts, vehicles, timed parking
//! sessions, reservations, discount codes and payments.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and repository traits
//! - **application**: Business logic services (sessions, reservations, discounts, payments)
//! - **infrastructure**: Persistence (SeaORM database, in-memory store)
//! - **interfaces**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password hashing

pub mod application;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router and shared handler state
pub use interfaces::http::{create_api_router, AppState};
