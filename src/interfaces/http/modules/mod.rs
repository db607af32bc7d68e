//! Per-entity HTTP modules: DTOs and handlers.

pub mod auth;
pub mod discounts;
pub mod gate;
pub mod health;
pub mod metrics;
pub mod parking_lots;
pub mod payments;
pub mod reservations;
pub mod sessions;
pub mod vehicles;
