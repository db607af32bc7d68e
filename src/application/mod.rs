//! Application services: use-case orchestration on top of the domain
//! repositories.

pub mod discounts;
pub mod payments;
pub mod reservations;
pub mod sessions;
pub mod tariff;

pub use discounts::{DiscountService, DiscountSpec};
pub use payments::{PaymentInstrument, PaymentService};
pub use reservations::{ReservationRequest, ReservationService};
pub use sessions::SessionService;
